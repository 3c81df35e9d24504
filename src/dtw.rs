//! Silence-aware sequence matching: trimming, cosine distance, and DTW.

use tracing::{debug, warn};

use crate::config::Config;

/// Cosine similarity between two coefficient vectors.
///
/// Mismatched lengths or empty inputs score 0. Two near-zero-norm vectors
/// score 1 (nothing matches nothing perfectly); a near-zero vector against
/// a non-zero one scores 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += x as f64 * y as f64;
        norm_a += x as f64 * x as f64;
        norm_b += y as f64 * y as f64;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < 1e-9 {
        return if norm_a < 1e-9 && norm_b < 1e-9 { 1.0 } else { 0.0 };
    }
    (dot / denom) as f32
}

/// Trims leading and trailing silent frames from an MFCC sequence.
///
/// A frame is voiced when it is non-empty and its C0 exceeds the silence
/// threshold. Returns the contiguous sub-range from the first voiced frame
/// through the last, or an empty slice when no frame qualifies.
pub fn trim_silence(sequence: &[Vec<f32>], c0_silence_threshold: f32) -> &[Vec<f32>] {
    let voiced = |frame: &Vec<f32>| !frame.is_empty() && frame[0] > c0_silence_threshold;

    let Some(start) = sequence.iter().position(voiced) else {
        debug!(len = sequence.len(), "sequence trimmed to empty");
        return &[];
    };
    let end = sequence.iter().rposition(voiced).map_or(sequence.len(), |i| i + 1);
    debug!(start, end, len = sequence.len(), "trimmed silence");
    &sequence[start..end]
}

/// Scores the similarity of two MFCC sequences in [0, 1].
///
/// Both sequences are trimmed independently with the C0 gate, then aligned
/// by dynamic time warping with a `1 - cosine_similarity` frame cost. The
/// total alignment cost is normalized by `R + C` (the sum of trimmed
/// lengths) rather than the true warping-path length; that approximation is
/// part of the scoring contract and biases scores for very different-length
/// sequences.
///
/// Returns 0.0 for an empty input, for any frame whose length is not
/// `num_coefficients`, or when either sequence trims to empty.
pub fn similarity(seq1: &[Vec<f32>], seq2: &[Vec<f32>], cfg: &Config) -> f32 {
    if seq1.is_empty() || seq2.is_empty() {
        warn!(len1 = seq1.len(), len2 = seq2.len(), "empty MFCC sequence");
        return 0.0;
    }
    for (name, seq) in [("seq1", seq1), ("seq2", seq2)] {
        if let Some(i) = seq.iter().position(|f| f.len() != cfg.num_coefficients) {
            warn!(
                seq = name,
                index = i,
                len = seq[i].len(),
                expected = cfg.num_coefficients,
                "invalid MFCC frame length"
            );
            return 0.0;
        }
    }

    let a = trim_silence(seq1, cfg.c0_silence_threshold);
    let b = trim_silence(seq2, cfg.c0_silence_threshold);
    if a.is_empty() || b.is_empty() {
        debug!(trimmed1 = a.len(), trimmed2 = b.len(), "nothing left after trimming");
        return 0.0;
    }

    // Classic DTW table with infinite boundaries: the optimal path must
    // start at (0, 0), not align freely to an arbitrary prefix.
    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let mut dp = vec![vec![f32::INFINITY; cols]; rows];
    dp[0][0] = 0.0;

    for i in 1..rows {
        for j in 1..cols {
            let cost = 1.0 - cosine_similarity(&a[i - 1], &b[j - 1]);
            let best = dp[i - 1][j].min(dp[i][j - 1]).min(dp[i - 1][j - 1]);
            dp[i][j] = cost + best;
        }
    }

    let total_cost = dp[rows - 1][cols - 1];
    let denom = (a.len() + b.len()) as f32;
    let similarity = if denom > 1e-6 {
        1.0 - total_cost / denom
    } else if total_cost < 1e-6 {
        1.0
    } else {
        0.0
    };
    let similarity = similarity.clamp(0.0, 1.0);

    debug!(
        cost = total_cost,
        denom,
        similarity,
        trimmed1 = a.len(),
        trimmed2 = b.len(),
        "DTW score"
    );
    similarity
}
