//! Voice activity gates on raw (pre-conditioning) frames.
//!
//! Two cheap time-domain measures decide whether a frame is worth the
//! spectral work: short-term energy and zero-crossing rate. A third gate on
//! the extracted C0 coefficient lives in the extractor itself, since it
//! needs the cepstral result.

/// Returns the short-term energy of a frame: mean of squared samples.
/// Returns 0.0 for an empty frame.
pub fn energy(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum: f64 = frame.iter().map(|&s| s as f64 * s as f64).sum();
    (sum / frame.len() as f64) as f32
}

/// Returns the zero-crossing rate of a frame: the fraction of adjacent
/// sample pairs that change sign. Returns 0.0 for frames shorter than 2.
pub fn zero_crossing_rate(frame: &[f32]) -> f32 {
    if frame.len() < 2 {
        return 0.0;
    }
    let mut crossings = 0usize;
    for w in frame.windows(2) {
        if (w[1] >= 0.0 && w[0] < 0.0) || (w[1] < 0.0 && w[0] >= 0.0) {
            crossings += 1;
        }
    }
    crossings as f32 / frame.len() as f32
}
