//! In-place frame conditioning: pre-emphasis and Hamming windowing.

use std::f64::consts::PI;

/// Applies a first-order pre-emphasis filter in place: `s[i] -= coeff * s[i-1]`.
///
/// Iterates from the last sample backward so every sample is filtered
/// against the *original* value of its predecessor; forward iteration would
/// filter against already-filtered neighbors and change the transfer
/// function. No-op for frames shorter than 2 samples.
pub fn pre_emphasis(frame: &mut [f32], coeff: f32) {
    if frame.len() < 2 {
        return;
    }
    for i in (1..frame.len()).rev() {
        frame[i] -= coeff * frame[i - 1];
    }
}

/// Applies a Hamming window in place: `s[i] *= 0.54 - 0.46*cos(2πi/(n-1))`.
/// No-op for frames shorter than 2 samples.
pub fn hamming_window(frame: &mut [f32]) {
    let n = frame.len();
    if n < 2 {
        return;
    }
    let denom = (n - 1) as f64;
    for (i, s) in frame.iter_mut().enumerate() {
        *s *= (0.54 - 0.46 * (2.0 * PI * i as f64 / denom).cos()) as f32;
    }
}
