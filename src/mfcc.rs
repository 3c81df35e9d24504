//! Cepstral coefficient extraction: the full frame-to-MFCC pipeline.

use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ConfigError;
use crate::fft::{next_pow2, power_spectrum};
use crate::frame::{hamming_window, pre_emphasis};
use crate::mel::Filterbank;
use crate::vad::{energy, zero_crossing_rate};

/// Computes the first `num_coefficients` cepstral coefficients from log mel
/// energies with the DCT-II kernel `cos(pi*k*(m+0.5)/M)`.
///
/// Coefficient 0 is the sum of the log energies and acts as a log-energy
/// proxy for silence gating. Returns all zeros for an empty input.
pub fn dct(log_energies: &[f64], num_coefficients: usize) -> Vec<f32> {
    let m_total = log_energies.len();
    let mut coeffs = vec![0.0f32; num_coefficients];
    if m_total == 0 {
        return coeffs;
    }
    for (k, c) in coeffs.iter_mut().enumerate() {
        let sum: f64 = log_energies
            .iter()
            .enumerate()
            .map(|(m, &e)| e * (PI * k as f64 * (m as f64 + 0.5) / m_total as f64).cos())
            .sum();
        *c = sum as f32;
    }
    coeffs
}

/// Extracts MFCC frames from raw audio frames.
///
/// One [`MfccExtractor::extract`] call runs the whole per-frame pipeline:
///
/// 1. VAD gates on the raw frame (energy, zero-crossing rate)
/// 2. in-place pre-emphasis and Hamming window
/// 3. FFT power spectrum
/// 4. mel filterbank + log compression
/// 5. DCT-II to `num_coefficients` cepstral coefficients
/// 6. post-hoc C0 silence gate
///
/// The filterbank for `next_pow2(frame_size)` is built once at construction
/// and never mutated, so `extract` takes `&self` and concurrent calls on
/// independent frame buffers are safe. Frames implying a different FFT size
/// get a bank built for that call.
pub struct MfccExtractor {
    cfg: Config,
    filterbank: Filterbank,
}

impl MfccExtractor {
    /// Validates the config and pre-builds the filterbank for the expected
    /// frame size.
    pub fn new(cfg: Config) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let fft_size = next_pow2(cfg.frame_size);
        let filterbank = Filterbank::new(cfg.num_filters, fft_size, cfg.sample_rate);
        Ok(Self { cfg, filterbank })
    }

    /// The configuration this extractor was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Extracts one MFCC frame from a raw mono frame.
    ///
    /// Returns `None` for an empty frame, a frame rejected by the VAD
    /// gates, a degenerate spectrum, or a frame whose C0 falls at or below
    /// the silence threshold. A `Some` result always holds exactly
    /// `num_coefficients` values.
    pub fn extract(&self, frame: &[f32]) -> Option<Vec<f32>> {
        if frame.is_empty() {
            warn!("empty audio frame");
            return None;
        }

        // Time-domain gates first, before any spectral work.
        let energy = energy(frame);
        let zcr = zero_crossing_rate(frame);
        if energy < self.cfg.energy_threshold || zcr < self.cfg.zcr_threshold {
            debug!(energy, zcr, "frame rejected by VAD gate");
            return None;
        }

        let mut frame = frame.to_vec();
        pre_emphasis(&mut frame, self.cfg.pre_emphasis);
        hamming_window(&mut frame);

        let power = power_spectrum(&frame);
        if power.is_empty() {
            warn!("empty power spectrum");
            return None;
        }

        // Recover the transform size the spectrum came from; reuse the
        // cached bank when it matches.
        let fft_size = (power.len() * 2 - 2).max(2);
        let log_energies = if fft_size == self.filterbank.fft_size() {
            self.filterbank.apply(&power)
        } else {
            Filterbank::new(self.cfg.num_filters, fft_size, self.cfg.sample_rate).apply(&power)
        };

        let mfcc = dct(&log_energies, self.cfg.num_coefficients);

        // Post-hoc silence gate: C0 tracks perceptual loudness more
        // directly than the time-domain energy proxy.
        let c0 = mfcc[0];
        if c0 <= self.cfg.c0_silence_threshold {
            debug!(c0, energy, zcr, "frame rejected by C0 silence gate");
            return None;
        }

        debug!(c0, energy, zcr, "extracted MFCC frame");
        Some(mfcc)
    }

    /// Windows a longer clip into `frame_size` frames at the given hop and
    /// extracts each one, skipping rejected frames.
    ///
    /// Returns an empty sequence when `hop` is 0 or the clip is shorter
    /// than one frame.
    pub fn extract_sequence(&self, samples: &[f32], hop: usize) -> Vec<Vec<f32>> {
        if hop == 0 || samples.len() < self.cfg.frame_size {
            return Vec::new();
        }
        let mut sequence = Vec::new();
        let mut start = 0;
        while start + self.cfg.frame_size <= samples.len() {
            if let Some(mfcc) = self.extract(&samples[start..start + self.cfg.frame_size]) {
                sequence.push(mfcc);
            }
            start += hop;
        }
        sequence
    }
}
