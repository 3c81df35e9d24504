//! Recitation matching via MFCC fingerprints and dynamic time warping.
//!
//! # Architecture
//!
//! The pipeline scores how closely a candidate recitation matches a
//! reference recording, in three stages:
//!
//! 1. [`MfccExtractor::extract`]: mono f32 frame -> 13 cepstral coefficients
//!    (or `None` when the voice-activity gates reject the frame)
//! 2. [`trim_silence`]: drops silent frames from both ends of a sequence
//!    using C0, the log-energy proxy
//! 3. [`similarity`]: dynamic-time-warping alignment of two trimmed
//!    sequences with a cosine-distance frame cost -> score in [0, 1]
//!
//! # Per-Frame Extraction
//!
//! Each frame passes energy and zero-crossing-rate gates before any
//! spectral work, then pre-emphasis, a Hamming window, a radix-2 FFT power
//! spectrum, a 40-band triangular mel filterbank with log compression, and
//! a DCT-II down to 13 coefficients. A final gate rejects frames whose C0
//! falls at or below the silence threshold.
//!
//! # Degraded Results, Not Errors
//!
//! Runtime degeneracies (silence, empty sequences, wrong-length frames,
//! zero-norm vectors) all degrade to sentinel results — `None` from
//! extraction, 0.0 from matching — rather than panicking or propagating
//! errors. Only [`Config`] validation at construction returns `Err`.
//! Diagnostics go through `tracing` and are advisory only.
//!
//! All thresholds and sizes live in [`Config`]; the defaults are the
//! production tuning for 48 kHz recitation audio.

mod config;
mod dtw;
mod error;
mod fft;
mod frame;
mod mel;
mod mfcc;
mod vad;

pub use config::Config;
pub use dtw::{cosine_similarity, similarity, trim_silence};
pub use error::ConfigError;
pub use fft::{fft, power_spectrum};
pub use frame::{hamming_window, pre_emphasis};
pub use mel::{hz_to_mel, mel_to_hz, Filterbank};
pub use mfcc::{dct, MfccExtractor};
pub use vad::{energy, zero_crossing_rate};
