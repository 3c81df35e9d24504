use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configures the extraction and matching pipeline.
///
/// The default configuration is the production tuning for 48 kHz mono
/// recitation audio: 40 mel filters, 13 cepstral coefficients, Hamming
/// window, pre-emphasis 0.95. The VAD and silence thresholds are empirical
/// and deliberately exposed so hosts can retune them per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input sample rate in Hz (default: 48000).
    pub sample_rate: usize,
    /// Expected frame length in samples; the extractor pre-builds its
    /// filterbank for this length (default: 1024).
    pub frame_size: usize,
    /// Number of triangular mel filters (default: 40).
    pub num_filters: usize,
    /// Number of cepstral coefficients per frame (default: 13).
    pub num_coefficients: usize,
    /// Pre-emphasis coefficient (default: 0.95).
    pub pre_emphasis: f32,
    /// VAD short-term energy threshold; frames below it are rejected
    /// before any spectral work (default: 0.01).
    pub energy_threshold: f32,
    /// VAD zero-crossing-rate threshold (default: 0.1).
    pub zcr_threshold: f32,
    /// C0 silence threshold for the post-hoc gate and sequence trimming
    /// (default: -40.0).
    pub c0_silence_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            frame_size: 1024,
            num_filters: 40,
            num_coefficients: 13,
            pre_emphasis: 0.95,
            energy_threshold: 0.01,
            zcr_threshold: 0.1,
            c0_silence_threshold: -40.0,
        }
    }
}

impl Config {
    /// Checks that the configuration describes a usable pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if self.frame_size == 0 {
            return Err(ConfigError::ZeroFrameSize);
        }
        if self.num_filters == 0 {
            return Err(ConfigError::NoFilters);
        }
        if self.num_coefficients == 0 || self.num_coefficients > self.num_filters {
            return Err(ConfigError::BadCoefficientCount {
                coefficients: self.num_coefficients,
                filters: self.num_filters,
            });
        }
        Ok(())
    }
}
