//! Mel-scale conversions and triangular filterbank construction.

/// Converts frequency in Hz to mel scale.
pub fn hz_to_mel(hz: f64) -> f64 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Converts mel scale frequency back to Hz.
pub fn mel_to_hz(mel: f64) -> f64 {
    700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0)
}

/// A set of overlapping triangular mel filters sized for one
/// (filter count, FFT size, sample rate) triple.
///
/// Filters span 0 Hz to Nyquist at equal mel spacing. Each filter is a
/// weight vector of power-spectrum length (`fft_size/2 + 1`), ramping from
/// 0 at its start bin to 1 at its center and back to 0 at its end bin.
/// Never mutated after construction, so a cached instance is safe to share
/// across threads for read-only use.
#[derive(Debug, Clone)]
pub struct Filterbank {
    fft_size: usize,
    filters: Vec<Vec<f64>>,
}

impl Filterbank {
    /// Builds `num_filters` triangular filters for the given FFT size and
    /// sample rate.
    pub fn new(num_filters: usize, fft_size: usize, sample_rate: usize) -> Self {
        let half = fft_size / 2 + 1;
        let high_mel = hz_to_mel(sample_rate as f64 / 2.0);

        // num_filters + 2 equally spaced mel points, mapped back to Hz and
        // then to FFT bin indices.
        let bins: Vec<i64> = (0..num_filters + 2)
            .map(|i| {
                let mel = high_mel * i as f64 / (num_filters + 1) as f64;
                let hz = mel_to_hz(mel);
                ((fft_size as f64 + 1.0) * hz / sample_rate as f64).floor() as i64
            })
            .collect();

        let mut filters = Vec::with_capacity(num_filters);
        for m in 1..=num_filters {
            // Clamp boundaries monotonic non-decreasing so spectrum-edge
            // triangles cannot invert.
            let start = bins[m - 1].max(0);
            let center = bins[m].max(start);
            let end = bins[m + 1].max(center);

            let mut weights = vec![0.0f64; half];
            let mut k = start;
            while k < center && (k as usize) < half {
                // The epsilon keeps zero-width segments finite (immediate cutoff).
                weights[k as usize] = (k - start) as f64 / ((center - start) as f64 + 1e-12);
                k += 1;
            }
            let mut k = center;
            while k < end && (k as usize) < half {
                weights[k as usize] = (end - k) as f64 / ((end - center) as f64 + 1e-12);
                k += 1;
            }
            filters.push(weights);
        }

        Self { fft_size, filters }
    }

    /// The FFT size this bank was sized for.
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of filters in the bank.
    pub fn num_filters(&self) -> usize {
        self.filters.len()
    }

    /// The filter weight vectors, `[num_filters][fft_size/2 + 1]`.
    pub fn filters(&self) -> &[Vec<f64>] {
        &self.filters
    }

    /// Applies the bank to a power spectrum and log-compresses the band
    /// energies. Inner products run over the overlapping index range if the
    /// spectrum length differs from the bank's; non-positive energies are
    /// floored to `ln(1e-10)` rather than producing -inf.
    pub fn apply(&self, power: &[f64]) -> Vec<f64> {
        self.filters
            .iter()
            .map(|filt| {
                let lim = power.len().min(filt.len());
                let acc: f64 = power[..lim]
                    .iter()
                    .zip(&filt[..lim])
                    .map(|(p, w)| p * w)
                    .sum();
                if acc > 0.0 { acc.ln() } else { 1e-10f64.ln() }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hz_mel_roundtrip() {
        for &hz in &[0.0, 100.0, 440.0, 1000.0, 8000.0, 24000.0] {
            let mel = hz_to_mel(hz);
            let back = mel_to_hz(mel);
            assert!((hz - back).abs() < 1e-6, "roundtrip failed for {hz}: got {back}");
        }
    }

    #[test]
    fn filterbank_shape() {
        let bank = Filterbank::new(40, 1024, 48000);
        assert_eq!(bank.num_filters(), 40);
        assert_eq!(bank.fft_size(), 1024);
        for filt in bank.filters() {
            assert_eq!(filt.len(), 513);
            for &w in filt {
                assert!((0.0..=1.0).contains(&w), "weight out of range: {w}");
            }
        }
    }

    #[test]
    fn filterbank_starts_monotonic() {
        let bank = Filterbank::new(40, 1024, 48000);
        let first_nonzero = |filt: &Vec<f64>| filt.iter().position(|&w| w > 0.0);

        let mut prev = 0usize;
        for filt in bank.filters() {
            if let Some(start) = first_nonzero(filt) {
                assert!(start >= prev, "filter start {start} below previous {prev}");
                prev = start;
            }
        }
    }

    #[test]
    fn apply_floors_silence() {
        let bank = Filterbank::new(40, 1024, 48000);
        let power = vec![0.0f64; 513];
        let energies = bank.apply(&power);
        assert_eq!(energies.len(), 40);
        for &e in &energies {
            assert!((e - 1e-10f64.ln()).abs() < 1e-12);
        }
    }

    #[test]
    fn apply_handles_shorter_spectrum() {
        // Bank sized for 1024-point FFT fed a 512-point spectrum: inner
        // products run over the overlap only, no panic.
        let bank = Filterbank::new(40, 1024, 48000);
        let power = vec![1.0f64; 257];
        let energies = bank.apply(&power);
        assert_eq!(energies.len(), 40);
        for &e in &energies {
            assert!(e.is_finite());
        }
    }

    #[test]
    fn apply_responds_to_band_energy() {
        let bank = Filterbank::new(40, 1024, 48000);
        let mut power = vec![0.0f64; 513];
        // Energy in a low bin should raise a low filter above the floor.
        power[3] = 100.0;
        let energies = bank.apply(&power);
        let floor = 1e-10f64.ln();
        assert!(
            energies.iter().any(|&e| e > floor + 1.0),
            "no filter responded to band energy"
        );
    }
}
