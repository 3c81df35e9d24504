//! In-place radix-2 Cooley-Tukey FFT and one-sided power spectrum.

use std::f64::consts::PI;

/// Performs an in-place forward radix-2 Cooley-Tukey FFT.
/// `real` and `imag` must have the same power-of-2 length.
pub fn fft(real: &mut [f64], imag: &mut [f64]) {
    let n = real.len();
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 0..n - 1 {
        if i < j {
            real.swap(i, j);
            imag.swap(i, j);
        }
        let mut k = n >> 1;
        while k <= j {
            j -= k;
            k >>= 1;
        }
        j += k;
    }

    // Cooley-Tukey butterfly
    let mut size = 2;
    while size <= n {
        let half = size >> 1;
        let angle = -2.0 * PI / size as f64;
        let w_r = angle.cos();
        let w_i = angle.sin();

        let mut start = 0;
        while start < n {
            let (mut t_r, mut t_i) = (1.0, 0.0);
            for k in 0..half {
                let u = start + k;
                let v = u + half;

                let tmp_r = t_r * real[v] - t_i * imag[v];
                let tmp_i = t_r * imag[v] + t_i * real[v];

                real[v] = real[u] - tmp_r;
                imag[v] = imag[u] - tmp_i;
                real[u] += tmp_r;
                imag[u] += tmp_i;

                let new_t_r = t_r * w_r - t_i * w_i;
                let new_t_i = t_r * w_i + t_i * w_r;
                t_r = new_t_r;
                t_i = new_t_i;
            }
            start += size;
        }
        size <<= 1;
    }
}

/// Returns the smallest power of two >= `n` (1 for n <= 1).
pub(crate) fn next_pow2(n: usize) -> usize {
    let mut p = 1;
    while p < n {
        p <<= 1;
    }
    p
}

/// Computes the one-sided power spectrum of a real-valued frame.
///
/// The frame is zero-padded to `N = next_pow2(len)` and transformed; the
/// result has `N/2 + 1` bins with `power[k] = |X[k]|^2 / N`. Samples are
/// widened to f64 before the transform to keep round-off under control.
pub fn power_spectrum(frame: &[f32]) -> Vec<f64> {
    let n = frame.len();
    let fft_size = next_pow2(n);

    let mut real = vec![0.0f64; fft_size];
    let mut imag = vec![0.0f64; fft_size];
    for (i, &s) in frame.iter().enumerate() {
        real[i] = s as f64;
    }

    fft(&mut real, &mut imag);

    let half = fft_size / 2;
    let mut power = vec![0.0f64; half + 1];
    for k in 0..=half {
        power[k] = (real[k] * real[k] + imag[k] * imag[k]) / fft_size as f64;
    }
    power
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fft_impulse() {
        // FFT of unit impulse should be all 1s
        let mut real = vec![0.0; 8];
        let mut imag = vec![0.0; 8];
        real[0] = 1.0;

        fft(&mut real, &mut imag);

        for &v in &real {
            assert!((v - 1.0).abs() < 1e-10);
        }
        for &v in &imag {
            assert!(v.abs() < 1e-10);
        }
    }

    #[test]
    fn fft_parseval() {
        // sum |x[n]|^2 * N == sum |X[k]|^2
        let n = 16;
        let mut real: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * i as f64 / n as f64).sin())
            .collect();
        let mut imag = vec![0.0; n];

        let time_energy: f64 = real.iter().map(|r| r * r).sum();
        fft(&mut real, &mut imag);
        let freq_energy: f64 = real
            .iter()
            .zip(imag.iter())
            .map(|(r, im)| r * r + im * im)
            .sum();

        assert!(
            (time_energy * n as f64 - freq_energy).abs() < 1e-8,
            "Parseval violated: {} vs {}",
            time_energy * n as f64,
            freq_energy
        );
    }

    #[test]
    fn next_pow2_values() {
        assert_eq!(next_pow2(0), 1);
        assert_eq!(next_pow2(1), 1);
        assert_eq!(next_pow2(2), 2);
        assert_eq!(next_pow2(3), 4);
        assert_eq!(next_pow2(1000), 1024);
        assert_eq!(next_pow2(1024), 1024);
    }

    #[test]
    fn power_spectrum_shape() {
        // 1000 samples pad to 1024 -> 513 bins
        let frame = vec![0.5f32; 1000];
        let power = power_spectrum(&frame);
        assert_eq!(power.len(), 513);
        for &p in &power {
            assert!(p >= 0.0);
        }
    }

    #[test]
    fn power_spectrum_tolerates_tiny_frames() {
        assert_eq!(power_spectrum(&[1.0]).len(), 1);
        assert_eq!(power_spectrum(&[1.0, -1.0]).len(), 2);
    }

    #[test]
    fn power_spectrum_sine_peak() {
        // Bin 4 of a 64-point transform holds a sine of 4 cycles per frame.
        let n = 64;
        let frame: Vec<f32> = (0..n)
            .map(|i| (2.0 * PI * 4.0 * i as f64 / n as f64).sin() as f32)
            .collect();
        let power = power_spectrum(&frame);

        let peak = power
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 4);
    }
}
