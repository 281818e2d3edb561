use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Forward DFT of a real frame, keeping bins `0 .. W/2`.
///
/// The plan is built once and shared across rayon workers; `Arc<dyn Fft>` is
/// `Send + Sync`.
#[derive(Clone)]
pub struct SpectralTransform {
    fft: Arc<dyn Fft<f64>>,
    size: usize,
}

impl SpectralTransform {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Number of retained bins, `W / 2`. Nyquist and negative frequencies are dropped.
    pub fn num_bins(&self) -> usize {
        self.size / 2
    }

    pub fn process(&self, frame: &[f64]) -> Vec<Complex<f64>> {
        debug_assert_eq!(frame.len(), self.size);
        let mut buffer: Vec<Complex<f64>> =
            frame.iter().map(|&s| Complex::new(s, 0.0)).collect();
        self.fft.process(&mut buffer);
        buffer.truncate(self.num_bins());
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_half_the_bins() {
        let t = SpectralTransform::new(1024);
        let out = t.process(&vec![0.0; 1024]);
        assert_eq!(out.len(), 512);
        assert!(out.iter().all(|c| c.re == 0.0 && c.im == 0.0));
    }

    #[test]
    fn dc_signal_lands_in_bin_zero() {
        let t = SpectralTransform::new(64);
        let out = t.process(&vec![1.0; 64]);
        assert!((out[0].re - 64.0).abs() < 1e-9);
        for c in &out[1..] {
            assert!(c.norm() < 1e-9);
        }
    }

    #[test]
    fn matches_naive_dft() {
        let n = 16;
        let frame: Vec<f64> = (0..n).map(|i| ((i * 7 % 5) as f64) - 2.0).collect();
        let out = SpectralTransform::new(n).process(&frame);

        for (k, bin) in out.iter().enumerate() {
            let mut expected = Complex::new(0.0, 0.0);
            for (j, &x) in frame.iter().enumerate() {
                let angle = -2.0 * std::f64::consts::PI * (k * j) as f64 / n as f64;
                expected += Complex::new(x * angle.cos(), x * angle.sin());
            }
            assert!((*bin - expected).norm() < 1e-9, "bin {}", k);
        }
    }

    #[test]
    fn cosine_peaks_at_its_bin() {
        let n = 256;
        let frame: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 10.0 * i as f64 / n as f64).cos())
            .collect();
        let out = SpectralTransform::new(n).process(&frame);
        let peak = out
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 10);
    }
}
