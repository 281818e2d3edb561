/// Precomputed Hann taper, `w[k] = 0.5 * (1 - cos(2πk / (W - 1)))`.
#[derive(Clone, Debug)]
pub struct HannWindow {
    coeffs: Vec<f64>,
}

impl HannWindow {
    pub fn new(size: usize) -> Self {
        Self {
            coeffs: hann_window(size),
        }
    }

    /// Taper `frame` in place. `frame` must be a private copy of the samples.
    pub fn apply(&self, frame: &mut [f64]) {
        debug_assert_eq!(frame.len(), self.coeffs.len());
        for (s, w) in frame.iter_mut().zip(&self.coeffs) {
            *s *= w;
        }
    }

    /// Copy `frame` out of the stream and taper the copy.
    pub fn applied(&self, frame: &[f64]) -> Vec<f64> {
        let mut out = frame.to_vec();
        self.apply(&mut out);
        out
    }
}

/// A single-sample window has no span to taper over (`W - 1 == 0`), so it is
/// the identity `[1.0]`.
pub fn hann_window(size: usize) -> Vec<f64> {
    if size <= 1 {
        return vec![1.0; size];
    }
    let denom = (size - 1) as f64;
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / denom).cos()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_zero() {
        for size in [2, 3, 16, 1024] {
            let w = hann_window(size);
            assert_eq!(w.len(), size);
            assert!(w[0].abs() < 1e-12);
            assert!(w[size - 1].abs() < 1e-12, "size {} last = {}", size, w[size - 1]);
        }
    }

    #[test]
    fn symmetric_with_unit_peak() {
        let w = hann_window(1025);
        assert!((w[512] - 1.0).abs() < 1e-12);
        for k in 0..1025 {
            assert!((w[k] - w[1024 - k]).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_sizes_do_not_divide_by_zero() {
        assert_eq!(hann_window(1), vec![1.0]);
        assert!(hann_window(0).is_empty());
    }

    #[test]
    fn apply_tapers_copy_only() {
        let window = HannWindow::new(8);
        let original = vec![1.0; 8];
        let tapered = window.applied(&original);

        assert_eq!(original, vec![1.0; 8]);
        assert_eq!(tapered, hann_window(8));
    }
}
