use rustfft::num_complex::Complex;

/// Power floor added before the logarithm so silent bins stay finite.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Converts complex bins to `10 * log10(re² + im² + ε)`.
#[derive(Clone, Copy, Debug)]
pub struct MagnitudeScaler {
    epsilon: f64,
}

impl Default for MagnitudeScaler {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl MagnitudeScaler {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    #[inline]
    pub fn power_db(&self, bin: Complex<f64>) -> f64 {
        let power = bin.re * bin.re + bin.im * bin.im;
        10.0 * (power + self.epsilon).log10()
    }

    /// Scale one frame's bins, returning the row and its local maximum.
    pub fn scale_frame(&self, bins: &[Complex<f64>]) -> (Vec<f64>, GlobalMax) {
        let mut row_max = GlobalMax::new();
        let row = bins
            .iter()
            .map(|&bin| {
                let v = self.power_db(bin);
                row_max.observe(v);
                v
            })
            .collect();
        (row, row_max)
    }
}

/// Running maximum across every cell of the matrix.
///
/// Merging is associative and commutative, so per-row maxima can be reduced in
/// any order once all rows exist.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalMax(f64);

impl Default for GlobalMax {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalMax {
    pub fn new() -> Self {
        Self(f64::NEG_INFINITY)
    }

    #[inline]
    pub fn observe(&mut self, value: f64) {
        if value > self.0 {
            self.0 = value;
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }

    /// `-inf` until at least one cell has been observed.
    pub fn value(self) -> f64 {
        self.0
    }
}
