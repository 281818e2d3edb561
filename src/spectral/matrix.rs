use super::scaler::GlobalMax;

/// Log-power spectrogram, one row per frame and `num_bins` columns per row.
///
/// Rows are written once during analysis and only read afterwards.
#[derive(Clone, Debug, Default)]
pub struct SpectrogramMatrix {
    rows: Vec<Vec<f64>>,
    num_bins: usize,
}

impl SpectrogramMatrix {
    /// Build from rows that must all be `num_bins` long.
    pub fn from_rows(rows: Vec<Vec<f64>>, num_bins: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == num_bins));
        Self { rows, num_bins }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn num_frames(&self) -> usize {
        self.rows.len()
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Full scan for the largest cell. Analysis reduces this during the
    /// transform pass; this is the reference it must agree with.
    #[cfg(test)]
    pub fn scan_max(&self) -> GlobalMax {
        let mut max = GlobalMax::new();
        for v in self.rows.iter().flatten() {
            max.observe(*v);
        }
        max
    }
}

/// Analysis output: the matrix plus the maximum over all of its cells.
#[derive(Clone, Debug)]
pub struct Spectrogram {
    pub matrix: SpectrogramMatrix,
    pub global_max: GlobalMax,
    pub sample_rate: u32,
    pub hop_size: usize,
}

impl Spectrogram {
    /// Seconds between consecutive rows.
    pub fn frame_period(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.hop_size as f64 / self.sample_rate as f64
    }

    /// Width in Hz of one frequency bin.
    pub fn bin_resolution(&self) -> f64 {
        let window = self.matrix.num_bins() * 2;
        if window == 0 {
            return 0.0;
        }
        self.sample_rate as f64 / window as f64
    }
}
