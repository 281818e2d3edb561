use indicatif::ProgressBar;
use rayon::prelude::*;

use super::framer::Framer;
use super::matrix::SpectrogramMatrix;
use super::scaler::{GlobalMax, MagnitudeScaler, DEFAULT_EPSILON};
use super::transform::SpectralTransform;
use super::window::HannWindow;
use crate::error::{Result, SpectrogramError};

pub const DEFAULT_WINDOW_SIZE: usize = 1024;
pub const DEFAULT_HOP_SIZE: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisParams {
    pub window_size: usize,
    pub hop_size: usize,
    pub epsilon: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            hop_size: DEFAULT_HOP_SIZE,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl AnalysisParams {
    pub fn validate(&self) -> Result<()> {
        if self.window_size < 2 || !self.window_size.is_power_of_two() {
            return Err(SpectrogramError::InvalidParameters(format!(
                "window size must be a power of two >= 2, got {}",
                self.window_size
            )));
        }
        if self.hop_size == 0 || self.hop_size > self.window_size {
            return Err(SpectrogramError::InvalidParameters(format!(
                "hop size must be in 1..={}, got {}",
                self.window_size, self.hop_size
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SpectrogramError::InvalidParameters(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Window, transform and scale applied to every frame. Immutable and shared by
/// all workers.
pub struct FrameAnalyzer {
    window: HannWindow,
    transform: SpectralTransform,
    scaler: MagnitudeScaler,
}

impl FrameAnalyzer {
    pub fn new(params: &AnalysisParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            window: HannWindow::new(params.window_size),
            transform: SpectralTransform::new(params.window_size),
            scaler: MagnitudeScaler::new(params.epsilon),
        })
    }

    pub fn num_bins(&self) -> usize {
        self.transform.num_bins()
    }

    pub fn analyze_frame(&self, frame: &[f64]) -> (Vec<f64>, GlobalMax) {
        let windowed = self.window.applied(frame);
        let bins = self.transform.process(&windowed);
        self.scaler.scale_frame(&bins)
    }
}

/// Phase 1: analyze every frame on the rayon pool.
///
/// The indexed parallel iterator collects in frame order, so row `i` is always
/// frame `i` whichever worker finished first.
pub fn transform_frames(
    framer: &Framer<'_>,
    analyzer: &FrameAnalyzer,
    progress: &ProgressBar,
) -> Vec<(Vec<f64>, GlobalMax)> {
    framer
        .par_iter()
        .map(|frame| {
            let result = analyzer.analyze_frame(frame);
            progress.inc(1);
            result
        })
        .collect()
}

/// Phase 2: reduce per-row maxima into the global maximum once every row exists.
pub fn reduce_global_max(
    rows: Vec<(Vec<f64>, GlobalMax)>,
    num_bins: usize,
) -> (SpectrogramMatrix, GlobalMax) {
    let global_max = rows
        .par_iter()
        .map(|(_, row_max)| *row_max)
        .reduce(GlobalMax::new, GlobalMax::merge);
    let rows = rows.into_iter().map(|(row, _)| row).collect();
    (SpectrogramMatrix::from_rows(rows, num_bins), global_max)
}

/// Single-threaded Phase 1, used when the pool is restricted to one worker.
/// Produces the same rows as [`transform_frames`].
pub fn transform_frames_sequential(
    framer: &Framer<'_>,
    analyzer: &FrameAnalyzer,
    progress: &ProgressBar,
) -> Vec<(Vec<f64>, GlobalMax)> {
    framer
        .iter()
        .map(|frame| {
            let result = analyzer.analyze_frame(frame);
            progress.inc(1);
            result
        })
        .collect()
}
