use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::PathBuf;

use crate::audio::decode::{self, AudioData};
use crate::error::Result;
use crate::render::color::{ColorMapper, Palette};
use crate::render::{json, png};
use crate::spectral::analysis::{self, AnalysisParams, FrameAnalyzer};
use crate::spectral::framer::Framer;
use crate::spectral::matrix::Spectrogram;

/// Pipeline stages. Transitions only move forward, or to `Failed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Loading,
    Framing,
    Transforming,
    Normalizing,
    Rendering,
    Done,
    Failed,
}

impl Stage {
    fn next(self) -> Self {
        match self {
            Stage::Loading => Stage::Framing,
            Stage::Framing => Stage::Transforming,
            Stage::Transforming => Stage::Normalizing,
            Stage::Normalizing => Stage::Rendering,
            Stage::Rendering => Stage::Done,
            Stage::Done => Stage::Done,
            Stage::Failed => Stage::Failed,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Loading => "loading",
            Stage::Framing => "framing",
            Stage::Transforming => "transforming",
            Stage::Normalizing => "normalizing",
            Stage::Rendering => "rendering",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub struct PipelineOptions {
    pub input: PathBuf,
    pub image_out: PathBuf,
    pub json_out: PathBuf,
    pub params: AnalysisParams,
    pub palette: Palette,
    pub sequential: bool,
    pub show_progress: bool,
}

pub struct Pipeline {
    options: PipelineOptions,
    stage: Stage,
    visited: Vec<Stage>,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            stage: Stage::Loading,
            visited: vec![Stage::Loading],
        }
    }

    #[cfg(test)]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[cfg(test)]
    pub fn visited(&self) -> &[Stage] {
        &self.visited
    }

    fn advance(&mut self) {
        let next = self.stage.next();
        log::info!("Stage {} -> {}", self.stage, next);
        self.stage = next;
        self.visited.push(next);
    }

    /// Run every stage to completion. On error the pipeline is left in `Failed`.
    pub fn run(&mut self) -> Result<Spectrogram> {
        match self.run_stages() {
            Ok(spec) => Ok(spec),
            Err(e) => {
                log::error!("Stage {} failed: {}", self.stage, e);
                self.stage = Stage::Failed;
                self.visited.push(Stage::Failed);
                Err(e)
            }
        }
    }

    fn run_stages(&mut self) -> Result<Spectrogram> {
        log::info!("Loading {}...", self.options.input.display());
        let audio = decode::decode_audio(&self.options.input)?;
        self.advance();

        let spec = self.analyze(&audio)?;

        log::info!("Rendering...");
        let mapper = ColorMapper::new(spec.global_max.value(), self.options.palette);
        json::write_json(&spec.matrix, &self.options.json_out)?;
        log::info!("JSON data saved to {}", self.options.json_out.display());
        let img = png::render_image(&spec.matrix, &mapper);
        png::write_png(&img, &self.options.image_out)?;
        log::info!("Spectrogram saved to {}", self.options.image_out.display());
        self.advance();

        let path: Vec<String> = self.visited.iter().map(Stage::to_string).collect();
        log::debug!("Pipeline path: {}", path.join(" -> "));
        Ok(spec)
    }

    /// Framing, Transforming and Normalizing over an already-loaded stream.
    ///
    /// Must be entered from `Framing`; leaves the pipeline in `Rendering`.
    fn analyze(&mut self, audio: &AudioData) -> Result<Spectrogram> {
        debug_assert_eq!(self.stage, Stage::Framing);
        let params = self.options.params;

        let analyzer = FrameAnalyzer::new(&params)?;
        let framer = Framer::new(&audio.samples, params.window_size, params.hop_size);
        log::info!(
            "Framing: {} frames of {} samples, hop {}",
            framer.len(),
            params.window_size,
            params.hop_size
        );
        if framer.is_empty() {
            log::warn!(
                "Input has {} samples, fewer than one window; the spectrogram will be empty",
                audio.samples.len()
            );
        }
        self.advance();

        let progress = self.progress_bar(framer.len() as u64);
        let rows = if self.options.sequential {
            analysis::transform_frames_sequential(&framer, &analyzer, &progress)
        } else {
            analysis::transform_frames(&framer, &analyzer, &progress)
        };
        progress.finish_and_clear();
        self.advance();

        let (matrix, global_max) = analysis::reduce_global_max(rows, analyzer.num_bins());
        log::info!("Global max: {:.2} dB", global_max.value());
        self.advance();

        Ok(Spectrogram {
            matrix,
            global_max,
            sample_rate: audio.sample_rate,
            hop_size: params.hop_size,
        })
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta} remaining)")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    }
}
