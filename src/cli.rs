use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::SpectrogramError;
use crate::render::color::Palette;
use crate::spectral::analysis::{AnalysisParams, DEFAULT_HOP_SIZE, DEFAULT_WINDOW_SIZE};
use crate::spectral::scaler::DEFAULT_EPSILON;

const DEFAULT_IMAGE: &str = "spectrogram.png";
const DEFAULT_JSON: &str = "data/spectrogram.json";

#[derive(Parser, Debug)]
#[command(name = "specgram", about = "Render an audio file as a log-power spectrogram (PNG + JSON)")]
pub struct Cli {
    /// Input audio file (WAV or MP3)
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output PNG image
    #[arg(long, value_name = "PATH", default_value = DEFAULT_IMAGE)]
    pub out: PathBuf,

    /// Output JSON matrix (rows = frames, columns = frequency bins)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_JSON)]
    pub json: PathBuf,

    /// Samples per analysis frame (power of two)
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Samples between consecutive frame starts
    #[arg(long, default_value_t = DEFAULT_HOP_SIZE)]
    pub hop_size: usize,

    /// Color gradient for the image
    #[arg(long, value_enum, default_value_t = Palette::Classic)]
    pub palette: Palette,

    /// Worker threads for frame analysis (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Config file (defaults to ./specgram.toml or the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    #[arg(skip = DEFAULT_EPSILON)]
    pub epsilon: f64,
}

impl Cli {
    /// Config values apply only where the command line was left at its default.
    pub fn merge_config(&mut self, cfg: Config) {
        if self.out == PathBuf::from(DEFAULT_IMAGE) { self.out = cfg.output.image; }
        if self.json == PathBuf::from(DEFAULT_JSON) { self.json = cfg.output.json; }
        if self.palette == Palette::Classic { self.palette = cfg.output.palette; }
        if self.window_size == DEFAULT_WINDOW_SIZE { self.window_size = cfg.analysis.window_size; }
        if self.hop_size == DEFAULT_HOP_SIZE { self.hop_size = cfg.analysis.hop_size; }
        if self.threads == 0 { self.threads = cfg.analysis.threads; }
        self.epsilon = cfg.analysis.epsilon;
    }

    /// The source file; running without `--in` is fatal.
    pub fn input_path(&self) -> Result<PathBuf, SpectrogramError> {
        self.input.clone().ok_or(SpectrogramError::InputMissing)
    }

    pub fn analysis_params(&self) -> AnalysisParams {
        AnalysisParams {
            window_size: self.window_size,
            hop_size: self.hop_size,
            epsilon: self.epsilon,
        }
    }
}
