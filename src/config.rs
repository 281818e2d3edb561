use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::render::color::Palette;
use crate::spectral::analysis::{DEFAULT_HOP_SIZE, DEFAULT_WINDOW_SIZE};
use crate::spectral::scaler::DEFAULT_EPSILON;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_hop_size")]
    pub hop_size: usize,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Worker threads for per-frame analysis, 0 = one per core.
    #[serde(default)]
    pub threads: usize,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_image")]
    pub image: PathBuf,
    #[serde(default = "default_json")]
    pub json: PathBuf,
    #[serde(default)]
    pub palette: Palette,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            hop_size: default_hop_size(),
            epsilon: default_epsilon(),
            threads: 0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            json: default_json(),
            palette: Palette::default(),
        }
    }
}

fn default_window_size() -> usize { DEFAULT_WINDOW_SIZE }
fn default_hop_size() -> usize { DEFAULT_HOP_SIZE }
fn default_epsilon() -> f64 { DEFAULT_EPSILON }
fn default_image() -> PathBuf { "spectrogram.png".into() }
fn default_json() -> PathBuf { "data/spectrogram.json".into() }

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// `./specgram.toml`, then `~/.config/specgram/config.toml`, then the platform config dir.
pub fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from("specgram.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("specgram").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("specgram").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}
