mod audio;
mod cli;
mod config;
mod error;
mod pipeline;
mod render;
mod spectral;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use pipeline::{Pipeline, PipelineOptions};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Explicit --config path, or auto-detect specgram.toml / user config
    let config_path = cli.config.clone().or_else(config::find_config);
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            cli.merge_config(cfg);
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let input = cli.input_path()?;

    if cli.threads > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let params = cli.analysis_params();
    log::info!("specgram - audio spectrogram renderer");
    log::info!("Input: {}", input.display());
    log::info!(
        "Window: {} samples, hop: {}, palette: {:?}",
        params.window_size,
        params.hop_size,
        cli.palette
    );

    let mut pipeline = Pipeline::new(PipelineOptions {
        input: input.clone(),
        image_out: cli.out.clone(),
        json_out: cli.json.clone(),
        params,
        palette: cli.palette,
        sequential: cli.threads == 1,
        show_progress: !cli.quiet,
    });

    let spec = pipeline
        .run()
        .with_context(|| format!("Failed to render spectrogram for {}", input.display()))?;

    if spec.matrix.is_empty() {
        log::warn!("No frames were produced; the image only contains the axes");
    }
    log::info!(
        "Done: {} frames x {} bins ({:.1} ms/frame, {:.2} Hz/bin), max {:.2} dB",
        spec.matrix.num_frames(),
        spec.matrix.num_bins(),
        spec.frame_period() * 1000.0,
        spec.bin_resolution(),
        spec.global_max.value()
    );
    println!("Spectrogram saved to {}", cli.out.display());
    println!("JSON data saved to {}", cli.json.display());
    Ok(())
}
