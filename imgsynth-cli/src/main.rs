use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::Rng;

mod cli;
mod interrupt;

use cli::Cli;
use imgsynth_composer::{CancelFlag, RunSummary, SceneComposer, SceneConfig};
use imgsynth_render::SoftwareRenderer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if cli.stereo {
        println!("\nGenerating stereo images with eye separation = {} units...", cli.eye_sep);
    } else {
        println!("\nGenerating images...");
    }

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    println!("Current randomization seed: {}", seed);

    let config = cli.scene_config(seed);
    if config.depth_map {
        info!("Depth buffer generation enabled");
    }

    let cancel = CancelFlag::new();
    interrupt::install_interrupt_handler(cancel.clone())?;

    let out_dir = config.out_dir.clone();
    let summary = generate(config, cancel)?;

    if summary.interrupted {
        println!("Interrupted");
        return Ok(());
    }

    info!(
        "Done: {} image(s) written to {}",
        summary.images_completed,
        out_dir.display()
    );
    Ok(())
}

/// Render the whole dataset with the software renderer, stopping early once
/// `cancel` is raised
fn generate(config: SceneConfig, cancel: CancelFlag) -> Result<RunSummary> {
    let renderer = SoftwareRenderer::new(config.width, config.height)
        .context("failed to create renderer")?;
    let out_dir = config.out_dir.clone();
    let mut composer = SceneComposer::new(config, renderer)
        .context("invalid configuration")?
        .with_cancel_flag(cancel);

    composer
        .run()
        .with_context(|| format!("image generation into {} failed", out_dir.display()))
}
