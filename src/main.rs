use anyhow::Context;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::Path;

mod config;
mod dataset;
mod error;
mod pipeline;
mod render;
mod stats;

use crate::config::{CONFIG_PATH, PlotConfig};
use crate::render::PlottersRenderer;

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("kruskal_bench_plots"), LevelFilter::Debug)
        .init();

    info!("Starting up");

    let (config, from_file) = PlotConfig::load_or_default(Path::new(CONFIG_PATH)).context("failed to load plot configuration")?;
    if from_file {
        info!("Using configuration from {CONFIG_PATH}");
    } else {
        info!("No {CONFIG_PATH} found, using defaults");
    }

    let mut renderer = PlottersRenderer::new(&config);
    let summary = pipeline::run(&config, &mut renderer)
        .with_context(|| format!("plotting {} failed", config.input.display()))?;

    info!(
        "Rendered {} figures from {} rows into {}",
        summary.written.len(),
        summary.rows,
        config.output_dir.display()
    );
    Ok(())
}
