//! End-to-end run: load, derive, then render every figure of every metric.
//!
//! The input is fully loaded and validated before the output directory is
//! touched, so a schema or parse failure leaves no files behind. The first
//! error aborts the run.

use log::info;
use std::path::{Path, PathBuf};

use crate::config::PlotConfig;
use crate::dataset::{DerivedTable, Metric, load_observations};
use crate::error::PlotError;
use crate::render::facet::build_facet_grid;
use crate::render::overlay::{self, OPTIMIZATION_SWEEP};
use crate::render::{FigureKind, OutputDir, Renderer};
use crate::stats::Aggregator;

/// Outcome of a successful run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows: usize,
    pub written: Vec<PathBuf>,
}

pub fn run<R: Renderer>(config: &PlotConfig, renderer: &mut R) -> Result<RunSummary, PlotError> {
    let table = DerivedTable::from_observations(load_observations(&config.input)?);
    info!("Loaded {} benchmark rows from {}", table.len(), config.input.display());

    let output = OutputDir::prepare(&config.output_dir)?;
    let aggregator = Aggregator::from_config(config);
    let mut summary = RunSummary {
        rows: table.len(),
        written: Vec::new(),
    };

    for metric in Metric::ALL {
        render_metric(&table, metric, &aggregator, &output, renderer, &mut summary.written)?;
    }
    Ok(summary)
}

fn render_metric<R: Renderer>(
    table: &DerivedTable,
    metric: Metric,
    aggregator: &Aggregator,
    output: &OutputDir,
    renderer: &mut R,
    written: &mut Vec<PathBuf>,
) -> Result<(), PlotError> {
    if let Some(grid) = build_facet_grid(table, metric, aggregator) {
        let path = output.path_for(metric, FigureKind::FacetGrid);
        renderer.render_facet_grid(&grid, &path)?;
        record(written, path);
    }

    for extractor in table.edge_extractors() {
        if let Some(figure) = overlay::by_extractor(table, metric, extractor, aggregator) {
            let path = output.path_for(metric, FigureKind::ByExtractor(extractor));
            renderer.render_overlay(&figure, &path)?;
            record(written, path);
        }
    }

    for flag in OPTIMIZATION_SWEEP {
        if let Some(figure) = overlay::by_optimization(table, metric, flag, aggregator) {
            let path = output.path_for(metric, FigureKind::ByOptimization(flag));
            renderer.render_overlay(&figure, &path)?;
            record(written, path);
        }
    }
    Ok(())
}

fn record(written: &mut Vec<PathBuf>, path: PathBuf) {
    info!("Wrote {}", display_name(&path));
    written.push(path);
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
