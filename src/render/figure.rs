//! Backend-independent description of the figures a run produces.
//!
//! The facet and overlay builders turn the derived table into these plain
//! values; a [`Renderer`] turns them into image files. Keeping the two apart
//! lets the layout logic be checked without rasterizing anything.

use std::path::Path;

use crate::error::PlotError;
use crate::stats::CurvePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YScale {
    Linear,
    Log,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub x_label: String,
    pub y_label: String,
    pub y_scale: YScale,
}

/// How the raw points and the trend of a series are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    /// Opacity of the scatter points.
    pub point_alpha: f64,
    /// Draw a marker on every mean of the trend line.
    pub markers: bool,
}

/// Raw observations of one factor level plus their aggregate curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// Palette index, stable for a given factor level across figures.
    pub color: usize,
    pub points: Vec<(f64, f64)>,
    pub curve: Vec<CurvePoint>,
}

/// One cell of a facet grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub row: usize,
    pub col: usize,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacetGridFigure {
    pub title: String,
    /// Factor varying down the rows.
    pub row_header: String,
    /// Factor varying across the columns.
    pub col_header: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub axes: Axes,
    pub style: SeriesStyle,
    /// Present combinations only; absent cells stay blank.
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFigure {
    pub title: String,
    /// Names the fixed factor and value, and the colour-coded one.
    pub subtitle: String,
    pub axes: Axes,
    pub style: SeriesStyle,
    pub series: Vec<Series>,
}

/// Drawing capability the pipeline renders through.
///
/// Each call owns its drawing surface for the duration of the call and has
/// written (or failed to write) `path` by the time it returns.
pub trait Renderer {
    fn render_facet_grid(&mut self, figure: &FacetGridFigure, path: &Path) -> Result<(), PlotError>;

    fn render_overlay(&mut self, figure: &OverlayFigure, path: &Path) -> Result<(), PlotError>;
}
