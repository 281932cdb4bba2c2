//! Figure construction and rendering.
//!
//! - `facet`: the full (extractor × optimization) facet grid of a metric
//! - `overlay`: one-factor-fixed overlays, colour-coded by the other factor
//! - `figure`: backend-independent figure model and the `Renderer` trait
//! - `plotters_backend`: PNG rendering of the figure model
//! - `output`: deterministic file names and the output directory

pub mod facet;
pub mod figure;
pub mod output;
pub mod overlay;
pub mod plotters_backend;

pub use figure::Renderer;
pub use output::{FigureKind, OutputDir};
pub use plotters_backend::PlottersRenderer;
