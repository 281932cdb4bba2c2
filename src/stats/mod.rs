//! Aggregation of raw trials into mean trends with confidence bands.

pub mod aggregator;
pub mod grouping;

pub use aggregator::{Aggregator, CurvePoint};
