//! Benchmark table loading and metric derivation.
//!
//! - `loader`: header-addressed CSV reading with typed coercion
//! - `derive`: derived columns (total time, `log2(N)`) and the shared table
//! - `types`: observation, derived row and metric definitions

pub mod derive;
pub mod loader;
pub mod types;

pub use derive::DerivedTable;
pub use loader::load_observations;
pub use types::{DerivedRow, Metric, flag_label};
