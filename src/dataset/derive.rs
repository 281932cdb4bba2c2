//! Derived columns and the read-only table the renderers work from.

use log::debug;

use super::types::{DerivedRow, Metric, Observation};

/// Compute the derived columns of a single observation.
pub fn derive_row(observation: Observation) -> DerivedRow {
    let total_time_ms = observation.insertion_time_ms + observation.kruskal_time_ms;
    let log2_size = (observation.size >= 1).then(|| (observation.size as f64).log2());
    DerivedRow {
        observation,
        total_time_ms,
        log2_size,
    }
}

/// The benchmark table extended with derived columns.
///
/// Rows with an undefined `log2_size` stay in the table; they are only
/// dropped by the accessors keyed on that axis.
#[derive(Debug, Clone, Default)]
pub struct DerivedTable {
    rows: Vec<DerivedRow>,
}

impl DerivedTable {
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let rows: Vec<DerivedRow> = observations.into_iter().map(derive_row).collect();
        let undefined = rows.iter().filter(|r| r.log2_size.is_none()).count();
        if undefined > 0 {
            debug!("{undefined} rows have size 0 and will be left out of log2(N) plots");
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Distinct edge extractor names in first-seen order.
    pub fn edge_extractors(&self) -> Vec<&str> {
        let mut levels: Vec<&str> = Vec::new();
        for row in &self.rows {
            let name = row.observation.edge_extractor.as_str();
            if !levels.contains(&name) {
                levels.push(name);
            }
        }
        levels
    }

    /// Distinct optimization flags in first-seen order.
    pub fn optimization_levels(&self) -> Vec<bool> {
        let mut levels = Vec::with_capacity(2);
        for row in &self.rows {
            let flag = row.observation.uses_optimized_union_find;
            if !levels.contains(&flag) {
                levels.push(flag);
            }
        }
        levels
    }

    /// `(log2_size, metric)` pairs of the rows accepted by `filter`,
    /// skipping rows whose `log2_size` is undefined.
    pub fn axis_points<F>(&self, metric: Metric, filter: F) -> Vec<(f64, f64)>
    where
        F: Fn(&DerivedRow) -> bool,
    {
        self.rows
            .iter()
            .filter(|row| filter(row))
            .filter_map(|row| row.log2_size.map(|x| (x, row.metric(metric))))
            .collect()
    }
}
