//! Row types for the raw benchmark table and its derived view.

/// One executed benchmark trial as read from the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Number of graph edges (`N`).
    pub size: u64,
    /// Edge extraction strategy, e.g. `ArraySort` or `HeapMin`.
    pub edge_extractor: String,
    /// Whether the union-find structure used path compression.
    pub uses_optimized_union_find: bool,
    pub insertion_time_ms: f64,
    pub kruskal_time_ms: f64,
}

/// An observation extended with the columns the plots are keyed on.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub observation: Observation,
    pub total_time_ms: f64,
    /// `log2(size)`, undefined for `size == 0`.
    pub log2_size: Option<f64>,
}

impl DerivedRow {
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalTime => self.total_time_ms,
            Metric::InsertionTime => self.observation.insertion_time_ms,
            Metric::KruskalTime => self.observation.kruskal_time_ms,
        }
    }
}

/// The timing columns a figure can be drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalTime,
    InsertionTime,
    KruskalTime,
}

impl Metric {
    /// Rendering order for a run.
    pub const ALL: [Metric; 3] = [Metric::TotalTime, Metric::InsertionTime, Metric::KruskalTime];

    /// Stable identifier used in output file names.
    pub fn file_stem(self) -> &'static str {
        match self {
            Metric::TotalTime => "TimeTotal",
            Metric::InsertionTime => "TimeInsertion",
            Metric::KruskalTime => "TimeKruskal",
        }
    }

    /// Presentation alias shown on axes and titles.
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::TotalTime => "Total execution time",
            Metric::InsertionTime => "Edge insertion time",
            Metric::KruskalTime => "Kruskal time",
        }
    }
}

/// Human-readable label for the optimization flag, matching the way the
/// benchmark scripts print booleans.
pub fn flag_label(flag: bool) -> &'static str {
    if flag { "True" } else { "False" }
}
