//! Deterministic output file names and the output directory.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::{Metric, flag_label};
use crate::error::PlotError;

/// Which rendering a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind<'a> {
    FacetGrid,
    /// Overlay with the edge extractor fixed.
    ByExtractor(&'a str),
    /// Overlay with the optimization flag fixed.
    ByOptimization(bool),
}

/// File name for a rendering; depends on nothing but its arguments.
pub fn file_name(metric: Metric, kind: FigureKind<'_>) -> String {
    let stem = metric.file_stem();
    match kind {
        FigureKind::FacetGrid => format!("{stem}_all_graphs.png"),
        FigureKind::ByExtractor(extractor) => format!("{stem}_plot_{}.png", escape_level(extractor)),
        FigureKind::ByOptimization(flag) => format!("{stem}_plot_opti_{}.png", flag_label(flag)),
    }
}

/// Make a factor level safe for a file name without merging distinct
/// levels: ASCII alphanumerics and `-` are kept, every other byte becomes
/// `_` followed by two hex digits. A bare `_` never survives, so escaped
/// names cannot collide with the fixed `opti_` names either.
fn escape_level(level: &str) -> String {
    let mut escaped = String::with_capacity(level.len());
    for byte in level.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            escaped.push(byte as char);
        } else {
            let _ = write!(escaped, "_{byte:02x}");
        }
    }
    escaped
}

/// Destination directory for the figures of a run.
#[derive(Debug, Clone)]
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    /// Create the directory if needed.
    pub fn prepare(dir: &Path) -> Result<Self, PlotError> {
        fs::create_dir_all(dir).map_err(|e| PlotError::io(dir, e))?;
        Ok(Self { dir: dir.to_path_buf() })
    }

    pub fn path_for(&self, metric: Metric, kind: FigureKind<'_>) -> PathBuf {
        self.dir.join(file_name(metric, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_follow_results_layout() {
        assert_eq!(file_name(Metric::TotalTime, FigureKind::FacetGrid), "TimeTotal_all_graphs.png");
        assert_eq!(
            file_name(Metric::KruskalTime, FigureKind::ByExtractor("HeapMin")),
            "TimeKruskal_plot_HeapMin.png"
        );
        assert_eq!(
            file_name(Metric::InsertionTime, FigureKind::ByOptimization(false)),
            "TimeInsertion_plot_opti_False.png"
        );
    }

    #[test]
    fn escaping_keeps_levels_apart() {
        let levels = ["Heap Min", "Heap_Min", "Heap/Min", "HeapMin", "opti_True", "Árbol"];
        let mut names = HashSet::new();
        for metric in Metric::ALL {
            names.insert(file_name(metric, FigureKind::FacetGrid));
            names.insert(file_name(metric, FigureKind::ByOptimization(true)));
            names.insert(file_name(metric, FigureKind::ByOptimization(false)));
            for level in levels {
                names.insert(file_name(metric, FigureKind::ByExtractor(level)));
            }
        }
        assert_eq!(names.len(), Metric::ALL.len() * (3 + levels.len()));
        assert_eq!(
            file_name(Metric::TotalTime, FigureKind::ByExtractor("Heap Min")),
            "TimeTotal_plot_Heap_20Min.png"
        );
    }

    #[test]
    fn prepare_creates_nested_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        let out = OutputDir::prepare(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(
            out.path_for(Metric::TotalTime, FigureKind::FacetGrid),
            nested.join("TimeTotal_all_graphs.png")
        );
    }

    #[test]
    fn prepare_fails_when_path_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("taken");
        std::fs::write(&file, b"x").unwrap();
        let err = OutputDir::prepare(&file.join("sub")).unwrap_err();
        assert!(matches!(err, PlotError::Io { .. }));
    }
}
