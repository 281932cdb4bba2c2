//! Facet grid: one panel per (edge extractor, optimization flag) pair.

use crate::dataset::loader::{COL_EXTRACTOR, COL_OPTI_PATH};
use crate::dataset::{DerivedTable, Metric, flag_label};
use crate::stats::Aggregator;
use crate::stats::grouping::group_first_seen;

use super::figure::{Axes, FacetGridFigure, Panel, Series, SeriesStyle, YScale};

pub const FACET_STYLE: SeriesStyle = SeriesStyle {
    point_alpha: 0.5,
    markers: false,
};

pub const X_LABEL: &str = "Number of edges log2(N)";

/// Build the facet grid for `metric`.
///
/// Columns follow the edge extractors and rows the optimization flag, each
/// in first-seen order. Only combinations with plottable rows get a panel.
/// Returns `None` when no row can be placed on the `log2(N)` axis.
pub fn build_facet_grid(table: &DerivedTable, metric: Metric, aggregator: &Aggregator) -> Option<FacetGridFigure> {
    let plottable = table.rows().iter().filter(|row| row.log2_size.is_some());
    let groups = group_first_seen(plottable, |row| {
        let row = *row;
        (row.observation.edge_extractor.as_str(), row.observation.uses_optimized_union_find)
    });
    if groups.is_empty() {
        return None;
    }

    let mut cols: Vec<&str> = Vec::new();
    let mut rows: Vec<bool> = Vec::new();
    for ((extractor, flag), _) in &groups {
        if !cols.contains(extractor) {
            cols.push(*extractor);
        }
        if !rows.contains(flag) {
            rows.push(*flag);
        }
    }

    let mut panels: Vec<Panel> = groups
        .into_iter()
        .map(|((extractor, flag), members)| {
            let points: Vec<(f64, f64)> = members
                .iter()
                .filter_map(|row| row.log2_size.map(|x| (x, row.metric(metric))))
                .collect();
            let curve = aggregator.curve(&points);
            Panel {
                title: format!("{extractor} edge extractor | optimized path: {}", flag_label(flag)),
                row: rows.iter().position(|r| *r == flag).unwrap_or_default(),
                col: cols.iter().position(|c| *c == extractor).unwrap_or_default(),
                series: vec![Series {
                    label: metric.display_name().to_string(),
                    color: 0,
                    points,
                    curve,
                }],
            }
        })
        .collect();
    panels.sort_by_key(|p| (p.row, p.col));

    Some(FacetGridFigure {
        title: format!("{} by edge extractor and union-find optimization", metric.display_name()),
        row_header: COL_OPTI_PATH.to_string(),
        col_header: COL_EXTRACTOR.to_string(),
        row_labels: rows.iter().map(|f| flag_label(*f).to_string()).collect(),
        col_labels: cols.iter().map(|c| c.to_string()).collect(),
        axes: Axes {
            x_label: X_LABEL.to_string(),
            y_label: format!("Mean {} [ms]", metric.display_name().to_lowercase()),
            y_scale: YScale::Linear,
        },
        style: FACET_STYLE,
        panels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CiMethod;
    use crate::dataset::types::Observation;

    fn table(rows: &[(u64, &str, bool)]) -> DerivedTable {
        DerivedTable::from_observations(
            rows.iter()
                .map(|&(size, extractor, opt)| Observation {
                    size,
                    edge_extractor: extractor.to_string(),
                    uses_optimized_union_find: opt,
                    insertion_time_ms: size as f64 * 0.01,
                    kruskal_time_ms: size as f64 * 0.02,
                })
                .collect(),
        )
    }

    fn aggregator() -> Aggregator {
        Aggregator::new(CiMethod::Normal, 1, 0)
    }

    #[test]
    fn two_by_two_levels_give_four_panels() {
        let t = table(&[
            (4, "ArraySort", true),
            (4, "ArraySort", false),
            (4, "HeapMin", true),
            (4, "HeapMin", false),
            (8, "HeapMin", false),
        ]);
        let grid = build_facet_grid(&t, Metric::TotalTime, &aggregator()).unwrap();
        assert_eq!(grid.panels.len(), 4);
        assert_eq!(grid.col_labels, vec!["ArraySort", "HeapMin"]);
        assert_eq!(grid.row_labels, vec!["True", "False"]);
        let cells: Vec<(usize, usize)> = grid.panels.iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn single_flag_level_gives_two_panels() {
        let t = table(&[(4, "ArraySort", true), (8, "HeapMin", true), (16, "ArraySort", true)]);
        let grid = build_facet_grid(&t, Metric::KruskalTime, &aggregator()).unwrap();
        assert_eq!(grid.panels.len(), 2);
        assert_eq!(grid.row_labels, vec!["True"]);
    }

    #[test]
    fn missing_combination_leaves_cell_empty() {
        let t = table(&[(4, "ArraySort", true), (4, "ArraySort", false), (4, "HeapMin", true)]);
        let grid = build_facet_grid(&t, Metric::TotalTime, &aggregator()).unwrap();
        assert_eq!(grid.panels.len(), 3);
        assert!(!grid.panels.iter().any(|p| p.row == 1 && p.col == 1));
    }

    #[test]
    fn panel_titles_name_factor_values() {
        let t = table(&[(4, "HeapMin", false)]);
        let grid = build_facet_grid(&t, Metric::TotalTime, &aggregator()).unwrap();
        assert_eq!(grid.panels[0].title, "HeapMin edge extractor | optimized path: False");
        assert_eq!(grid.row_header, "KruskalOptiPath");
        assert_eq!(grid.col_header, "EdgeExtractorName");
    }

    #[test]
    fn panel_carries_points_and_curve() {
        let t = table(&[(4, "ArraySort", true), (4, "ArraySort", true), (8, "ArraySort", true)]);
        let grid = build_facet_grid(&t, Metric::InsertionTime, &aggregator()).unwrap();
        let series = &grid.panels[0].series[0];
        assert_eq!(series.points.len(), 3);
        assert_eq!(series.curve.len(), 2);
        assert_eq!(series.curve[0].x, 2.0);
        assert_eq!(series.curve[0].mean, 0.04);
    }

    #[test]
    fn zero_sizes_are_excluded() {
        let t = table(&[(0, "ArraySort", true), (0, "HeapMin", false)]);
        assert!(build_facet_grid(&t, Metric::TotalTime, &aggregator()).is_none());

        let t = table(&[(0, "ArraySort", true), (2, "HeapMin", false)]);
        let grid = build_facet_grid(&t, Metric::TotalTime, &aggregator()).unwrap();
        assert_eq!(grid.panels.len(), 1);
        assert_eq!(grid.col_labels, vec!["HeapMin"]);
    }
}
