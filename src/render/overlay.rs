//! Overlay figures: one factor held fixed, the other colour-coded on a
//! shared pair of log-scaled axes.

use log::warn;

use crate::dataset::loader::{COL_EXTRACTOR, COL_OPTI_PATH};
use crate::dataset::{DerivedRow, DerivedTable, Metric, flag_label};
use crate::stats::Aggregator;

use super::facet::X_LABEL;
use super::figure::{Axes, OverlayFigure, Series, SeriesStyle, YScale};

pub const OVERLAY_STYLE: SeriesStyle = SeriesStyle {
    point_alpha: 0.6,
    markers: true,
};

/// Optimization levels swept when the flag is the fixed factor.
pub const OPTIMIZATION_SWEEP: [bool; 2] = [true, false];

/// Fix the edge extractor and colour by optimization flag.
pub fn by_extractor(table: &DerivedTable, metric: Metric, extractor: &str, aggregator: &Aggregator) -> Option<OverlayFigure> {
    let levels = table.optimization_levels();
    let series = levels
        .iter()
        .enumerate()
        .filter_map(|(color, &flag)| {
            build_series(
                table,
                metric,
                format!("{COL_OPTI_PATH} = {}", flag_label(flag)),
                color,
                |row| row.observation.edge_extractor == extractor && row.observation.uses_optimized_union_find == flag,
                aggregator,
            )
        })
        .collect::<Vec<_>>();

    if series.is_empty() {
        warn!("No plottable {} rows for edge extractor {extractor}; skipping overlay", metric.file_stem());
        return None;
    }

    Some(OverlayFigure {
        title: format!("Mean {} of Kruskal using the {extractor} edge extractor", metric.display_name().to_lowercase()),
        subtitle: format!("fixed: {COL_EXTRACTOR} = {extractor} | colour: {COL_OPTI_PATH}"),
        axes: log_axes(metric),
        style: OVERLAY_STYLE,
        series,
    })
}

/// Fix the optimization flag and colour by edge extractor.
pub fn by_optimization(table: &DerivedTable, metric: Metric, flag: bool, aggregator: &Aggregator) -> Option<OverlayFigure> {
    let series = table
        .edge_extractors()
        .into_iter()
        .enumerate()
        .filter_map(|(color, extractor)| {
            build_series(
                table,
                metric,
                extractor.to_string(),
                color,
                |row| row.observation.edge_extractor == extractor && row.observation.uses_optimized_union_find == flag,
                aggregator,
            )
        })
        .collect::<Vec<_>>();

    if series.is_empty() {
        warn!(
            "No plottable {} rows for {COL_OPTI_PATH} = {}; skipping overlay",
            metric.file_stem(),
            flag_label(flag)
        );
        return None;
    }

    let negation = if flag { "" } else { "not " };
    Some(OverlayFigure {
        title: format!(
            "Mean {} of Kruskal {negation}using the optimized union-find",
            metric.display_name().to_lowercase()
        ),
        subtitle: format!("fixed: {COL_OPTI_PATH} = {} | colour: {COL_EXTRACTOR}", flag_label(flag)),
        axes: log_axes(metric),
        style: OVERLAY_STYLE,
        series,
    })
}

/// The selected rows as a series for a log y axis. The curve is aggregated
/// over every row; only the scatter points drop values at or below zero,
/// which have no position on the axis. `None` when nothing is left to draw.
fn build_series<F>(
    table: &DerivedTable,
    metric: Metric,
    label: String,
    color: usize,
    filter: F,
    aggregator: &Aggregator,
) -> Option<Series>
where
    F: Fn(&DerivedRow) -> bool,
{
    let all_points = table.axis_points(metric, filter);
    let curve = aggregator.curve(&all_points);
    let points: Vec<(f64, f64)> = all_points.into_iter().filter(|(_, y)| *y > 0.0).collect();
    if points.is_empty() {
        return None;
    }
    Some(Series {
        label,
        color,
        points,
        curve,
    })
}

fn log_axes(metric: Metric) -> Axes {
    Axes {
        x_label: X_LABEL.to_string(),
        y_label: format!("Mean {} log(ms)", metric.display_name().to_lowercase()),
        y_scale: YScale::Log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CiMethod;
    use crate::dataset::types::Observation;
    use crate::render::facet::build_facet_grid;

    fn obs(size: u64, extractor: &str, opt: bool, kruskal: f64) -> Observation {
        Observation {
            size,
            edge_extractor: extractor.to_string(),
            uses_optimized_union_find: opt,
            insertion_time_ms: 0.5,
            kruskal_time_ms: kruskal,
        }
    }

    fn sample_table() -> DerivedTable {
        DerivedTable::from_observations(vec![
            obs(4, "ArraySort", true, 1.0),
            obs(4, "ArraySort", false, 2.0),
            obs(8, "HeapMin", true, 3.0),
            obs(8, "HeapMin", false, 4.0),
            obs(16, "HeapMin", false, 5.0),
        ])
    }

    fn aggregator() -> Aggregator {
        Aggregator::new(CiMethod::Normal, 1, 0)
    }

    #[test]
    fn extractor_overlay_colours_by_flag() {
        let fig = by_extractor(&sample_table(), Metric::KruskalTime, "HeapMin", &aggregator()).unwrap();
        let labels: Vec<&str> = fig.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["KruskalOptiPath = True", "KruskalOptiPath = False"]);
        assert_eq!(fig.series[1].points, vec![(3.0, 4.0), (4.0, 5.0)]);
        assert_eq!(fig.axes.y_scale, YScale::Log);
        assert!(fig.subtitle.contains("EdgeExtractorName = HeapMin"));
        assert!(fig.subtitle.contains("colour: KruskalOptiPath"));
    }

    #[test]
    fn optimization_overlay_colours_by_extractor() {
        let fig = by_optimization(&sample_table(), Metric::KruskalTime, false, &aggregator()).unwrap();
        let labels: Vec<&str> = fig.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["ArraySort", "HeapMin"]);
        assert_eq!(fig.series[1].curve.len(), 2);
        assert!(fig.title.contains("not using"));
        assert!(fig.subtitle.contains("KruskalOptiPath = False"));
    }

    #[test]
    fn colours_are_stable_when_a_level_is_missing() {
        let table = DerivedTable::from_observations(vec![obs(4, "ArraySort", true, 1.0), obs(4, "HeapMin", false, 2.0)]);
        let fig = by_optimization(&table, Metric::KruskalTime, false, &aggregator()).unwrap();
        assert_eq!(fig.series.len(), 1);
        assert_eq!(fig.series[0].color, 1);
    }

    #[test]
    fn absent_level_yields_no_figure() {
        let table = DerivedTable::from_observations(vec![obs(4, "ArraySort", true, 1.0)]);
        assert!(by_optimization(&table, Metric::KruskalTime, false, &aggregator()).is_none());
        assert!(by_extractor(&table, Metric::KruskalTime, "HeapMin", &aggregator()).is_none());
    }

    #[test]
    fn non_positive_values_are_left_off_log_axes() {
        let table = DerivedTable::from_observations(vec![obs(4, "ArraySort", true, 0.0), obs(8, "ArraySort", true, 2.0)]);
        let fig = by_extractor(&table, Metric::KruskalTime, "ArraySort", &aggregator()).unwrap();
        assert_eq!(fig.series[0].points, vec![(3.0, 2.0)]);
        assert_eq!(fig.series[0].curve.len(), 2);
    }

    #[test]
    fn overlay_mean_matches_facet_mean() {
        let table = DerivedTable::from_observations(vec![obs(4, "ArraySort", true, 0.0), obs(4, "ArraySort", true, 2.0)]);
        let grid = build_facet_grid(&table, Metric::KruskalTime, &aggregator()).unwrap();
        let fig = by_extractor(&table, Metric::KruskalTime, "ArraySort", &aggregator()).unwrap();

        let facet_curve = &grid.panels[0].series[0].curve;
        let overlay_curve = &fig.series[0].curve;
        assert_eq!(facet_curve[0].mean, 1.0);
        assert_eq!(overlay_curve, facet_curve);
        assert_eq!(fig.series[0].points, vec![(2.0, 2.0)]);
    }

    #[test]
    fn all_non_positive_rows_yield_no_figure() {
        let table = DerivedTable::from_observations(vec![obs(4, "ArraySort", true, 0.0)]);
        assert!(by_extractor(&table, Metric::KruskalTime, "ArraySort", &aggregator()).is_none());
    }
}
