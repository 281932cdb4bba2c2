//! PNG rendering of figures with `plotters`.
//!
//! Every render call opens its own bitmap, draws, presents it to disk and
//! drops it before returning, so nothing carries over between images.

use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::figure::{Axes, FacetGridFigure, OverlayFigure, Renderer, Series, SeriesStyle, YScale};
use crate::config::PlotConfig;
use crate::error::PlotError;

const FONT: &str = "sans-serif";

/// Space reserved above the facet panels for the title and column headers.
const GRID_HEADER_HEIGHT: u32 = 70;
/// Part of `GRID_HEADER_HEIGHT` taken by the column header strip.
const GRID_COL_HEADER_HEIGHT: u32 = 30;
/// Space reserved right of the facet panels for the row headers.
const GRID_ROW_HEADER_WIDTH: u32 = 40;

/// "darkgrid" plotting area background.
const PANEL_BACKGROUND: RGBColor = RGBColor(234, 234, 242);

/// Qualitative palette, indexed by factor level.
const PALETTE: [RGBColor; 6] = [
    RGBColor(76, 114, 176),
    RGBColor(221, 132, 82),
    RGBColor(85, 168, 104),
    RGBColor(196, 78, 82),
    RGBColor(129, 114, 179),
    RGBColor(147, 120, 96),
];

fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Renders figures to PNG files through the plotters bitmap backend.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    grid_panel_size: (u32, u32),
    figure_size: (u32, u32),
}

impl PlottersRenderer {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            grid_panel_size: config.grid_panel_size,
            figure_size: config.figure_size,
        }
    }
}

impl Renderer for PlottersRenderer {
    fn render_facet_grid(&mut self, figure: &FacetGridFigure, path: &Path) -> Result<(), PlotError> {
        let rows = figure.row_labels.len().max(1) as u32;
        let cols = figure.col_labels.len().max(1) as u32;
        let size = (
            self.grid_panel_size.0 * cols + GRID_ROW_HEADER_WIDTH,
            self.grid_panel_size.1 * rows + GRID_HEADER_HEIGHT,
        );

        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_facet_grid(&root, figure).map_err(|e| render_error(path, e))?;
        root.present().map_err(|e| write_error(path, e))
    }

    fn render_overlay(&mut self, figure: &OverlayFigure, path: &Path) -> Result<(), PlotError> {
        let root = BitMapBackend::new(path, self.figure_size).into_drawing_area();
        draw_overlay(&root, figure).map_err(|e| render_error(path, e))?;
        root.present().map_err(|e| write_error(path, e))
    }
}

fn render_error(path: &Path, e: impl std::fmt::Display) -> PlotError {
    PlotError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> PlotError {
    PlotError::io(path, std::io::Error::other(e.to_string()))
}

fn draw_facet_grid<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &FacetGridFigure) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let body = root.titled(&figure.title, (FONT, 22))?;

    let (width, _) = body.dim_in_pixel();
    let (main, row_strip) = body.split_horizontally(width.saturating_sub(GRID_ROW_HEADER_WIDTH) as i32);
    let (col_strip, grid) = main.split_vertically(GRID_COL_HEADER_HEIGHT as i32);
    let (_, row_strip) = row_strip.split_vertically(GRID_COL_HEADER_HEIGHT as i32);

    let rows = figure.row_labels.len().max(1);
    let cols = figure.col_labels.len().max(1);

    let col_style = (FONT, 15).into_font().color(&BLACK).pos(Pos::new(HPos::Center, VPos::Center));
    let col_headers = header_labels(&figure.col_header, &figure.col_labels);
    for (strip, label) in col_strip.split_evenly((1, cols)).iter().zip(&col_headers) {
        let (w, h) = strip.dim_in_pixel();
        strip.draw_text(label, &col_style, ((w / 2) as i32, (h / 2) as i32))?;
    }

    let row_style = (FONT, 15)
        .into_font()
        .transform(FontTransform::Rotate90)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let row_headers = header_labels(&figure.row_header, &figure.row_labels);
    for (strip, label) in row_strip.split_evenly((rows, 1)).iter().zip(&row_headers) {
        let (w, h) = strip.dim_in_pixel();
        strip.draw_text(label, &row_style, ((w / 2) as i32, (h / 2) as i32))?;
    }

    let Some(bounds) = Bounds::of(figure.panels.iter().flat_map(|p| p.series.iter()), figure.axes.y_scale) else {
        return Ok(());
    };
    let cells = grid.split_evenly((rows, cols));
    for panel in &figure.panels {
        if let Some(cell) = cells.get(panel.row * cols + panel.col) {
            draw_chart(cell, Some(panel.title.as_str()), &panel.series, &figure.axes, &figure.style, &bounds, false)?;
        }
    }
    Ok(())
}

/// `"{header}: {label}"` for each level of a facet factor.
fn header_labels(header: &str, labels: &[String]) -> Vec<String> {
    labels.iter().map(|label| format!("{header}: {label}")).collect()
}

fn draw_overlay<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &OverlayFigure) -> DrawResult<DB> {
    root.fill(&WHITE)?;
    let body = root.titled(&figure.title, (FONT, 18))?;
    let body = body.titled(&figure.subtitle, (FONT, 14))?;

    let Some(bounds) = Bounds::of(figure.series.iter(), figure.axes.y_scale) else {
        return Ok(());
    };
    draw_chart(&body, None, &figure.series, &figure.axes, &figure.style, &bounds, true)
}

/// Shared axis ranges of a figure.
#[derive(Debug, Clone, PartialEq)]
struct Bounds {
    x: Range<f64>,
    y: Range<f64>,
}

impl Bounds {
    /// Ranges covering every point and band of `series`, padded. On a log
    /// axis only positive values count.
    fn of<'a>(series: impl Iterator<Item = &'a Series>, scale: YScale) -> Option<Self> {
        let mut xs: Vec<f64> = Vec::new();
        let mut ys: Vec<f64> = Vec::new();
        for s in series {
            for &(x, y) in &s.points {
                xs.push(x);
                ys.push(y);
            }
            for p in &s.curve {
                xs.push(p.x);
                ys.extend([p.mean, p.lower, p.upper]);
            }
        }
        if scale == YScale::Log {
            ys.retain(|y| *y > 0.0);
        }
        let (x_min, x_max) = min_max(&xs)?;
        let (y_min, y_max) = min_max(&ys)?;

        let y = match scale {
            YScale::Linear => {
                let span = if y_max > y_min { y_max - y_min } else { y_max.abs().max(1.0) };
                (y_min - 0.05 * span)..(y_max + 0.05 * span)
            }
            YScale::Log => (y_min / 1.5)..(y_max * 1.5),
        };
        Some(Self {
            x: (x_min - 0.5)..(x_max + 0.5),
            y,
        })
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    finite.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn draw_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: Option<&str>,
    series: &[Series],
    axes: &Axes,
    style: &SeriesStyle,
    bounds: &Bounds,
    with_legend: bool,
) -> DrawResult<DB> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(10).x_label_area_size(35).y_label_area_size(60);
    if let Some(caption) = caption {
        builder.caption(caption, (FONT, 14));
    }

    match axes.y_scale {
        YScale::Linear => {
            let mut chart = builder.build_cartesian_2d(bounds.x.clone(), bounds.y.clone())?;
            chart.plotting_area().fill(&PANEL_BACKGROUND)?;
            chart
                .configure_mesh()
                .bold_line_style(WHITE)
                .light_line_style(PANEL_BACKGROUND)
                .x_desc(axes.x_label.as_str())
                .y_desc(axes.y_label.as_str())
                .draw()?;
            draw_layers(&mut chart, series, style, bounds.y.start, with_legend)
        }
        YScale::Log => {
            let mut chart = builder.build_cartesian_2d(bounds.x.clone(), bounds.y.clone().log_scale())?;
            chart.plotting_area().fill(&PANEL_BACKGROUND)?;
            chart
                .configure_mesh()
                .bold_line_style(WHITE)
                .light_line_style(PANEL_BACKGROUND)
                .x_desc(axes.x_label.as_str())
                .y_desc(axes.y_label.as_str())
                .draw()?;
            draw_layers(&mut chart, series, style, bounds.y.start, with_legend)
        }
    }
}

/// Band, scatter and mean line of every series. Band and mean values below
/// `y_floor` are clamped so they stay drawable on a log axis.
fn draw_layers<'a, DB, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, Y>>,
    series: &[Series],
    style: &SeriesStyle,
    y_floor: f64,
    with_legend: bool,
) -> DrawResult<DB>
where
    DB: DrawingBackend + 'a,
    Y: Ranged<ValueType = f64>,
{
    for s in series {
        let color = palette_color(s.color);

        if !s.curve.is_empty() {
            let mut band: Vec<(f64, f64)> = s.curve.iter().map(|p| (p.x, p.upper.max(y_floor))).collect();
            band.extend(s.curve.iter().rev().map(|p| (p.x, p.lower.max(y_floor))));
            chart.draw_series(std::iter::once(Polygon::new(band, color.mix(0.2).filled())))?;
        }

        chart.draw_series(
            s.points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.mix(style.point_alpha).filled())),
        )?;

        let line = chart.draw_series(LineSeries::new(s.curve.iter().map(|p| (p.x, p.mean.max(y_floor))), color.stroke_width(2)))?;
        if with_legend {
            line.label(s.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        if style.markers {
            chart.draw_series(s.curve.iter().map(|p| Circle::new((p.x, p.mean.max(y_floor)), 5, color.filled())))?;
        }
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}
