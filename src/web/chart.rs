//! SVG rendering of the trend figure
//!
//! Draws a [`TrendFigure`] with plotters into an in-memory SVG document:
//! a date x-axis, one line with circle markers per series, titled axes,
//! and a series legend.

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use thiserror::Error;

use super::figure::TrendFigure;

const SIZE: (u32, u32) = (800, 420);
const FONT: &str = "sans-serif";

const X_LABELS: usize = 6;
const Y_LABELS: usize = 6;
const MARKER_SIZE: i32 = 4;

/// Legend box placement, in pixels from the plot's top-right corner
const LEGEND_WIDTH: i32 = 100;
const LEGEND_TOP: i32 = 8;

const TEXT_COLOR: RGBColor = RGBColor(42, 63, 95);
const GRID_COLOR: RGBColor = RGBColor(235, 240, 248);
const MUTED_COLOR: RGBColor = RGBColor(107, 114, 128);

/// Drawing failed inside the SVG backend
#[derive(Error, Debug)]
#[error("Chart rendering failed: {0}")]
pub struct ChartError(String);

/// Render the figure as a standalone SVG document
pub fn render_svg(figure: &TrendFigure) -> Result<String, ChartError> {
    let mut svg = String::new();
    draw(figure, &mut svg).map_err(|e| ChartError(e.to_string()))?;
    Ok(svg)
}

fn draw<'a>(figure: &TrendFigure, svg: &'a mut String) -> DrawResult<(), SVGBackend<'a>> {
    let layout = &figure.layout;
    let font = layout.font_size as f64;

    let canvas = SVGBackend::with_string(svg, SIZE).into_drawing_area();
    canvas.fill(&WHITE)?;
    let root = canvas.margin(
        layout.margin.top as i32,
        layout.margin.bottom as i32,
        layout.margin.left as i32,
        layout.margin.right as i32,
    );

    let (dates, values) = match (figure.date_bounds(), figure.value_bounds()) {
        (Some((first, last)), Some((lo, hi))) => (date_range(first, last), value_range(lo, hi)),
        _ => {
            let body = root.titled(&layout.title, (FONT, font + 4.0).into_font().color(&TEXT_COLOR))?;
            let (w, h) = body.dim_in_pixel();
            body.draw(&Text::new(
                "No data for selected category",
                (w as i32 / 2, h as i32 / 2),
                (FONT, font)
                    .into_font()
                    .color(&MUTED_COLOR)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
            canvas.present()?;
            return Ok(());
        }
    };

    let x_axis: RangedDate<NaiveDate> = dates.into();
    let mut chart = ChartBuilder::on(&root)
        .caption(&layout.title, (FONT, font + 4.0).into_font().color(&TEXT_COLOR))
        .x_label_area_size(40u32)
        .y_label_area_size(50u32)
        .build_cartesian_2d(x_axis, values)?;

    chart
        .configure_mesh()
        .x_labels(X_LABELS)
        .y_labels(Y_LABELS)
        .x_label_formatter(&|date: &NaiveDate| date.format("%b %d").to_string())
        .y_label_formatter(&|value: &f64| format!("{:.0}", value))
        .light_line_style(WHITE)
        .bold_line_style(GRID_COLOR)
        .x_desc(layout.x_title)
        .y_desc(layout.y_title)
        .axis_desc_style((FONT, font).into_font().color(&TEXT_COLOR))
        .label_style((FONT, font - 2.0).into_font().color(&TEXT_COLOR))
        .draw()?;

    for series in &figure.series {
        let color = series_color(&series.color);
        let points: Vec<(NaiveDate, f64)> =
            series.points.iter().map(|p| (p.date, p.value)).collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(series.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        if layout.markers {
            chart.draw_series(PointSeries::of_element(
                points,
                MARKER_SIZE,
                color.filled(),
                &|coord: (NaiveDate, f64), size: i32, style: ShapeStyle| {
                    EmptyElement::at(coord) + Circle::new((0, 0), size, style)
                },
            ))?;
        }
    }

    let (plot_width, _) = chart.plotting_area().dim_in_pixel();
    let legend_x = plot_width as i32 - LEGEND_WIDTH;
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::Coordinate(legend_x, LEGEND_TOP + font as i32 + 6))
        .label_font((FONT, font).into_font().color(&TEXT_COLOR))
        .background_style(WHITE.mix(0.8))
        .border_style(GRID_COLOR)
        .draw()?;

    // Legend title sits above the series labels, in canvas coordinates
    let (base_x, base_y) = chart.plotting_area().get_base_pixel();
    canvas.draw(&Text::new(
        layout.legend_title,
        (base_x + legend_x, base_y + LEGEND_TOP),
        (FONT, font).into_font().color(&TEXT_COLOR),
    ))?;

    canvas.present()?;
    Ok(())
}

/// One day of padding on each side keeps edge markers inside the frame
fn date_range(first: NaiveDate, last: NaiveDate) -> Range<NaiveDate> {
    (first - Duration::days(1))..(last + Duration::days(1))
}

/// Ten percent of the spread on each side, or one point for a flat series
fn value_range(lo: f64, hi: f64) -> Range<f64> {
    let spread = hi - lo;
    let padding = if spread > 0.0 { spread * 0.1 } else { 1.0 };
    (lo - padding)..(hi + padding)
}

/// "#rrggbb" to a plotters color, black when malformed
fn series_color(hex: &str) -> RGBColor {
    let channel = |range: Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
    };
    match (hex.len(), channel(1..3), channel(3..5), channel(5..7)) {
        (7, Some(r), Some(g), Some(b)) if hex.starts_with('#') => RGBColor(r, g, b),
        _ => BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polls::{AggregateRow, Selection};

    fn agg(m: u32, d: u32, yes: f64, no: f64) -> AggregateRow {
        AggregateRow {
            category: Some("Economy".to_string()),
            end_date: NaiveDate::from_ymd_opt(2025, m, d).unwrap(),
            yes,
            no,
            net: yes - no,
        }
    }

    #[test]
    fn test_render_contains_styling() {
        let rows = [agg(1, 10, 40.0, 50.0), agg(1, 17, 42.0, 49.0), agg(2, 1, 39.0, 55.0)];
        let fig = TrendFigure::build(&Selection::parse("Economy"), &rows);
        let svg = render_svg(&fig).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Poll Trend for Economy"));
        assert!(svg.contains("Percentage (%)"));
        assert!(svg.contains("Date"));
        assert!(svg.contains("Response"));

        let lower = svg.to_lowercase();
        assert!(lower.contains("#636efa"));
        assert!(lower.contains("#ef553b"));

        // Three markers per series
        assert_eq!(svg.matches("<circle").count(), 6);
    }

    #[test]
    fn test_render_single_date() {
        let fig = TrendFigure::build(&Selection::All, &[agg(1, 10, 40.0, 40.0)]);
        let svg = render_svg(&fig).unwrap();
        assert!(!svg.contains("NaN"));
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn test_render_empty() {
        let fig = TrendFigure::build(&Selection::parse("Nothing"), &[]);
        let svg = render_svg(&fig).unwrap();
        assert!(svg.contains("Poll Trend for Nothing"));
        assert!(svg.contains("No data for selected category"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn test_title_is_escaped() {
        let fig = TrendFigure::build(&Selection::parse("Law & <Order>"), &[]);
        let svg = render_svg(&fig).unwrap();
        assert!(svg.contains("Law &amp;"));
        assert!(!svg.contains("<Order>"));
    }

    #[test]
    fn test_padded_ranges() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let dates = date_range(day, day);
        assert_eq!(dates.start, NaiveDate::from_ymd_opt(2025, 1, 9).unwrap());
        assert_eq!(dates.end, NaiveDate::from_ymd_opt(2025, 1, 11).unwrap());

        assert_eq!(value_range(40.0, 40.0), 39.0..41.0);
        assert_eq!(value_range(40.0, 50.0), 39.0..51.0);
    }

    #[test]
    fn test_series_color() {
        assert_eq!(series_color("#636efa"), RGBColor(0x63, 0x6e, 0xfa));
        assert_eq!(series_color("#EF553B"), RGBColor(0xef, 0x55, 0x3b));
        assert_eq!(series_color("red"), BLACK);
        assert_eq!(series_color("#12345"), BLACK);
    }
}
