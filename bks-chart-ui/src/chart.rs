//! Price charts rendered to SVG strings with `plotters`.
//!
//! Binning is a plain function; `histogram_svg` and `scatter_svg` draw on an
//! `SVGBackend` and return the markup that the
//! [`ChartContainer`](crate::components::ChartContainer) injects into the page.

use plotters::prelude::*;
use std::ops::Range;

/// Chart size in pixels.
pub const SIZE: (u32, u32) = (640, 360);
/// Bin count for the price histogram.
pub const HISTOGRAM_BINS: usize = 50;

pub const PRICE_AXIS: &str = "Price (USD)";
pub const COUNT_AXIS: &str = "Number of books";
pub const YEAR_AXIS: &str = "Publication Year";

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const POINT_COLOR: RGBColor = RGBColor(255, 127, 14);

/// One histogram bucket, covering `[lower, upper)`; the last bin is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Split `values` into `bins` equal-width buckets spanning their range.
///
/// Non-finite values are ignored. When every value is equal the range is
/// widened by 0.5 on each side. Returns an empty vector when there is
/// nothing to bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut min, mut max) = extent(&finite);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in finite {
        let index = (((v - min) / width).floor() as usize).min(bins - 1);
        out[index].count += 1;
    }
    out
}

/// Smallest and largest of a non-empty slice.
fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Axis range covering `values` with 5% headroom on each side.
///
/// A single distinct value is widened by 1 each way; no finite values
/// gives `0..1`.
fn padded_range(values: &[f64]) -> Range<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return 0.0..1.0;
    }
    let (lo, hi) = extent(&finite);
    if lo == hi {
        return lo - 1.0..hi + 1.0;
    }
    let pad = (hi - lo) * 0.05;
    lo - pad..hi + pad
}

/// A book on the price-vs-year scatter plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub year: f64,
    pub price: f64,
}

/// Draw the price histogram. Empty bins draw no bar.
pub fn histogram_svg(bins: &[Bin]) -> anyhow::Result<String> {
    let mut svg = String::new();
    draw_histogram(bins, &mut svg)
        .map_err(|e| anyhow::anyhow!("Failed to draw price histogram: {}", e))?;
    Ok(svg)
}

fn draw_histogram<'a>(bins: &[Bin], svg: &'a mut String) -> DrawResult<(), SVGBackend<'a>> {
    let root = SVGBackend::with_string(svg, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let bin_count = bins.len().max(1) as u32;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as u32;

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(48)
        .build_cartesian_2d((0u32..bin_count).into_segmented(), 0u32..max_count + 1)?;

    let price_label = |value: &SegmentValue<u32>| -> String {
        let price = match value {
            SegmentValue::Exact(i) => bins.get(*i as usize).map(|b| b.lower),
            SegmentValue::CenterOf(i) => bins.get(*i as usize).map(|b| (b.lower + b.upper) / 2.0),
            SegmentValue::Last => bins.last().map(|b| b.upper),
        };
        price.map(|p| format!("{:.2}", p)).unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(10)
        .x_label_formatter(&price_label)
        .x_desc(PRICE_AXIS)
        .y_desc(COUNT_AXIS)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BAR_COLOR.filled())
            .margin(1)
            .data(
                bins.iter()
                    .enumerate()
                    .filter(|(_, b)| b.count > 0)
                    .map(|(i, b)| (i as u32, b.count as u32)),
            ),
    )?;

    root.present()?;
    Ok(())
}

/// Draw price against publication year, one circle per book.
pub fn scatter_svg(points: &[ScatterPoint]) -> anyhow::Result<String> {
    let mut svg = String::new();
    draw_scatter(points, &mut svg)
        .map_err(|e| anyhow::anyhow!("Failed to draw price scatter plot: {}", e))?;
    Ok(svg)
}

fn draw_scatter<'a>(points: &[ScatterPoint], svg: &'a mut String) -> DrawResult<(), SVGBackend<'a>> {
    let root = SVGBackend::with_string(svg, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let years: Vec<f64> = points.iter().map(|p| p.year).collect();
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(padded_range(&years), padded_range(&prices))?;

    chart
        .configure_mesh()
        .x_label_formatter(&|year: &f64| format!("{:.0}", year))
        .y_label_formatter(&|price: &f64| format!("{:.2}", price))
        .x_desc(YEAR_AXIS)
        .y_desc(PRICE_AXIS)
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new((p.year, p.price), 4, POINT_COLOR.mix(0.7).filled())),
    )?;

    root.present()?;
    Ok(())
}
