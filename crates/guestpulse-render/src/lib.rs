#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! SVG chart artifacts for the analytics reports.
//!
//! Charts consume the engine's series types as they are; nothing is
//! recomputed here. Each renderer writes one standalone SVG file.

use std::fmt::Display;
use std::path::Path;

use guestpulse_analytics::{Granularity, RatingLengthPoint, TrendPoint, TrendReport};
use plotters::prelude::*;
use thiserror::Error;

/// Canvas size shared by every chart artifact.
const CANVAS: (u32, u32) = (1024, 640);

/// Rendering failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The report or sample carried nothing to draw.
    #[error("no data to plot")]
    NoData,
    /// The drawing backend rejected the chart.
    #[error("chart drawing failed: {0}")]
    Draw(String),
}

fn draw_failure(err: impl Display) -> RenderError {
    RenderError::Draw(err.to_string())
}

/// Draws a sentiment trend line chart to `out_path`.
///
/// A [`TrendReport::NoData`] report (or an empty series) is a
/// [`RenderError::NoData`] failure; no file is written in that case.
pub fn render_trend(report: &TrendReport, out_path: impl AsRef<Path>) -> Result<(), RenderError> {
    let TrendReport::Series {
        granularity,
        points,
    } = report
    else {
        return Err(RenderError::NoData);
    };
    if points.is_empty() {
        return Err(RenderError::NoData);
    }
    draw_trend(*granularity, points, out_path.as_ref())
}

/// Draws a rating-vs-length scatter chart to `out_path`.
///
/// The caption carries the Pearson coefficient when one exists, so the
/// artifact is self-describing even for a degenerate sample.
pub fn render_scatter(
    sample: &[RatingLengthPoint],
    pearson_r: Option<f64>,
    out_path: impl AsRef<Path>,
) -> Result<(), RenderError> {
    if sample.is_empty() {
        return Err(RenderError::NoData);
    }
    draw_scatter(sample, pearson_r, out_path.as_ref())
}

fn draw_trend(
    granularity: Granularity,
    points: &[TrendPoint],
    out_path: &Path,
) -> Result<(), RenderError> {
    let labels: Vec<&str> = points.iter().map(|p| p.bucket.as_str()).collect();
    let series: Vec<(i32, f64)> = points
        .iter()
        .enumerate()
        .map(|(idx, p)| (idx as i32, p.average_polarity))
        .collect();

    let (y_min, y_max) = padded_bounds(series.iter().map(|(_, y)| *y));
    let x_max = (series.len() as i32 - 1).max(1);

    let root = SVGBackend::new(out_path, CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(draw_failure)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Sentiment trend ({granularity})"),
            ("sans-serif", 28),
        )
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(0..x_max, y_min..y_max)
        .map_err(draw_failure)?;

    chart
        .configure_mesh()
        .x_labels(labels.len().min(12))
        .x_label_formatter(&|idx| {
            labels
                .get(*idx as usize)
                .map_or_else(String::new, |label| (*label).to_string())
        })
        .x_desc("Bucket")
        .y_desc("Average polarity")
        .draw()
        .map_err(draw_failure)?;

    chart
        .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
        .map_err(draw_failure)?;
    chart
        .draw_series(
            series
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 3, BLUE.filled())),
        )
        .map_err(draw_failure)?;

    root.present().map_err(draw_failure)
}

fn draw_scatter(
    sample: &[RatingLengthPoint],
    pearson_r: Option<f64>,
    out_path: &Path,
) -> Result<(), RenderError> {
    let caption = pearson_r.map_or_else(
        || "Rating vs review length (r undefined)".to_string(),
        |r| format!("Rating vs review length (r = {r:.4})"),
    );

    let longest = sample.iter().map(|p| p.letter_count).max().unwrap_or(1) as i32;
    let x_max = longest + (longest / 20).max(1);
    let y_min = sample.iter().map(|p| p.rating).min().unwrap_or(1) - 1;
    let y_max = sample.iter().map(|p| p.rating).max().unwrap_or(5) + 1;

    let root = SVGBackend::new(out_path, CANVAS).into_drawing_area();
    root.fill(&WHITE).map_err(draw_failure)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(0..x_max, y_min..y_max)
        .map_err(draw_failure)?;

    chart
        .configure_mesh()
        .x_desc("Letter count")
        .y_desc("Rating")
        .draw()
        .map_err(draw_failure)?;

    chart
        .draw_series(
            sample
                .iter()
                .map(|p| Circle::new((p.letter_count as i32, p.rating), 4, RED.mix(0.5).filled())),
        )
        .map_err(draw_failure)?;

    root.present().map_err(draw_failure)
}

fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in values {
        min = min.min(value);
        max = max.max(value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.1).max(0.05);
    (min - pad, max + pad)
}
