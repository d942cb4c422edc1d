use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use plotters::prelude::*;
use thiserror::Error;

use crate::models::{ChartArtifact, ChartSpec, ChartStyle, PricePoint, TimeSeries, HIGH_FIELD};

/// Canvas size of the rendered SVG
pub const CHART_WIDTH: u32 = 1024;
pub const CHART_HEIGHT: u32 = 600;

const SERIES_LABEL: &str = "High";
const MAX_X_LABELS: usize = 12;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("record for {date} has no usable high price: {value:?}")]
    InvalidPrice { date: String, value: Option<String> },
    #[error("failed to prepare chart directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render chart: {0}")]
    Render(String),
}

/// Keep dates within `[start, end]`, oldest first, with their high price.
///
/// Dates compare as ISO 8601 strings, which matches chronological order.
pub fn filter_high_series(series: &TimeSeries, start: &str, end: &str) -> Result<Vec<PricePoint>, ChartError> {
    if start > end {
        return Ok(Vec::new());
    }

    // BTreeMap iteration is already ascending by key
    series
        .range(start.to_string()..=end.to_string())
        .map(|(date, record)| -> Result<PricePoint, ChartError> {
            let raw = record.get(HIGH_FIELD);
            let high = raw
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| ChartError::InvalidPrice { date: date.clone(), value: raw.cloned() })?;
            Ok(PricePoint { date: date.clone(), high })
        })
        .collect()
}

/// Title shown above the chart
pub fn chart_title(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{} High Price ({} → {})",
        symbol.to_uppercase(),
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

/// Filter the fetched series and describe the chart to draw
pub fn build_chart_spec(
    style: ChartStyle,
    symbol: &str,
    series: &TimeSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ChartSpec, ChartError> {
    let start_key = start.format("%Y-%m-%d").to_string();
    let end_key = end.format("%Y-%m-%d").to_string();
    let points = filter_high_series(series, &start_key, &end_key)?;

    Ok(ChartSpec {
        style,
        title: chart_title(symbol, start, end),
        series_label: SERIES_LABEL.to_string(),
        points,
    })
}

/// Pick a fresh artifact path under `chart_dir` and the URL it is served at
pub fn new_artifact(chart_dir: &Path, url_prefix: &str) -> ChartArtifact {
    let file_name = format!("chart-{}.svg", uuid::Uuid::new_v4());
    ChartArtifact {
        path: chart_dir.join(&file_name),
        url: format!("{}/{}", url_prefix.trim_end_matches('/'), file_name),
    }
}

/// Draw `spec` as an SVG file at `path`, replacing anything already there.
/// An empty series still produces a chart with empty axes.
pub fn render_chart(spec: &ChartSpec, path: &Path) -> Result<(), ChartError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ChartError::Io { path: dir.to_path_buf(), source })?;
    }

    let points = &spec.points;
    let backend = SVGBackend::new(path, (CHART_WIDTH, CHART_HEIGHT));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

    let (y_min, y_max) = price_bounds(points, spec.style);
    // Segments need at least one slot even when there is nothing to draw
    let slots = points.len().max(1) as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 28.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..slots).into_segmented(), y_min..y_max)
        .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

    let date_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| points.get(i))
            .map(|p| p.date.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .x_labels(points.len().clamp(1, MAX_X_LABELS))
        .x_label_formatter(&date_label)
        .x_desc("Date")
        .y_desc("Price")
        .disable_x_mesh()
        .draw()
        .map_err(|e| ChartError::Render(format!("Failed to draw mesh: {}", e)))?;

    let color = BLUE;
    match spec.style {
        ChartStyle::Line => {
            chart
                .draw_series(LineSeries::new(
                    points.iter().enumerate().map(|(i, p)| (SegmentValue::CenterOf(i as i32), p.high)),
                    &color,
                ))
                .map_err(|e| ChartError::Render(format!("Failed to draw line: {}", e)))?
                .label(spec.series_label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
        ChartStyle::Bar => {
            chart
                .draw_series(points.iter().enumerate().map(|(i, p)| {
                    let i = i as i32;
                    let mut bar = Rectangle::new(
                        [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), p.high)],
                        color.filled(),
                    );
                    bar.set_margin(0, 0, 3, 3);
                    bar
                }))
                .map_err(|e| ChartError::Render(format!("Failed to draw bars: {}", e)))?
                .label(spec.series_label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
        }
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ChartError::Render(format!("Failed to draw legend: {}", e)))?;

    root.present()
        .map_err(|e| ChartError::Render(format!("Failed to render chart: {}", e)))?;

    tracing::debug!("Rendered {} points to {}", points.len(), path.display());
    Ok(())
}

/// Run `render_chart` on the blocking pool so plotters and file I/O stay off
/// the request task
pub async fn render_chart_blocking(spec: ChartSpec, path: PathBuf) -> Result<(), ChartError> {
    tokio::task::spawn_blocking(move || render_chart(&spec, &path))
        .await
        .map_err(|e| ChartError::Render(format!("Render task failed: {}", e)))?
}

/// Y-axis range with some padding; bars always start at zero
fn price_bounds(points: &[PricePoint], style: ChartStyle) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 1.0);
    }

    let min_price = points.iter().map(|p| p.high).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|p| p.high).fold(f64::NEG_INFINITY, f64::max);

    let price_range = (max_price - min_price).max(max_price.abs() * 0.1).max(1e-8);
    let padding = price_range * 0.1;
    let y_max = max_price + padding;
    let y_min = match style {
        ChartStyle::Bar => 0.0_f64.min(min_price),
        ChartStyle::Line => (min_price - padding).max(0.0),
    };
    (y_min, y_max)
}

/// Remove a rendered chart once the page had time to load it
pub fn schedule_cleanup(path: PathBuf, retention: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(retention).await;
        match tokio::fs::remove_file(&path).await {
            Ok(_) => tracing::debug!("Chart file deleted: {}", path.display()),
            Err(e) => tracing::warn!("Failed to delete chart file {}: {}", path.display(), e),
        }
    });
}
