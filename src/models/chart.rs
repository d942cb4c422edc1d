//! Chart generation models

use std::path::PathBuf;

/// Drawing style picked on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Line,
    Bar,
}

impl ChartStyle {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "line" => Some(ChartStyle::Line),
            "bar" => Some(ChartStyle::Bar),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ChartStyle::Line => "line",
            ChartStyle::Bar => "bar",
        }
    }
}

/// A single data point on a price chart
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub high: f64,
}

/// Everything needed to draw one chart, independent of the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub style: ChartStyle,
    pub title: String,
    pub series_label: String,
    pub points: Vec<PricePoint>,
}

/// A rendered chart on disk and the URL the page uses to show it
#[derive(Debug, Clone)]
pub struct ChartArtifact {
    pub path: PathBuf,
    pub url: String,
}
