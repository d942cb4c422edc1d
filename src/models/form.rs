//! Chart form models

use chrono::NaiveDate;
use serde::Deserialize;

use super::{ChartStyle, Granularity};

/// Raw form submission. Every field is optional so a missing field is
/// reported by validation instead of rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartForm {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub chart_type: Option<String>,
    #[serde(default)]
    pub time_series: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// A form that passed every check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub symbol: String,
    pub style: ChartStyle,
    pub granularity: Granularity,
    pub start: NaiveDate,
    pub end: NaiveDate,
}
