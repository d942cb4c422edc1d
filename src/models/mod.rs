//! Data models for the chart form and its services

pub mod chart;
pub mod form;
pub mod time_series;

pub use chart::{ChartArtifact, ChartSpec, ChartStyle, PricePoint};
pub use form::{ChartForm, ValidatedForm};
pub use time_series::{Granularity, PriceRecord, TimeSeries, HIGH_FIELD};
