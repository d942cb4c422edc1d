use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{ChartForm, ChartStyle, Granularity, ValidatedForm};

/// Date format accepted on the form
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// First failing check of a form submission; `Display` is the text shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid stock symbol.")]
    InvalidSymbol,
    #[error("Invalid chart type. Choose line or bar.")]
    InvalidChartType,
    #[error("Invalid time series option.")]
    InvalidTimeSeries,
    #[error("Invalid start date.")]
    InvalidStartDate,
    #[error("Invalid end date.")]
    InvalidEndDate,
    #[error("End date must be after start date.")]
    EndBeforeStart,
}

/// Outcome of parsing one date field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParse {
    Parsed(NaiveDate),
    Invalid(String),
}

/// Parse a `YYYY-MM-DD` form value
pub fn parse_form_date(value: Option<&str>) -> DateParse {
    match value {
        None => DateParse::Invalid("missing".to_string()),
        // chrono tolerates a sign and leading whitespace; the form must not
        Some(raw) if !is_plain_date(raw) => DateParse::Invalid(format!("{:?}: not YYYY-MM-DD", raw)),
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => DateParse::Parsed(date),
            Err(e) => DateParse::Invalid(format!("{:?}: {}", raw, e)),
        },
    }
}

fn is_plain_date(raw: &str) -> bool {
    raw.as_bytes().first().is_some_and(u8::is_ascii_digit)
        && raw.bytes().all(|b| b.is_ascii_digit() || b == b'-')
}

/// Check the form fields in order, stopping at the first failure:
/// symbol, chart type, time series, start date, end date, date order.
pub fn validate_form(form: &ChartForm, symbols: &[String]) -> Result<ValidatedForm, ValidationError> {
    let symbol = form
        .symbol
        .as_deref()
        .filter(|s| symbols.iter().any(|known| known.as_str() == *s))
        .ok_or(ValidationError::InvalidSymbol)?;

    let style = form
        .chart_type
        .as_deref()
        .and_then(ChartStyle::from_tag)
        .ok_or(ValidationError::InvalidChartType)?;

    let granularity = form
        .time_series
        .as_deref()
        .and_then(Granularity::from_tag)
        .ok_or(ValidationError::InvalidTimeSeries)?;

    let start = match parse_form_date(form.start_date.as_deref()) {
        DateParse::Parsed(date) => date,
        DateParse::Invalid(reason) => {
            tracing::debug!("Rejected start date {}", reason);
            return Err(ValidationError::InvalidStartDate);
        }
    };

    let end = match parse_form_date(form.end_date.as_deref()) {
        DateParse::Parsed(date) => date,
        DateParse::Invalid(reason) => {
            tracing::debug!("Rejected end date {}", reason);
            return Err(ValidationError::InvalidEndDate);
        }
    };

    if end < start {
        return Err(ValidationError::EndBeforeStart);
    }

    Ok(ValidatedForm {
        symbol: symbol.to_string(),
        style,
        granularity,
        start,
        end,
    })
}
