use serde_json::Value;
use thiserror::Error;

use crate::models::{PriceRecord, TimeSeries};

/// Keys Alpha Vantage uses instead of data when it refuses a request
pub const NOTE_KEY: &str = "Note";
pub const INFORMATION_KEY: &str = "Information";
pub const ERROR_MESSAGE_KEY: &str = "Error Message";

/// Comprehensive error type for API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Expected series key absent and no explanation given
    #[error("No data in response")]
    NoData,
    /// Throttled, or the API key was refused
    #[error("Rate Limited: {0}")]
    RateLimited(String),
    /// The API rejected the query (usually an unknown symbol)
    #[error("Rejected: {0}")]
    Rejected(String),
    /// Non-2xx status
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Body was not JSON or the series had an unexpected shape
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

/// Pull the nested series out of a decoded response body
pub fn extract_time_series(body: &Value, response_key: &str) -> Result<TimeSeries, ApiError> {
    if let Some(series) = body.get(response_key) {
        return parse_series(series);
    }

    let message = |key: &str| body.get(key).map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()));

    if let Some(note) = message(NOTE_KEY).or_else(|| message(INFORMATION_KEY)) {
        return Err(ApiError::RateLimited(note));
    }
    if let Some(reason) = message(ERROR_MESSAGE_KEY) {
        return Err(ApiError::Rejected(reason));
    }
    Err(ApiError::NoData)
}

fn parse_series(series: &Value) -> Result<TimeSeries, ApiError> {
    let dates = series
        .as_object()
        .ok_or_else(|| ApiError::DeserializationError("time series is not an object".to_string()))?;

    let mut parsed = TimeSeries::new();
    for (date, record) in dates {
        let fields = record.as_object().ok_or_else(|| {
            ApiError::DeserializationError(format!("record for {} is not an object", date))
        })?;

        // Values are strings in practice; numbers are tolerated
        let record: PriceRecord = fields
            .iter()
            .map(|(name, value)| {
                let text = value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string());
                (name.clone(), text)
            })
            .collect();
        parsed.insert(date.clone(), record);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_series_under_expected_key() {
        let body = json!({
            "Meta Data": {"2. Symbol": "IBM"},
            "Weekly Time Series": {
                "2024-01-05": {"1. open": "10.0", "2. high": "12.5", "5. volume": 1200}
            }
        });

        let series = extract_time_series(&body, "Weekly Time Series").unwrap();
        let record = &series["2024-01-05"];
        assert_eq!(record["2. high"], "12.5");
        assert_eq!(record["5. volume"], "1200");
    }

    #[test]
    fn key_for_another_granularity_is_no_data() {
        let body = json!({"Weekly Time Series": {}});
        assert!(matches!(
            extract_time_series(&body, "Time Series (Daily)"),
            Err(ApiError::NoData)
        ));
    }

    #[test]
    fn throttle_notes_are_rate_limits() {
        let note = json!({"Note": "Thank you for using Alpha Vantage! call frequency is 5 calls per minute"});
        let info = json!({"Information": "The **demo** API key is for demo purposes only."});
        assert!(matches!(extract_time_series(&note, "Weekly Time Series"), Err(ApiError::RateLimited(m)) if m.contains("5 calls")));
        assert!(matches!(extract_time_series(&info, "Weekly Time Series"), Err(ApiError::RateLimited(_))));
    }

    #[test]
    fn error_message_is_a_rejection() {
        let body = json!({"Error Message": "Invalid API call."});
        assert!(matches!(
            extract_time_series(&body, "Monthly Time Series"),
            Err(ApiError::Rejected(m)) if m == "Invalid API call."
        ));
    }

    #[test]
    fn malformed_series_is_a_deserialization_error() {
        let body = json!({"Monthly Time Series": ["2024-01-31"]});
        assert!(matches!(
            extract_time_series(&body, "Monthly Time Series"),
            Err(ApiError::DeserializationError(_))
        ));
    }
}
