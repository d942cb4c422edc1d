use std::time::Duration;

use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{extract_time_series, ApiError};
use crate::config::Config;
use crate::models::{Granularity, TimeSeries};

/// Alpha Vantage API client for historical price series
#[derive(Clone)]
pub struct AlphaVantageClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a client from the process config
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::with_base_url(config.api_key.clone(), config.api_base_url.clone(), config.http_timeout)
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn query_url(&self, symbol: &str, granularity: Granularity) -> String {
        format!(
            "{}/query?function={}&symbol={}&apikey={}",
            self.base_url,
            granularity.function_name(),
            urlencoding::encode(symbol),
            urlencoding::encode(&self.api_key)
        )
    }

    /// GET /query?function=TIME_SERIES_*
    ///
    /// One attempt, no retry. The response is considered empty unless it
    /// carries the series key matching `granularity`.
    pub async fn fetch_time_series(
        &self,
        symbol: &str,
        granularity: Granularity,
    ) -> Result<TimeSeries, ApiError> {
        let url = self.query_url(symbol, granularity);
        debug!("Requesting {} series for {}", granularity, symbol);

        let response = self.http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            warn!("Alpha Vantage returned status {}", status);
            return Err(ApiError::HttpError(status.as_u16(), body_text));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        let series = extract_time_series(&body, granularity.response_key())?;
        debug!("Received {} {} records for {}", series.len(), granularity, symbol);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;

    /// Serve `router` on an ephemeral port and return its base URL
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> AlphaVantageClient {
        AlphaVantageClient::with_base_url("test-key".to_string(), base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn query_url_carries_function_symbol_and_key() {
        let client = client_for("https://example.test/".to_string());
        assert_eq!(
            client.query_url("BRK.B", Granularity::Monthly),
            "https://example.test/query?function=TIME_SERIES_MONTHLY&symbol=BRK.B&apikey=test-key"
        );
        assert!(client.query_url("A&B", Granularity::Daily).contains("symbol=A%26B"));
    }

    #[tokio::test]
    async fn fetches_series_for_requested_granularity() {
        let router = Router::new().route(
            "/query",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params["function"], "TIME_SERIES_WEEKLY");
                assert_eq!(params["symbol"], "IBM");
                assert_eq!(params["apikey"], "test-key");
                axum::Json(serde_json::json!({
                    "Weekly Time Series": {
                        "2024-01-05": {"2. high": "12.5"},
                        "2024-01-12": {"2. high": "13.0"}
                    }
                }))
            }),
        );
        let client = client_for(spawn_stub(router).await);

        let series = client.fetch_time_series("IBM", Granularity::Weekly).await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series["2024-01-12"]["2. high"], "13.0");
    }

    #[tokio::test]
    async fn rate_limit_note_is_reported() {
        let router = Router::new().route(
            "/query",
            get(|| async { axum::Json(serde_json::json!({"Note": "call frequency exceeded"})) }),
        );
        let client = client_for(spawn_stub(router).await);

        let result = client.fetch_time_series("IBM", Granularity::Daily).await;
        assert!(matches!(result, Err(ApiError::RateLimited(_))));
    }

    #[tokio::test]
    async fn non_json_body_is_a_deserialization_error() {
        let router = Router::new().route("/query", get(|| async { "<html>maintenance</html>" }));
        let client = client_for(spawn_stub(router).await);

        let result = client.fetch_time_series("IBM", Granularity::Daily).await;
        assert!(matches!(result, Err(ApiError::DeserializationError(_))));
    }

    #[tokio::test]
    async fn server_error_status_is_reported() {
        let router = Router::new().route(
            "/query",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let client = client_for(spawn_stub(router).await);

        let result = client.fetch_time_series("IBM", Granularity::Daily).await;
        assert!(matches!(result, Err(ApiError::HttpError(502, body)) if body == "upstream down"));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        // Bind then drop so the port is closed
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(format!("http://{}", addr));

        let result = client.fetch_time_series("IBM", Granularity::Daily).await;
        assert!(matches!(result, Err(ApiError::RequestError(_))));
    }
}
