use thiserror::Error;
use tracing::{info, warn};

use super::chart_service::{self, ChartError};
use super::form_service::{self, ValidationError};
use crate::api::alphavantage::{AlphaVantageClient, ApiError};
use crate::config::Config;
use crate::models::{ChartArtifact, ChartForm};

/// URL prefix under which the chart directory is served
pub const CHART_URL_PREFIX: &str = "/static/charts";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("fetch failed: {0}")]
    Fetch(#[from] ApiError),
    #[error("chart failed: {0}")]
    Chart(#[from] ChartError),
}

impl SubmissionError {
    /// Text shown on the page for this failure
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Validation(e) => e.to_string(),
            SubmissionError::Fetch(ApiError::NoData) | SubmissionError::Fetch(ApiError::Rejected(_)) => {
                "API returned no data. Try another symbol or time series.".to_string()
            }
            SubmissionError::Fetch(ApiError::RateLimited(_)) => {
                "API rate limit reached or API key rejected. Try again later.".to_string()
            }
            SubmissionError::Fetch(_) => "Could not reach the market data API. Try again later.".to_string(),
            SubmissionError::Chart(_) => "Chart generation failed.".to_string(),
        }
    }
}

/// Validate a submission, fetch its series and render the chart.
///
/// Returns the artifact written for this request; nothing is written
/// when any step fails.
pub async fn process_submission(
    config: &Config,
    client: &AlphaVantageClient,
    form: &ChartForm,
    symbols: &[String],
) -> Result<ChartArtifact, SubmissionError> {
    let validated = form_service::validate_form(form, symbols)?;
    info!(
        "Chart requested: {} {} {} {}..{}",
        validated.symbol, validated.style.tag(), validated.granularity, validated.start, validated.end
    );

    let series = client
        .fetch_time_series(&validated.symbol, validated.granularity)
        .await
        .map_err(|e| {
            warn!("Time series fetch for {} failed: {}", validated.symbol, e);
            e
        })?;

    let spec = chart_service::build_chart_spec(
        validated.style,
        &validated.symbol,
        &series,
        validated.start,
        validated.end,
    )?;

    let artifact = chart_service::new_artifact(&config.chart_dir, CHART_URL_PREFIX);
    let point_count = spec.points.len();
    chart_service::render_chart_blocking(spec, artifact.path.clone()).await?;
    chart_service::schedule_cleanup(artifact.path.clone(), config.chart_retention);

    info!("✓ Chart for {} written to {} ({} points)", validated.symbol, artifact.path.display(), point_count);
    Ok(artifact)
}
