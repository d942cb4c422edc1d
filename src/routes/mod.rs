use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::api::alphavantage::AlphaVantageClient;
use crate::config::Config;
use crate::services::submission_service::CHART_URL_PREFIX;

pub mod index;

/// Shared by every request; built once in `main`
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: AlphaVantageClient,
}

/// `/` for the form, plus the rendered charts as static files
pub fn router(state: AppState) -> Router {
    let charts = ServeDir::new(&state.config.chart_dir);
    Router::new()
        .route("/", get(index::show_form).post(index::submit_form))
        .nest_service(CHART_URL_PREFIX, charts)
        .with_state(state)
}
