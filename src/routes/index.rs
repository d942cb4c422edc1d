use axum::extract::{Form, State};
use axum::response::Html;
use tracing::{debug, error};

use super::AppState;
use crate::models::ChartForm;
use crate::services::catalog_service;
use crate::services::submission_service::{self, SubmissionError};
use crate::utils::Page;

const CATALOG_UNAVAILABLE: &str = "Symbol catalog is unavailable.";

/// Catalog is re-read on every request so edits show up without a restart
fn load_catalog(state: &AppState) -> Option<Vec<String>> {
    match catalog_service::load_symbols(&state.config.catalog_path) {
        Ok(symbols) => Some(symbols),
        Err(e) => {
            error!("Symbol catalog error: {}", e);
            None
        }
    }
}

/// GET / - empty form
pub async fn show_form(State(state): State<AppState>) -> Html<String> {
    let form = ChartForm::default();
    match load_catalog(&state) {
        Some(symbols) => Html(Page::new(&symbols, &form).render()),
        None => Html(Page::new(&[], &form).with_error(CATALOG_UNAVAILABLE).render()),
    }
}

/// POST / - validate, fetch and chart
pub async fn submit_form(State(state): State<AppState>, Form(form): Form<ChartForm>) -> Html<String> {
    debug!("Form submitted: {:?}", form);

    let Some(symbols) = load_catalog(&state) else {
        return Html(Page::new(&[], &form).with_error(CATALOG_UNAVAILABLE).render());
    };

    let page = Page::new(&symbols, &form);
    let page = match submission_service::process_submission(&state.config, &state.client, &form, &symbols).await {
        Ok(artifact) => page.with_chart(artifact.url),
        Err(e) => {
            match &e {
                SubmissionError::Validation(v) => debug!("Validation failed: {}", v),
                other => error!("Chart request failed: {}", other),
            }
            page.with_error(e.user_message())
        }
    };
    Html(page.render())
}
