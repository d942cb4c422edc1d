use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod routes;
mod services;
mod utils;

use api::alphavantage::AlphaVantageClient;
use config::Config;
use routes::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("stock_chart_web=debug,tower_http=info,hyper=warn,reqwest=warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting stock chart server...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    info!("Symbol catalog: {}", config.catalog_path.display());
    info!("Chart directory: {}", config.chart_dir.display());

    if let Err(e) = tokio::fs::create_dir_all(&config.chart_dir).await {
        error!("Failed to create chart directory {}: {}", config.chart_dir.display(), e);
        return;
    }

    let client = match AlphaVantageClient::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return;
        }
    };

    let bind_addr = config.bind_addr;
    let app = routes::router(AppState {
        config: Arc::new(config),
        client,
    });

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_addr, e);
            return;
        }
    };
    info!("Listening on http://{}", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
