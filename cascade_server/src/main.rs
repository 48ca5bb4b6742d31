//! Cascade Server - Host page for the cascading test-selection form
//!
//! This server handles:
//! - Rendering the form with the endpoint rows for the selected test
//! - Re-rendering on every change of the primary test selector
//! - JSON views of the refresh result and the loaded form data

mod config;
mod routes;

use anyhow::Context;
use cascade_common::Severity;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cascade_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    match &config.data_file {
        Some(path) => tracing::info!("Loading form data from {}", path.display()),
        None => tracing::info!("No CASCADE_DATA set, using built-in sample data"),
    }

    let data = config
        .load_form_data()
        .context("Failed to load form data")?;
    tracing::info!(
        "Loaded {} tests, {} specs, row limit {}",
        data.tests.len(),
        data.specs.len(),
        data.row_limit
    );

    for issue in data.validate() {
        match issue.severity {
            Severity::Error => tracing::error!("Form data: {}", issue.message),
            Severity::Warning => tracing::warn!("Form data: {}", issue.message),
        }
    }

    let addr = config.bind_addr();
    let state = routes::AppState::new(config, data);
    let app = routes::app(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind to {}", addr))?;
    tracing::info!("Form server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
