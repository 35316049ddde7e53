use actix_web::{App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::{AppError, AppState};
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (config, state) = match initialize() {
        Ok(initialized) => initialized,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize application");
            return Err(std::io::Error::other(e));
        }
    };
    let bind_addr = config.bind_addr();
    let analysis_service = state.analysis_service;

    tracing::info!("Starting Contract Analyzer server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(analysis_service.clone())
            .configure(api::health::configure)
            .configure(api::analysis::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}

/// Load configuration and build services; any failure here is fatal
fn initialize() -> Result<(Config, AppState), AppError> {
    let config = Config::from_env()?;
    let state = AppState::new(&config)?;
    Ok((config, state))
}
