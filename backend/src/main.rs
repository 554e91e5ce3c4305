//! Aerolytics - Aviation Weather Briefing Server
//!
//! Fetches METAR, TAF, PIREP, SIGMET and NOTAM text for airports, decodes
//! it, scores flight risk, and serves the resulting briefings over HTTP.

use axum::{routing::get, Router};
use shared::RiskEngine;
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::AviationWeatherClient;
use services::BriefingService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub briefings: Arc<BriefingService>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aerolytics_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;
    config.validate()?;

    tracing::info!("Starting Aerolytics briefing server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Upstream: {}", config.upstream.base_url);
    if config.notam.api_endpoint.is_none() {
        tracing::info!("No NOTAM endpoint configured, briefings will carry no NOTAMs");
    }

    let client = AviationWeatherClient::new(&config.upstream, config.notam.clone());
    let briefings = BriefingService::new(
        Arc::new(client),
        RiskEngine::new(config.risk.clone()),
        Duration::from_secs(config.upstream.timeout_secs),
    )
    .with_sigmet_areas(config.sigmet.areas.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        briefings: Arc::new(briefings),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Aerolytics Aviation Weather Briefing API v1"
}
