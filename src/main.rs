//! football-analytics server entry point.
//!
//! Starts the Axum HTTP server serving the analytics REST API and the
//! container health probes.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
#[cfg(feature = "swagger-ui")]
use utoipa::OpenApi;
#[cfg(feature = "swagger-ui")]
use utoipa_swagger_ui::SwaggerUi;

use football_analytics::api;
use football_analytics::app_state::AppState;
use football_analytics::config::AppConfig;
use football_analytics::persistence::MatchStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration (env, .env, SSM fallback)
    let config = AppConfig::load().await?;
    tracing::info!(addr = %config.listen_addr, "starting football-analytics");

    // Connect storage and make sure the schema exists
    let store = MatchStore::connect(&config).await?;
    store.ensure_schema().await?;

    let app_state = AppState { store };

    // Build router
    let app = Router::new().merge(api::build_router());

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::ApiDoc::openapi()),
    );

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
