//! CrewDesk Backend
//!
//! REST backend for workforce management: companies, contractors, departments,
//! worker records, and bulk roster ingestion from spreadsheets or remote sheets.

mod api;
mod config;
mod db;
mod errors;
mod export;
mod ingest;
mod models;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use ingest::sheets::{GoogleSheetClient, SheetService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub sheets: Arc<dyn SheetService>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CrewDesk Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if !config.sheets_credentials_path.exists() {
        tracing::warn!(
            "No sheet credential at {:?}; remote sheet imports will fail until one is provided",
            config.sheets_credentials_path
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Remote sheet client using the stored service credential
    let sheets: Arc<dyn SheetService> = Arc::new(GoogleSheetClient::new(
        config.sheets_credentials_path.clone(),
    ));

    // Create application state
    let state = AppState { repo, sheets };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Companies
        .route("/companies", get(api::list_companies))
        .route("/companies", post(api::create_company))
        .route("/companies/{id}", get(api::get_company))
        // Contractors
        .route("/companies/{id}/contractors", get(api::list_contractors))
        .route("/companies/{id}/contractors", post(api::create_contractor))
        // Departments
        .route("/departments", get(api::list_departments))
        // Workers
        .route("/companies/{id}/workers", get(api::list_workers))
        .route("/companies/{id}/workers", post(api::create_worker))
        .route("/companies/{id}/workers/import", post(api::import_roster))
        .route("/companies/{id}/workers/export", get(api::export_workers))
        .route("/workers/{id}", get(api::get_worker))
        .route("/workers/{id}", delete(api::delete_worker));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
