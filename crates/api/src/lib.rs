//! Noise Dashboard API Server
//!
//! REST endpoints for the noise-monitoring dashboard, plus the two-phase
//! startup that keeps the listener closed until the store is usable.

mod error;
mod routes;
mod settings;

pub use error::ApiError;
pub use settings::{ServerSettings, Settings};

use axum::{routing::get, Router};
use readiness::ensure_ready;
use std::sync::Arc;
use std::time::Duration;
use storage::MeasureStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Store handle, injected by the composition root
    pub store: Arc<MeasureStore>,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(routes::measures::list)
                .post(routes::measures::insert)
                .delete(routes::measures::delete_all),
        )
        .route("/live", get(routes::live::get_snapshot))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server.
///
/// Startup is two-phase: first block until the store answers a probe and
/// the schema exists, only then bind the listener. The port is never
/// open before the store is usable, so no request can race schema
/// initialization.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let store = Arc::new(MeasureStore::new(&settings.database)?);
    let retry_delay = Duration::from_secs(settings.database.retry_delay_secs);

    ensure_ready(
        || {
            let store = Arc::clone(&store);
            async move { store.ping().await }
        },
        retry_delay,
    )
    .await;
    info!("store reachable");

    let created = ensure_ready(
        || {
            let store = Arc::clone(&store);
            async move { store.ensure_schema().await }
        },
        retry_delay,
    )
    .await;
    if !created {
        info!("measures table already present");
    }

    let app = create_router(AppState { store });
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("server up and listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
