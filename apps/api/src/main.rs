use std::sync::Arc;
use axum::{extract::Request, ServiceExt};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::cors::{CorsLayer, Any};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use shared_config::{AppConfig, StoreBackend};
use shared_database::{AppState, InMemoryStore, RecordStore, SupabaseClient};

fn build_store(config: &AppConfig) -> Arc<dyn RecordStore> {
    match config.store_backend {
        StoreBackend::Supabase if config.is_configured() => {
            info!("Using PostgREST store at {}", config.supabase_url);
            Arc::new(SupabaseClient::new(config))
        }
        StoreBackend::Supabase => {
            warn!("MED360_STORE=supabase but SUPABASE_URL/SUPABASE_ANON_PUBLIC_KEY are unset; falling back to the in-memory store");
            Arc::new(InMemoryStore::with_default_indexes())
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; records are lost on restart");
            Arc::new(InMemoryStore::with_default_indexes())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Med360 API server");

    // Load configuration
    let config = AppConfig::from_env();
    let store = build_store(&config);
    let addr = config.bind_address();

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Create shared state
    let state = Arc::new(AppState::new(config, store));

    // Build the application router
    let app = router::create_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    // `/doctors/` and `/doctors` reach the same route.
    let app = NormalizePathLayer::trim_trailing_slash().layer(app);

    // Run the server
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}
