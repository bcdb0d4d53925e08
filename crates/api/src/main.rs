#![allow(deprecated)] // TimeoutLayer::new is deprecated but replacement API not stable

use std::sync::Arc;

use cloak_api::config::{Config, StorageKind};
use cloak_api::{build_router, health, AppState};
use cloak_core::{HttpDetector, Persister, SessionController};
use cloak_storage::{LocalStore, MemoryStore, SessionStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    // Initialize Storage
    let store: Arc<dyn SessionStore> = match config.storage {
        StorageKind::Local => Arc::new(LocalStore::new(config.state_dir.clone())),
        StorageKind::Memory => {
            tracing::warn!("Using in-memory session storage; sessions will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };
    tracing::info!("Session storage initialized: {}", store.name());

    let detector = match HttpDetector::with_timeout(config.detector_url.clone(), config.detect_timeout) {
        Ok(detector) => detector,
        Err(e) => {
            tracing::error!("Failed to initialize detection client: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Detection service: {} (timeout {}s)",
        detector.endpoint(),
        config.detect_timeout.as_secs()
    );

    let persister = Persister::spawn(store.clone(), config.session_key.clone());
    let controller = SessionController::restore(persister).await;
    let app_state = Arc::new(AppState::new(controller, Arc::new(detector), store));

    health::mark_server_start();

    tracing::info!(
        "Server configured: max_concurrent={}, request_timeout={}s",
        config.max_concurrent_requests,
        config.request_timeout.as_secs()
    );

    let app = build_router(app_state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        // Pasted text and AI responses only; 1MB is plenty
        .layer(tower_http::limit::RequestBodyLimitLayer::new(1024 * 1024))
        .layer(tower_http::timeout::TimeoutLayer::new(config.request_timeout))
        .layer(tower::limit::ConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .layer(configure_cors(&config));

    // Local only: the popup talks to this service on the same machine
    let listener = match tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind port {}: {}", config.port, e);
            std::process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Server listening on {}", addr),
        Err(e) => tracing::warn!("Server listening on unknown address: {}", e),
    }
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Configure CORS for the extension popup from `CORS_ALLOWED_ORIGINS`
/// and `CORS_DEV_MODE`
fn configure_cors(config: &Config) -> tower_http::cors::CorsLayer {
    use axum::http::{header, Method};
    use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

    let allowed_methods = AllowMethods::list([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]);

    let allowed_headers = AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN]);

    let allow_origin = if config.cors_dev_mode {
        tracing::warn!("CORS: Development mode enabled - allowing any origin");
        AllowOrigin::any()
    } else if !config.cors_allowed_origins.is_empty() {
        let origins = config.cors_allowed_origins.clone();
        tracing::info!("CORS: {} allowed origins", origins.len());
        AllowOrigin::predicate(move |origin, _| {
            if let Ok(origin_str) = origin.to_str() {
                origins.iter().any(|allowed| allowed == origin_str)
            } else {
                false
            }
        })
    } else {
        tracing::warn!(
            "CORS: No CORS_ALLOWED_ORIGINS configured; cross-origin requests are blocked. \
            Set CORS_ALLOWED_ORIGINS to the extension origin or CORS_DEV_MODE=true."
        );
        AllowOrigin::predicate(|_, _| false)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(allowed_methods)
        .allow_headers(allowed_headers)
        .max_age(std::time::Duration::from_secs(3600))
}
