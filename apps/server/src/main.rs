// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RoomScan Server - room detection inference service.
//!
//! Wraps one detector behind a REST API with content-hash response
//! caching.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/v1/health` - Health check
//! - `POST /api/v1/detect` - Detect rooms (multipart image upload)
//! - `POST /api/v1/detect/json` - Detect rooms (base64 JSON payload)

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use roomscan_detect::HeuristicDetector;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

mod config;
mod error;
mod routes;
mod services;

use config::Config;
use services::cache::DiskCache;

/// Application state shared across handlers.
///
/// The detector is constructed once at startup and injected ready-made;
/// handlers never initialize it lazily.
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<HeuristicDetector>,
    pub cache: Arc<DiskCache>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,roomscan_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        cache_dir = %config.cache_dir,
        max_file_size_mb = config.max_file_size_mb,
        profile = config.profile.name(),
        "Starting RoomScan Server"
    );

    // Build the detector up front so an invalid profile fails at startup,
    // not on the first request.
    let detector = HeuristicDetector::new(config.profile.config())
        .expect("detector profile must validate");

    let cache = Arc::new(DiskCache::new(&config.cache_dir).await);

    let state = AppState {
        detector: Arc::new(detector),
        cache,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = Router::new()
        .route("/", get(routes::health::info))
        .route("/api/v1/health", get(routes::health::check))
        .route("/api/v1/detect", post(routes::detect::detect_multipart))
        .route("/api/v1/detect/json", post(routes::detect::detect_json))
        .layer(DefaultBodyLimit::max(config.max_file_size_mb * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
