// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detection endpoints.

use crate::error::ApiError;
use crate::services::cache::DiskCache;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use base64::Engine;
use roomscan_detect::{Room, RoomDetector};
use serde::{Deserialize, Serialize};

/// Response for both detect endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    pub rooms: Vec<Room>,
    pub room_count: usize,
    pub image: ImageSize,
    pub cache_key: String,
    pub from_cache: bool,
}

/// Decoded image dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// JSON request body carrying a base64-encoded image.
#[derive(Debug, Deserialize)]
pub struct DetectJsonRequest {
    pub image_base64: String,
}

/// Extract file data from multipart request.
async fn extract_file(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default();
        tracing::debug!(field_name = %field_name, "Processing multipart field");

        if field_name == "file" {
            let bytes = field.bytes().await?;
            tracing::debug!(size = bytes.len(), "Extracted file from multipart");
            return Ok(bytes.to_vec());
        }
    }

    tracing::warn!("No 'file' field found in multipart request");
    Err(ApiError::MissingFile)
}

/// POST /api/v1/detect - multipart image upload.
pub async fn detect_multipart(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DetectResponse>, ApiError> {
    let data = extract_file(&mut multipart).await?;
    run_detection(state, data).await
}

/// POST /api/v1/detect/json - base64 JSON payload.
pub async fn detect_json(
    State(state): State<AppState>,
    Json(request): Json<DetectJsonRequest>,
) -> Result<Json<DetectResponse>, ApiError> {
    let data = base64::engine::general_purpose::STANDARD.decode(request.image_base64.as_bytes())?;
    run_detection(state, data).await
}

/// Shared detection path: size check, cache lookup, blocking detection,
/// background cache write.
async fn run_detection(state: AppState, data: Vec<u8>) -> Result<Json<DetectResponse>, ApiError> {
    // Check file size
    if data.len() > state.config.max_file_size_mb * 1024 * 1024 {
        return Err(ApiError::FileTooLarge {
            max_mb: state.config.max_file_size_mb,
        });
    }

    // Generate cache key
    let cache_key = DiskCache::generate_key(&data, state.config.profile.name());

    // Check cache first
    if let Some(mut cached) = state.cache.get::<DetectResponse>(&cache_key).await? {
        tracing::info!(cache_key = %cache_key, "Cache HIT");
        cached.from_cache = true;
        return Ok(Json(cached));
    }

    tracing::info!(cache_key = %cache_key, size = data.len(), "Cache MISS - detecting");

    let image =
        image::load_from_memory(&data).map_err(|e| ApiError::InvalidImage(e.to_string()))?;
    let (width, height) = (image.width(), image.height());

    // Detection is CPU-bound; run it on the blocking thread pool.
    let detector = state.detector.clone();
    let rooms = tokio::task::spawn_blocking(move || detector.detect(&image)).await??;

    let response = DetectResponse {
        room_count: rooms.len(),
        rooms,
        image: ImageSize { width, height },
        cache_key: cache_key.clone(),
        from_cache: false,
    };

    // Cache result (background)
    let cache = state.cache.clone();
    let response_clone = response.clone();
    tokio::spawn(async move {
        if let Err(e) = cache.set(&cache_key, &response_clone).await {
            tracing::error!(error = %e, "Failed to cache result");
        }
    });

    Ok(Json(response))
}
