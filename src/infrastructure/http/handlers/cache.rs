//! Cache Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ClearCache, GetCacheStats};
use crate::infrastructure::http::dto::{CacheStatsDto, MessageResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Result<Json<CacheStatsDto>, ApiError> {
    let stats = state.cache_stats_handler.handle(GetCacheStats).await?;

    Ok(Json(CacheStatsDto {
        cache_size_bytes: stats.cache_size_bytes,
        cache_size_mb: stats.cache_size_bytes as f64 / BYTES_PER_MB,
        cached_files_count: stats.cached_files_count,
        max_size_mb: stats.max_size_bytes as f64 / BYTES_PER_MB,
    }))
}

pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Result<Json<MessageResponse>, ApiError> {
    let result = state.clear_cache_handler.handle(ClearCache).await?;

    tracing::info!(removed = result.removed_files, "Cache cleared via API");

    Ok(Json(MessageResponse {
        message: "Cache cleared successfully".to_string(),
    }))
}
