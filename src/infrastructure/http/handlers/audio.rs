//! Audio Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::{GenerateAudio, GetAudioQuery};
use crate::infrastructure::http::dto::{audio_url, AudioResponse, GenerateAudioRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 合成单段文本
pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateAudioRequest>,
) -> Result<Json<AudioResponse>, ApiError> {
    let result = state
        .generate_audio_handler
        .handle(GenerateAudio { text: req.text })
        .await?;

    Ok(Json(AudioResponse {
        audio_url: audio_url(&result.audio_id),
        cache_hit: result.cache_hit,
    }))
}

/// 读取已登记的音频
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Path(audio_id): Path<String>,
) -> Result<Response, ApiError> {
    let result = state.get_audio_handler.handle(GetAudioQuery { audio_id })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len())
        .header(header::CONTENT_DISPOSITION, "inline; filename=audio.mp3")
        .body(Body::from(result.audio_data))
        .map_err(|e| ApiError::Internal(e.to_string()))
}
