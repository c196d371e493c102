//! Provider Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ListProviders;
use crate::infrastructure::http::dto::ProvidersResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 当前可用的 AI / TTS 提供方
pub async fn available_providers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProvidersResponse>, ApiError> {
    let result = state.list_providers_handler.handle(ListProviders).await?;

    Ok(Json(ProvidersResponse {
        ai_providers: result.ai_providers,
        tts_providers: result.tts_providers,
    }))
}
