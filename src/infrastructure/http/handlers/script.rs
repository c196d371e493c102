//! Script Handlers

use axum::{extract::State, Json};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::GenerateScript;
use crate::infrastructure::http::dto::{audio_url, GenerateScriptRequest, ScriptResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成讲解脚本并预合成每个块的音频
pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateScriptRequest>,
) -> Result<Json<ScriptResponse>, ApiError> {
    tracing::info!(
        repository = %req.repository_path,
        ai_provider = ?req.ai_provider,
        tts_provider = ?req.tts_provider,
        "Generating script"
    );

    let command = GenerateScript {
        repository_path: PathBuf::from(req.repository_path),
        question: req.question,
        ai_provider: req.ai_provider,
        tts_provider: req.tts_provider,
    };

    let result = state.generate_script_handler.handle(command).await?;

    Ok(Json(ScriptResponse {
        script: result.script,
        audio_files: result
            .audio_ids
            .map(|ids| ids.iter().map(|id| audio_url(id)).collect()),
    }))
}
