//! File Content Handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::GetFileContent;
use crate::infrastructure::http::dto::{FileContentDto, FileContentParams};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn file_content(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FileContentParams>,
) -> Result<Json<FileContentDto>, ApiError> {
    let query = GetFileContent {
        file_path: PathBuf::from(params.file_path),
        from_line: params.from_line,
        to_line: params.to_line,
        highlight: params.highlight,
    };

    let result = state.file_content_handler.handle(query).await?;

    Ok(Json(FileContentDto {
        file_path: result.file_path,
        content: result.content,
        total_lines: result.total_lines,
        from_line: result.from_line,
        to_line: result.to_line,
    }))
}
