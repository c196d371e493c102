//! File Query Handlers

use crate::application::error::ApplicationError;
use crate::application::queries::file_queries::{FileContentResponse, GetFileContent};
use crate::domain::file_view::{render_with_line_markers, slice_lines};
use crate::domain::LineRange;

/// GetFileContent Handler
///
/// 路径必须是绝对路径、存在且为普通文件
#[derive(Debug, Clone, Copy, Default)]
pub struct GetFileContentHandler;

impl GetFileContentHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, query: GetFileContent) -> Result<FileContentResponse, ApplicationError> {
        let path = &query.file_path;

        if !path.is_absolute() {
            return Err(ApplicationError::validation("File path must be absolute"));
        }

        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ApplicationError::not_found("File", path.display().to_string()));
            }
            Err(e) => return Err(ApplicationError::internal(format!("Error reading file: {}", e))),
        };

        if !metadata.is_file() {
            return Err(ApplicationError::validation("Path is not a file"));
        }

        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ApplicationError::internal(format!("Error reading file: {}", e)))?;

        let (content, total_lines) = if query.highlight {
            let ranges = match (query.from_line, query.to_line) {
                (Some(from), Some(to)) => vec![LineRange::span(from, to)],
                _ => Vec::new(),
            };
            (render_with_line_markers(&raw, &ranges), raw.lines().count())
        } else {
            slice_lines(&raw, query.from_line, query.to_line)
        };

        Ok(FileContentResponse {
            file_path: path.display().to_string(),
            content,
            total_lines,
            from_line: query.from_line,
            to_line: query.to_line,
        })
    }
}
