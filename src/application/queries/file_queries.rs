//! File Queries - 源文件内容查询

use std::path::PathBuf;

/// 读取源文件（可选行范围）
#[derive(Debug, Clone)]
pub struct GetFileContent {
    pub file_path: PathBuf,
    pub from_line: Option<u32>,
    pub to_line: Option<u32>,
    /// 返回整份文件并为行范围加上 `>>> ` 标记
    pub highlight: bool,
}

#[derive(Debug, Clone)]
pub struct FileContentResponse {
    pub file_path: String,
    pub content: String,
    pub total_lines: usize,
    pub from_line: Option<u32>,
    pub to_line: Option<u32>,
}
