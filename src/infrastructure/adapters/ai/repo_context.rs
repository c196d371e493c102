//! Repository Context - 仓库结构摘要
//!
//! 托管 API 看不到本地文件系统，这里遍历仓库生成一份简短的文件清单，
//! 关键清单文件附带开头一段内容

use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// 最多列出的文件数
pub const DEFAULT_MAX_FILES: usize = 20;

/// 关键文件截取的字符数
const MARKER_PREFIX_CHARS: usize = 500;

const SKIPPED_DIRS: &[&str] = &["node_modules", "__pycache__", "venv", "dist", "build", "target"];

const SKIPPED_EXTENSIONS: &[&str] = &["pyc", "pyo", "so", "dylib", "dll"];

const MARKER_FILES: &[&str] = &[
    "README.md",
    "setup.py",
    "package.json",
    "requirements.txt",
    "Cargo.toml",
];

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && SKIPPED_DIRS
            .iter()
            .any(|d| entry.file_name().to_string_lossy() == *d)
}

fn is_compiled(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SKIPPED_EXTENSIONS.contains(&e))
}

/// 生成仓库上下文（同步，调用方负责放入 spawn_blocking）
pub fn build_repository_context(repository_path: &Path, max_files: usize) -> String {
    let mut parts = Vec::new();
    let mut file_count = 0;

    let walker = WalkDir::new(repository_path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && !is_skipped_dir(e))
        .filter_map(|e| e.ok());

    for entry in walker {
        if file_count >= max_files {
            break;
        }
        if !entry.file_type().is_file() || is_compiled(entry.path()) {
            continue;
        }

        let rel_path = entry
            .path()
            .strip_prefix(repository_path)
            .unwrap_or(entry.path())
            .display()
            .to_string();

        let name = entry.file_name().to_string_lossy();
        if MARKER_FILES.contains(&name.as_ref()) {
            match std::fs::read_to_string(entry.path()) {
                Ok(content) => {
                    let prefix: String = content.chars().take(MARKER_PREFIX_CHARS).collect();
                    parts.push(format!("\n--- {} ---\n{}...", rel_path, prefix));
                    file_count += 1;
                }
                Err(e) => {
                    tracing::debug!(path = %rel_path, error = %e, "Skipping unreadable file");
                }
            }
        } else {
            parts.push(format!("- {}", rel_path));
            file_count += 1;
        }
    }

    parts.join("\n")
}
