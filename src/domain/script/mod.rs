//! Script Context - 讲解脚本上下文
//!
//! - value_objects: 讲解块与行范围
//! - extractor: 从 AI 原始输出中提取讲解块
//! - prompt: 组合提示词

mod errors;
mod extractor;
mod prompt;
mod value_objects;

pub use errors::ExtractError;
pub use extractor::{extract_blocks, locate_json_payload};
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use value_objects::{CodeBlock, LineRange, NarrationBlock, TextBlock};
