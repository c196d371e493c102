//! Domain Layer - 领域层
//!
//! - Script Context: 讲解脚本（讲解块、提取器、提示词）
//! - Provider: AI / TTS 提供方标识
//! - file_view: 源文件按行视图

pub mod file_view;
pub mod provider;
pub mod script;

pub use provider::{AnswerProviderId, ProviderInfo, SpeechProviderId, UnknownProvider};
pub use script::{extract_blocks, CodeBlock, ExtractError, LineRange, NarrationBlock, TextBlock};
