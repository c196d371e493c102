//! AI Adapters - 回答生成方实现
//!
//! - cli_agent: 本地 `claude` / `opencode` CLI
//! - openai_chat: 托管 chat completions API
//! - repo_context: 为托管 API 生成仓库摘要

mod cli_agent;
mod openai_chat;
mod repo_context;

pub use cli_agent::{CliAgentConfig, CliAnswerGenerator, DEFAULT_CLI_TIMEOUT_SECS};
pub use openai_chat::{OpenAiChatConfig, OpenAiChatGenerator};
pub use repo_context::{build_repository_context, DEFAULT_MAX_FILES};
