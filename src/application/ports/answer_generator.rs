//! Answer Generator Port - AI 回答生成抽象
//!
//! 具体实现在 infrastructure/adapters/ai 层（本地 CLI 或托管 API）

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::AnswerProviderId;

/// 回答生成错误
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is not available")]
    Unavailable(AnswerProviderId),

    #[error("{provider} timed out after {secs}s")]
    Timeout { provider: AnswerProviderId, secs: u64 },

    #[error("{provider} failed: {message}")]
    ExecutionFailed {
        provider: AnswerProviderId,
        message: String,
    },

    #[error("{0} returned an empty response")]
    EmptyResponse(AnswerProviderId),

    #[error("{provider} request failed: {message}")]
    RequestFailed {
        provider: AnswerProviderId,
        message: String,
    },
}

/// 本地 CLI 的安装 / 配置状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliStatus {
    pub installed: bool,
    pub configured: bool,
    pub version: Option<String>,
    pub error: Option<String>,
}

/// Answer Generator Port
///
/// 把仓库路径 + 问题交给外部 AI，返回未经处理的原始文本
#[async_trait]
pub trait AnswerGeneratorPort: Send + Sync {
    fn id(&self) -> AnswerProviderId;

    /// 分析仓库并回答问题
    ///
    /// `prompt` 为已经拼好的完整提示词（系统提示词 + 当前任务）
    async fn analyze(
        &self,
        repository_path: &Path,
        question: &str,
        prompt: &str,
    ) -> Result<String, ProviderError>;

    /// 轻量可用性探测，探测失败一律视为不可用
    async fn is_available(&self) -> bool;

    /// 完整系统检查用的 CLI 状态；非 CLI 提供方返回 None
    async fn cli_status(&self) -> Option<CliStatus> {
        None
    }
}
