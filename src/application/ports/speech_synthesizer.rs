//! Speech Synthesizer Port - TTS 合成抽象
//!
//! 定义文本转语音的抽象接口，具体实现在 infrastructure/adapters/tts 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SpeechProviderId;

/// TTS 错误
///
/// 除 `Unavailable` 之外的变体都属于合成失败
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("{0} is not available")]
    Unavailable(SpeechProviderId),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl TtsError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// TTS 服务的配置 / 连通状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeechServiceStatus {
    pub api_key_set: bool,
    pub configured: bool,
    pub accessible: bool,
    pub error: Option<String>,
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    fn id(&self) -> SpeechProviderId;

    /// 合成语音，返回原始音频字节（mp3）
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError>;

    /// 是否已配置可用（不会失败）
    async fn is_available(&self) -> bool;

    /// 连通性检查；默认只反映配置状态，HTTP 实现会真正请求服务端
    async fn check_access(&self) -> SpeechServiceStatus {
        let available = self.is_available().await;
        SpeechServiceStatus {
            api_key_set: available,
            configured: available,
            accessible: available,
            error: None,
        }
    }
}
