//! Provider Identifiers - 提供方标识
//!
//! 用显式的 id 枚举代替按类型匹配：id 字符串 <-> 枚举 <-> 构造工厂

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 回答生成方（AI 后端）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerProviderId {
    /// 本地 `claude` CLI
    ClaudeCode,
    /// 托管的 chat completions API
    #[serde(rename = "openai")]
    OpenAi,
    /// 本地 `opencode` CLI
    #[serde(rename = "opencode")]
    OpenCode,
}

impl AnswerProviderId {
    /// 固定的回退顺序
    pub const PRIORITY: [AnswerProviderId; 3] = [Self::ClaudeCode, Self::OpenAi, Self::OpenCode];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude_code",
            Self::OpenAi => "openai",
            Self::OpenCode => "opencode",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ClaudeCode => "Claude Code",
            Self::OpenAi => "OpenAI",
            Self::OpenCode => "OpenCode",
        }
    }

    /// 是否为本地 CLI 代理
    pub fn is_local_cli(&self) -> bool {
        matches!(self, Self::ClaudeCode | Self::OpenCode)
    }
}

impl fmt::Display for AnswerProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// 语音合成方（TTS 后端）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeechProviderId {
    #[serde(rename = "elevenlabs")]
    ElevenLabs,
    #[serde(rename = "openai")]
    OpenAi,
}

impl SpeechProviderId {
    /// 未指定偏好时的绑定顺序
    pub const PRIORITY: [SpeechProviderId; 2] = [Self::ElevenLabs, Self::OpenAi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "elevenlabs",
            Self::OpenAi => "openai",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "ElevenLabs",
            Self::OpenAi => "OpenAI TTS",
        }
    }
}

impl fmt::Display for SpeechProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpeechProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// 未知的提供方 id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

/// 提供方信息（用于列表展示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
}

impl From<AnswerProviderId> for ProviderInfo {
    fn from(id: AnswerProviderId) -> Self {
        Self {
            id: id.as_str().to_string(),
            name: id.display_name().to_string(),
        }
    }
}

impl From<SpeechProviderId> for ProviderInfo {
    fn from(id: SpeechProviderId) -> Self {
        Self {
            id: id.as_str().to_string(),
            name: id.display_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_provider_round_trip_ids() {
        for id in AnswerProviderId::PRIORITY {
            assert_eq!(id.as_str().parse::<AnswerProviderId>().unwrap(), id);
        }
        assert!("gemini".parse::<AnswerProviderId>().is_err());
    }

    #[test]
    fn test_speech_provider_ids() {
        assert_eq!("elevenlabs".parse::<SpeechProviderId>(), Ok(SpeechProviderId::ElevenLabs));
        assert_eq!("openai".parse::<SpeechProviderId>(), Ok(SpeechProviderId::OpenAi));
        assert_eq!(
            "polly".parse::<SpeechProviderId>(),
            Err(UnknownProvider("polly".to_string()))
        );
    }

    #[test]
    fn test_serde_names_match_ids() {
        let json = serde_json::to_string(&AnswerProviderId::ClaudeCode).unwrap();
        assert_eq!(json, "\"claude_code\"");
        let json = serde_json::to_string(&AnswerProviderId::OpenCode).unwrap();
        assert_eq!(json, "\"opencode\"");
    }
}
