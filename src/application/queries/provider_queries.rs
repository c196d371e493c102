//! Provider Queries - 提供方查询

use crate::application::ports::{CliStatus, SpeechServiceStatus};
use crate::domain::ProviderInfo;

/// 列出当前可用的提供方
#[derive(Debug, Clone, Default)]
pub struct ListProviders;

#[derive(Debug, Clone)]
pub struct ListProvidersResponse {
    pub ai_providers: Vec<ProviderInfo>,
    pub tts_providers: Vec<ProviderInfo>,
}

/// 快速系统检查（只做本地探测，不调用任何远程 API）
#[derive(Debug, Clone, Default)]
pub struct QuickSystemCheck;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickSystemCheckResponse {
    pub system_ready: bool,
    pub has_ai_cli: bool,
    pub has_tts: bool,
}

/// 完整系统检查：CLI 版本探测 + TTS 服务连通性请求
#[derive(Debug, Clone, Default)]
pub struct SystemCheck;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequirementsMet {
    pub ai_cli: bool,
    pub tts_service: bool,
}

#[derive(Debug, Clone)]
pub struct ServiceStatuses {
    pub claude_code: CliStatus,
    pub opencode: CliStatus,
    pub elevenlabs: SpeechServiceStatus,
    pub openai_tts: SpeechServiceStatus,
}

#[derive(Debug, Clone)]
pub struct SystemCheckResponse {
    pub system_ready: bool,
    pub requirements_met: RequirementsMet,
    pub services: ServiceStatuses,
    pub recommendations: Vec<String>,
}
