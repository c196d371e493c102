//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{CliStatus, SpeechServiceStatus, SystemCheckResponse};
use crate::domain::{NarrationBlock, ProviderInfo};

/// 已登记音频的访问路径
pub fn audio_url(audio_id: &str) -> String {
    format!("/api/v1/audio/{}", audio_id)
}

// ============================================================================
// Script DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateScriptRequest {
    pub repository_path: String,
    pub question: String,
    #[serde(default)]
    pub ai_provider: Option<String>,
    #[serde(default)]
    pub tts_provider: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub script: Vec<NarrationBlock>,
    pub audio_files: Option<Vec<String>>,
}

// ============================================================================
// Audio DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateAudioRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AudioResponse {
    pub audio_url: String,
    pub cache_hit: bool,
}

// ============================================================================
// Cache DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CacheStatsDto {
    pub cache_size_bytes: u64,
    pub cache_size_mb: f64,
    pub cached_files_count: usize,
    pub max_size_mb: f64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Provider / System DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub ai_providers: Vec<ProviderInfo>,
    pub tts_providers: Vec<ProviderInfo>,
}

#[derive(Debug, Serialize)]
pub struct QuickSystemCheckDto {
    pub system_ready: bool,
    pub has_ai_cli: bool,
    pub has_tts: bool,
}

#[derive(Debug, Serialize)]
pub struct SystemCheckDto {
    pub system_ready: bool,
    pub requirements_met: RequirementsMetDto,
    pub services: ServicesDto,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RequirementsMetDto {
    pub ai_cli: bool,
    pub tts_service: bool,
}

#[derive(Debug, Serialize)]
pub struct ServicesDto {
    pub claude_code: CliStatusDto,
    pub opencode: CliStatusDto,
    pub elevenlabs: SpeechServiceStatusDto,
    pub openai_tts: SpeechServiceStatusDto,
}

#[derive(Debug, Serialize)]
pub struct CliStatusDto {
    pub installed: bool,
    pub configured: bool,
    pub version: Option<String>,
    pub error: Option<String>,
}

impl From<CliStatus> for CliStatusDto {
    fn from(status: CliStatus) -> Self {
        Self {
            installed: status.installed,
            configured: status.configured,
            version: status.version,
            error: status.error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpeechServiceStatusDto {
    pub configured: bool,
    pub accessible: bool,
    pub error: Option<String>,
    pub api_key_set: bool,
}

impl From<SpeechServiceStatus> for SpeechServiceStatusDto {
    fn from(status: SpeechServiceStatus) -> Self {
        Self {
            configured: status.configured,
            accessible: status.accessible,
            error: status.error,
            api_key_set: status.api_key_set,
        }
    }
}

impl From<SystemCheckResponse> for SystemCheckDto {
    fn from(response: SystemCheckResponse) -> Self {
        Self {
            system_ready: response.system_ready,
            requirements_met: RequirementsMetDto {
                ai_cli: response.requirements_met.ai_cli,
                tts_service: response.requirements_met.tts_service,
            },
            services: ServicesDto {
                claude_code: response.services.claude_code.into(),
                opencode: response.services.opencode.into(),
                elevenlabs: response.services.elevenlabs.into(),
                openai_tts: response.services.openai_tts.into(),
            },
            recommendations: response.recommendations,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub providers: ProvidersResponse,
}

// ============================================================================
// File DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct FileContentParams {
    pub file_path: String,
    #[serde(default)]
    pub from_line: Option<u32>,
    #[serde(default)]
    pub to_line: Option<u32>,
    #[serde(default)]
    pub highlight: bool,
}

#[derive(Debug, Serialize)]
pub struct FileContentDto {
    pub file_path: String,
    pub content: String,
    pub total_lines: usize,
    pub from_line: Option<u32>,
    pub to_line: Option<u32>,
}
