//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::ports::{DEFAULT_REGISTRY_MAX_ENTRIES, DEFAULT_REGISTRY_TTL_SECS};
use crate::application::retry::RetryPolicy;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 音频磁盘缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 临时音频登记表配置
    #[serde(default)]
    pub registry: RegistryConfig,

    /// 本地 AI CLI 配置
    #[serde(default)]
    pub cli: CliConfig,

    /// AI / TTS 提供方配置
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 允许跨域的来源
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 音频磁盘缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 缓存目录
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,

    /// 容量上限（MB），只用于展示
    #[serde(default = "default_cache_max_size_mb")]
    pub max_size_mb: u64,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("audio_cache")
}

fn default_cache_max_size_mb() -> u64 {
    500
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            max_size_mb: default_cache_max_size_mb(),
        }
    }
}

impl CacheConfig {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb * 1024 * 1024
    }
}

/// 临时音频登记表配置
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// 条目存活时间（秒）
    #[serde(default = "default_registry_ttl")]
    pub ttl_secs: u64,

    /// 最大条目数
    #[serde(default = "default_registry_max_entries")]
    pub max_entries: usize,
}

fn default_registry_ttl() -> u64 {
    DEFAULT_REGISTRY_TTL_SECS
}

fn default_registry_max_entries() -> usize {
    DEFAULT_REGISTRY_MAX_ENTRIES
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_registry_ttl(),
            max_entries: default_registry_max_entries(),
        }
    }
}

impl RegistryConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// 本地 AI CLI 配置
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_claude_command")]
    pub claude_command: String,

    #[serde(default = "default_opencode_command")]
    pub opencode_command: String,

    /// 单次调用超时（秒）
    #[serde(default = "default_cli_timeout")]
    pub timeout_secs: u64,

    /// 总尝试次数
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 重试间隔（秒）
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

fn default_claude_command() -> String {
    "claude".to_string()
}

fn default_opencode_command() -> String {
    "opencode".to_string()
}

fn default_cli_timeout() -> u64 {
    120
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    2
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            claude_command: default_claude_command(),
            opencode_command: default_opencode_command(),
            timeout_secs: default_cli_timeout(),
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay(),
        }
    }
}

impl CliConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.max_attempts, Duration::from_secs(self.retry_delay_secs))
    }
}

/// AI / TTS 提供方配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// chat completions 模型
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_openai_tts_model")]
    pub openai_tts_model: String,

    #[serde(default = "default_openai_tts_voice")]
    pub openai_tts_voice: String,

    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,

    #[serde(default = "default_elevenlabs_base_url")]
    pub elevenlabs_base_url: String,

    /// 音色名或 voice id
    #[serde(default = "default_elevenlabs_voice")]
    pub elevenlabs_voice: String,

    #[serde(default = "default_elevenlabs_model")]
    pub elevenlabs_model: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_openai_tts_model() -> String {
    "tts-1".to_string()
}

fn default_openai_tts_voice() -> String {
    "alloy".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_elevenlabs_voice() -> String {
    "Rachel".to_string()
}

fn default_elevenlabs_model() -> String {
    "eleven_turbo_v2_5".to_string()
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            openai_tts_model: default_openai_tts_model(),
            openai_tts_voice: default_openai_tts_voice(),
            elevenlabs_api_key: None,
            elevenlabs_base_url: default_elevenlabs_base_url(),
            elevenlabs_voice: default_elevenlabs_voice(),
            elevenlabs_model: default_elevenlabs_model(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
