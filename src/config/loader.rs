//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 通用提供方环境变量（OPENAI_API_KEY 等）
//! 2. 环境变量（前缀 `DOCC_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 通用环境变量 -> 配置键
const WELL_KNOWN_ENV: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "providers.openai_api_key"),
    ("OPENAI_TTS_VOICE", "providers.openai_tts_voice"),
    ("ELEVENLABS_API_KEY", "providers.elevenlabs_api_key"),
    ("ELEVENLABS_VOICE", "providers.elevenlabs_voice"),
    ("ELEVENLABS_MODEL", "providers.elevenlabs_model"),
];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `DOCC_SERVER__PORT=9000`
/// - `DOCC_CACHE__DIR=/tmp/audio`
/// - `DOCC_SERVER__CORS_ORIGINS=http://a.test,http://b.test`
/// - `OPENAI_API_KEY=sk-...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    build_config(config_path, None)
}

/// `env` 为 None 时读取进程环境变量
fn build_config(
    config_path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<AppConfig, ConfigError> {
    let lookup = |key: &str| -> Option<String> {
        let value = match &env {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    };

    let mut builder = Config::builder();

    // 1. 默认值由 serde(default) 提供，这里只补充需要显式类型的键
    builder = builder
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 前缀环境变量
    // 前缀: DOCC_
    // 层级分隔符: __ (双下划线)
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("DOCC")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.cors_origins")
            .try_parsing(true)
            .source(env.clone()),
    );

    // 4. 通用提供方环境变量
    for (var, key) in WELL_KNOWN_ENV {
        builder = builder.set_override_option(*key, lookup(var))?;
    }

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if !(10..=10_000).contains(&config.cache.max_size_mb) {
        return Err(ConfigError::ValidationError(format!(
            "Cache max size must be between 10 and 10000 MB, got {}",
            config.cache.max_size_mb
        )));
    }

    if config.cache.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Cache directory cannot be empty".to_string(),
        ));
    }

    let level = config.log.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "Invalid log level '{}', expected one of {:?}",
            config.log.level, LOG_LEVELS
        )));
    }

    if config.cli.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "CLI max attempts must be at least 1".to_string(),
        ));
    }

    if config.registry.max_entries == 0 {
        return Err(ConfigError::ValidationError(
            "Registry max entries must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// 只保留前 4 个字符
fn mask_secret(secret: Option<&str>) -> String {
    match secret {
        Some(s) if s.chars().count() > 8 => format!("{}****", s.chars().take(4).collect::<String>()),
        Some(_) => "****".to_string(),
        None => "<not set>".to_string(),
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("CORS Origins: {:?}", config.server.cors_origins);
    tracing::info!("Audio Cache: {:?} (max {} MB)", config.cache.dir, config.cache.max_size_mb);
    tracing::info!(
        "Audio Registry: ttl={}s, max_entries={}",
        config.registry.ttl_secs,
        config.registry.max_entries
    );
    tracing::info!(
        "AI CLI: claude={}, opencode={}, timeout={}s, attempts={}",
        config.cli.claude_command,
        config.cli.opencode_command,
        config.cli.timeout_secs,
        config.cli.max_attempts
    );
    tracing::info!(
        "OpenAI: key={}, model={}, tts={}/{}",
        mask_secret(config.providers.openai_api_key.as_deref()),
        config.providers.openai_model,
        config.providers.openai_tts_model,
        config.providers.openai_tts_voice
    );
    tracing::info!(
        "ElevenLabs: key={}, voice={}, model={}",
        mask_secret(config.providers.elevenlabs_api_key.as_deref()),
        config.providers.elevenlabs_voice,
        config.providers.elevenlabs_model
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
