//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（AnswerGenerator、SpeechSynthesizer、AudioCache、AudioRegistry 等）
//! - services: 回退编排器与 TTS 管理器
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - retry: 固定间隔重试
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod retry;
pub mod services;

// Re-exports
pub use commands::{
    ClearCache, ClearCacheResponse, GenerateAudio, GenerateAudioResponse, GenerateScript,
    GenerateScriptResponse, MAX_AUDIO_TEXT_CHARS,
    // Handlers
    handlers::{ClearCacheHandler, GenerateAudioHandler, GenerateScriptHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Answer generator
    AnswerGeneratorPort,
    CliStatus,
    ProviderError,
    // Audio cache
    generate_cache_key,
    AudioCachePort,
    CacheError,
    CacheStats,
    // Audio registry
    AudioRegistryPort,
    RegistryError,
    // Clock
    Clock,
    SystemClock,
    // Process runner
    ProcessError,
    ProcessOutput,
    ProcessRunnerPort,
    ProcessSpec,
    // Speech synthesizer
    SpeechServiceStatus,
    SpeechSynthesizerPort,
    TtsError,
};

pub use queries::{
    CacheStatsResponse, FileContentResponse, GetAudioQuery, GetAudioResponse, GetCacheStats,
    GetFileContent, ListProviders, ListProvidersResponse, QuickSystemCheck,
    QuickSystemCheckResponse, RequirementsMet, ServiceStatuses, SystemCheck, SystemCheckResponse,
    // Handlers
    handlers::{
        GetAudioHandler, GetCacheStatsHandler, GetFileContentHandler, ListProvidersHandler,
        QuickSystemCheckHandler, SystemCheckHandler,
    },
};

pub use retry::{retry_async, RetryPolicy};
pub use services::{AudioError, ScriptError, ScriptGenerator, SynthesizedAudio, TtsManager};
