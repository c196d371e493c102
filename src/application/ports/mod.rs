//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod answer_generator;
mod audio_cache;
mod audio_registry;
mod clock;
mod process_runner;
mod speech_synthesizer;

pub use answer_generator::{AnswerGeneratorPort, CliStatus, ProviderError};
pub use audio_cache::{generate_cache_key, AudioCachePort, CacheError, CacheStats};
pub use audio_registry::{
    AudioRegistryPort, RegistryError, DEFAULT_REGISTRY_MAX_ENTRIES, DEFAULT_REGISTRY_TTL_SECS,
};
pub use clock::{Clock, SystemClock};
pub use process_runner::{ProcessError, ProcessOutput, ProcessRunnerPort, ProcessSpec};
pub use speech_synthesizer::{SpeechServiceStatus, SpeechSynthesizerPort, TtsError};
