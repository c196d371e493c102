//! 应用服务
//!
//! - script_generator: AI 提供方回退编排
//! - tts_manager: 带内容寻址缓存的语音合成

mod script_generator;
mod tts_manager;

pub use script_generator::{ScriptError, ScriptGenerator};
pub use tts_manager::{select_synthesizer, AudioError, SynthesizedAudio, TtsManager};
