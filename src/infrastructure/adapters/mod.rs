//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod ai;
pub mod process;
pub mod provider_factory;
pub mod tts;

pub use ai::*;
pub use process::*;
pub use provider_factory::{answer_generators, speech_synthesizers};
pub use tts::*;
