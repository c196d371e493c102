//! Memory Layer - In-Memory State Management
//!
//! 临时音频登记表

mod audio_registry;

pub use audio_registry::InMemoryAudioRegistry;
