//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod http;
pub mod logging;
pub mod memory;
pub mod persistence;

pub use memory::InMemoryAudioRegistry;
pub use persistence::FileAudioCache;
pub use logging::init_tracing;
