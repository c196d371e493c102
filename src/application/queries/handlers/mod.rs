//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod audio_handlers;
mod file_handlers;
mod provider_handlers;

pub use audio_handlers::*;
pub use file_handlers::*;
pub use provider_handlers::*;
