//! HTTP Handlers

mod audio;
mod cache;
mod files;
mod providers;
mod script;
mod system;

pub use audio::*;
pub use cache::*;
pub use files::*;
pub use providers::*;
pub use script::*;
pub use system::*;
