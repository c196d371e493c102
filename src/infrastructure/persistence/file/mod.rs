//! File Persistence - 基于文件系统的存储

mod audio_cache;

pub use audio_cache::{FileAudioCache, CACHE_FILE_EXTENSION};
