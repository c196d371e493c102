//! Audio Queries - 音频查询

/// 获取已登记音频查询
#[derive(Debug, Clone)]
pub struct GetAudioQuery {
    pub audio_id: String,
}

/// 获取音频响应
#[derive(Debug, Clone)]
pub struct GetAudioResponse {
    pub audio_data: Vec<u8>,
    pub content_type: String,
}

/// 缓存统计查询
#[derive(Debug, Clone, Default)]
pub struct GetCacheStats;

/// 缓存统计响应
#[derive(Debug, Clone)]
pub struct CacheStatsResponse {
    pub cache_size_bytes: u64,
    pub cached_files_count: usize,
    pub max_size_bytes: u64,
}
