//! Audio Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{AudioCachePort, AudioRegistryPort};
use crate::application::queries::audio_queries::{
    CacheStatsResponse, GetAudioQuery, GetAudioResponse, GetCacheStats,
};

/// GetAudio Handler - 从临时登记表读取音频
pub struct GetAudioHandler {
    audio_registry: Arc<dyn AudioRegistryPort>,
}

impl GetAudioHandler {
    pub fn new(audio_registry: Arc<dyn AudioRegistryPort>) -> Self {
        Self { audio_registry }
    }

    pub fn handle(&self, query: GetAudioQuery) -> Result<GetAudioResponse, ApplicationError> {
        let audio_data = self.audio_registry.get(&query.audio_id)?;

        tracing::debug!(audio_id = %query.audio_id, size = audio_data.len(), "Serving audio");

        Ok(GetAudioResponse {
            audio_data,
            content_type: "audio/mpeg".to_string(),
        })
    }
}

/// GetCacheStats Handler
pub struct GetCacheStatsHandler {
    audio_cache: Arc<dyn AudioCachePort>,
}

impl GetCacheStatsHandler {
    pub fn new(audio_cache: Arc<dyn AudioCachePort>) -> Self {
        Self { audio_cache }
    }

    pub async fn handle(&self, _query: GetCacheStats) -> Result<CacheStatsResponse, ApplicationError> {
        let stats = self.audio_cache.stats().await?;

        Ok(CacheStatsResponse {
            cache_size_bytes: stats.total_size_bytes,
            cached_files_count: stats.total_entries,
            max_size_bytes: stats.max_size_bytes,
        })
    }
}
