//! TTS Manager - 带磁盘缓存的语音合成
//!
//! 构造时绑定一个合成方（偏好优先，否则按固定顺序取第一个可用的），
//! 之后所有合成请求都先查内容寻址缓存

use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{
    generate_cache_key, AudioCachePort, CacheError, SpeechSynthesizerPort, TtsError,
};
use crate::domain::SpeechProviderId;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("No TTS provider available")]
    NoSynthesizerAvailable,

    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Audio cache error: {0}")]
    Cache(#[from] CacheError),
}

impl From<TtsError> for AudioError {
    fn from(err: TtsError) -> Self {
        match err {
            TtsError::Unavailable(_) => Self::NoSynthesizerAvailable,
            other => Self::SynthesisFailed(other.to_string()),
        }
    }
}

/// 合成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub data: Vec<u8>,
    /// 是否直接来自缓存
    pub cache_hit: bool,
}

pub struct TtsManager {
    synthesizer: Option<Arc<dyn SpeechSynthesizerPort>>,
    cache: Arc<dyn AudioCachePort>,
}

impl TtsManager {
    /// 选择合成方并构造
    ///
    /// `synthesizers` 应按固定优先级排列
    pub async fn bind(
        synthesizers: &[Arc<dyn SpeechSynthesizerPort>],
        preferred: Option<&str>,
        cache: Arc<dyn AudioCachePort>,
    ) -> Self {
        let synthesizer = select_synthesizer(synthesizers, preferred).await;

        match &synthesizer {
            Some(s) => tracing::info!(provider = %s.id(), "TTS provider bound"),
            None => tracing::warn!("No TTS provider available"),
        }

        Self::with_synthesizer(synthesizer, cache)
    }

    pub fn with_synthesizer(
        synthesizer: Option<Arc<dyn SpeechSynthesizerPort>>,
        cache: Arc<dyn AudioCachePort>,
    ) -> Self {
        Self { synthesizer, cache }
    }

    pub fn synthesizer_id(&self) -> Option<SpeechProviderId> {
        self.synthesizer.as_ref().map(|s| s.id())
    }

    pub fn has_synthesizer(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// 获取文本对应的音频，缓存未命中时调用合成方并写入缓存
    pub async fn get_or_synthesize(&self, text: &str) -> Result<SynthesizedAudio, AudioError> {
        let synthesizer = self
            .synthesizer
            .as_ref()
            .ok_or(AudioError::NoSynthesizerAvailable)?;

        let cache_key = generate_cache_key(text);

        if let Some(data) = self.cache.get(&cache_key).await? {
            tracing::debug!(cache_key = %cache_key, size = data.len(), "Audio cache hit");
            return Ok(SynthesizedAudio {
                data,
                cache_hit: true,
            });
        }

        tracing::info!(
            provider = %synthesizer.id(),
            cache_key = %cache_key,
            text_len = text.len(),
            "Audio cache miss, synthesizing"
        );

        let data = synthesizer.synthesize(text).await?;
        if data.is_empty() {
            return Err(AudioError::SynthesisFailed(format!(
                "{} returned no audio",
                synthesizer.id()
            )));
        }

        self.cache.put(&cache_key, &data).await?;

        Ok(SynthesizedAudio {
            data,
            cache_hit: false,
        })
    }

    pub async fn cache_size_bytes(&self) -> Result<u64, AudioError> {
        Ok(self.cache.stats().await?.total_size_bytes)
    }

    pub async fn cache_file_count(&self) -> Result<usize, AudioError> {
        Ok(self.cache.stats().await?.total_entries)
    }

    /// 删除全部缓存文件，返回删除数量
    pub async fn clear_cache(&self) -> Result<u64, AudioError> {
        let removed = self.cache.clear().await?;
        tracing::info!(removed, "Audio cache cleared");
        Ok(removed)
    }
}

/// 偏好 id 已知且可用则选它，否则按顺序取第一个可用的
pub async fn select_synthesizer(
    synthesizers: &[Arc<dyn SpeechSynthesizerPort>],
    preferred: Option<&str>,
) -> Option<Arc<dyn SpeechSynthesizerPort>> {
    if let Some(preferred) = preferred {
        match preferred.parse::<SpeechProviderId>() {
            Ok(id) => {
                if let Some(s) = synthesizers.iter().find(|s| s.id() == id) {
                    if s.is_available().await {
                        return Some(Arc::clone(s));
                    }
                }
                tracing::warn!(provider = %id, "Preferred TTS provider unavailable, falling back");
            }
            Err(_) => {
                tracing::warn!(provider = %preferred, "Unknown TTS provider, falling back");
            }
        }
    }

    for s in synthesizers {
        if s.is_available().await {
            return Some(Arc::clone(s));
        }
    }

    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::ports::CacheStats;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    pub(crate) struct FakeSynthesizer {
        id: SpeechProviderId,
        available: bool,
        pub calls: AtomicU32,
    }

    impl FakeSynthesizer {
        pub fn new(id: SpeechProviderId, available: bool) -> Arc<Self> {
            Arc::new(Self {
                id,
                available,
                calls: AtomicU32::new(0),
            })
        }

        pub fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SpeechSynthesizerPort for FakeSynthesizer {
        fn id(&self) -> SpeechProviderId {
            self.id
        }

        async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}:{}", self.id, text).into_bytes())
        }

        async fn is_available(&self) -> bool {
            self.available
        }
    }

    /// 内存版缓存
    #[derive(Default)]
    pub(crate) struct MemoryCache {
        entries: Mutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl AudioCachePort for MemoryCache {
        async fn get(&self, cache_key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            Ok(self.entries.lock().unwrap().get(cache_key).cloned())
        }

        async fn put(&self, cache_key: &str, audio_data: &[u8]) -> Result<(), CacheError> {
            self.entries
                .lock()
                .unwrap()
                .insert(cache_key.to_string(), audio_data.to_vec());
            Ok(())
        }

        async fn exists(&self, cache_key: &str) -> Result<bool, CacheError> {
            Ok(self.entries.lock().unwrap().contains_key(cache_key))
        }

        async fn stats(&self) -> Result<CacheStats, CacheError> {
            let entries = self.entries.lock().unwrap();
            Ok(CacheStats {
                total_entries: entries.len(),
                total_size_bytes: entries.values().map(|v| v.len() as u64).sum(),
                ..Default::default()
            })
        }

        async fn clear(&self) -> Result<u64, CacheError> {
            let mut entries = self.entries.lock().unwrap();
            let n = entries.len() as u64;
            entries.clear();
            Ok(n)
        }
    }

    fn synths(list: &[Arc<FakeSynthesizer>]) -> Vec<Arc<dyn SpeechSynthesizerPort>> {
        list.iter()
            .map(|s| Arc::clone(s) as Arc<dyn SpeechSynthesizerPort>)
            .collect()
    }

    #[tokio::test]
    async fn test_same_text_synthesized_once() {
        let synth = FakeSynthesizer::new(SpeechProviderId::OpenAi, true);
        let manager = TtsManager::with_synthesizer(
            Some(synth.clone() as Arc<dyn SpeechSynthesizerPort>),
            Arc::new(MemoryCache::default()),
        );

        let first = manager.get_or_synthesize("hello").await.unwrap();
        let second = manager.get_or_synthesize("hello").await.unwrap();

        assert_eq!(first.data, second.data);
        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert_eq!(synth.call_count(), 1);
    }

    #[tokio::test]
    async fn test_no_synthesizer_fails_fast() {
        let manager = TtsManager::with_synthesizer(None, Arc::new(MemoryCache::default()));
        let err = manager.get_or_synthesize("hello").await.unwrap_err();
        assert!(matches!(err, AudioError::NoSynthesizerAvailable));
    }

    #[tokio::test]
    async fn test_preferred_available_synthesizer_is_bound() {
        let eleven = FakeSynthesizer::new(SpeechProviderId::ElevenLabs, true);
        let openai = FakeSynthesizer::new(SpeechProviderId::OpenAi, true);
        let manager = TtsManager::bind(
            &synths(&[eleven, openai]),
            Some("openai"),
            Arc::new(MemoryCache::default()),
        )
        .await;

        assert_eq!(manager.synthesizer_id(), Some(SpeechProviderId::OpenAi));
    }

    #[tokio::test]
    async fn test_unavailable_preference_falls_back_in_order() {
        let eleven = FakeSynthesizer::new(SpeechProviderId::ElevenLabs, false);
        let openai = FakeSynthesizer::new(SpeechProviderId::OpenAi, true);
        let manager = TtsManager::bind(
            &synths(&[eleven, openai]),
            Some("elevenlabs"),
            Arc::new(MemoryCache::default()),
        )
        .await;

        assert_eq!(manager.synthesizer_id(), Some(SpeechProviderId::OpenAi));
    }

    #[tokio::test]
    async fn test_nothing_available_binds_none() {
        let eleven = FakeSynthesizer::new(SpeechProviderId::ElevenLabs, false);
        let manager =
            TtsManager::bind(&synths(&[eleven]), None, Arc::new(MemoryCache::default())).await;
        assert!(!manager.has_synthesizer());
    }

    #[tokio::test]
    async fn test_cache_reporting_and_clear() {
        let synth = FakeSynthesizer::new(SpeechProviderId::OpenAi, true);
        let manager = TtsManager::with_synthesizer(
            Some(synth as Arc<dyn SpeechSynthesizerPort>),
            Arc::new(MemoryCache::default()),
        );

        manager.get_or_synthesize("one").await.unwrap();
        manager.get_or_synthesize("two").await.unwrap();
        assert_eq!(manager.cache_file_count().await.unwrap(), 2);
        assert!(manager.cache_size_bytes().await.unwrap() > 0);

        assert_eq!(manager.clear_cache().await.unwrap(), 2);
        assert_eq!(manager.cache_file_count().await.unwrap(), 0);
        assert_eq!(manager.cache_size_bytes().await.unwrap(), 0);
    }
}
