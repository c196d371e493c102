//! Audio Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    ClearCache, ClearCacheResponse, GenerateAudio, GenerateAudioResponse, MAX_AUDIO_TEXT_CHARS,
};
use crate::application::error::ApplicationError;
use crate::application::ports::AudioRegistryPort;
use crate::application::services::TtsManager;

// ============================================================================
// GenerateAudio
// ============================================================================

/// GenerateAudio Handler
pub struct GenerateAudioHandler {
    tts: Arc<TtsManager>,
    audio_registry: Arc<dyn AudioRegistryPort>,
}

impl GenerateAudioHandler {
    pub fn new(tts: Arc<TtsManager>, audio_registry: Arc<dyn AudioRegistryPort>) -> Self {
        Self {
            tts,
            audio_registry,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateAudio,
    ) -> Result<GenerateAudioResponse, ApplicationError> {
        let chars = command.text.chars().count();
        if chars == 0 || chars > MAX_AUDIO_TEXT_CHARS {
            return Err(ApplicationError::validation(format!(
                "Text must be between 1 and {} characters",
                MAX_AUDIO_TEXT_CHARS
            )));
        }

        let audio = self.tts.get_or_synthesize(&command.text).await?;
        let audio_id = self.audio_registry.insert(audio.data);

        tracing::info!(audio_id = %audio_id, cache_hit = audio.cache_hit, "Audio generated");

        Ok(GenerateAudioResponse {
            audio_id,
            cache_hit: audio.cache_hit,
        })
    }
}

// ============================================================================
// ClearCache
// ============================================================================

/// ClearCache Handler
pub struct ClearCacheHandler {
    tts: Arc<TtsManager>,
}

impl ClearCacheHandler {
    pub fn new(tts: Arc<TtsManager>) -> Self {
        Self { tts }
    }

    pub async fn handle(&self, _command: ClearCache) -> Result<ClearCacheResponse, ApplicationError> {
        let removed_files = self.tts.clear_cache().await?;
        Ok(ClearCacheResponse { removed_files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{RegistryError, SpeechSynthesizerPort};
    use crate::application::services::fakes::{FakeSynthesizer, MemoryCache};
    use crate::domain::SpeechProviderId;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecRegistry {
        entries: Mutex<Vec<Vec<u8>>>,
    }

    impl AudioRegistryPort for VecRegistry {
        fn insert(&self, audio_data: Vec<u8>) -> String {
            let mut entries = self.entries.lock().unwrap();
            entries.push(audio_data);
            (entries.len() - 1).to_string()
        }

        fn get(&self, audio_id: &str) -> Result<Vec<u8>, RegistryError> {
            audio_id
                .parse::<usize>()
                .ok()
                .and_then(|i| self.entries.lock().unwrap().get(i).cloned())
                .ok_or_else(|| RegistryError::NotFound(audio_id.to_string()))
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    fn tts_manager() -> Arc<TtsManager> {
        let synth = FakeSynthesizer::new(SpeechProviderId::ElevenLabs, true);
        Arc::new(TtsManager::with_synthesizer(
            Some(synth as Arc<dyn SpeechSynthesizerPort>),
            Arc::new(MemoryCache::default()),
        ))
    }

    #[tokio::test]
    async fn test_cache_hit_is_reported_on_repeat() {
        let handler = GenerateAudioHandler::new(tts_manager(), Arc::new(VecRegistry::default()));

        let first = handler
            .handle(GenerateAudio { text: "hi".into() })
            .await
            .unwrap();
        let second = handler
            .handle(GenerateAudio { text: "hi".into() })
            .await
            .unwrap();

        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert_ne!(first.audio_id, second.audio_id);
    }

    #[tokio::test]
    async fn test_text_length_is_validated() {
        let handler = GenerateAudioHandler::new(tts_manager(), Arc::new(VecRegistry::default()));

        let empty = handler.handle(GenerateAudio { text: String::new() }).await;
        let long = handler
            .handle(GenerateAudio {
                text: "a".repeat(MAX_AUDIO_TEXT_CHARS + 1),
            })
            .await;

        assert!(matches!(empty, Err(ApplicationError::ValidationError(_))));
        assert!(matches!(long, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_no_synthesizer_maps_to_application_error() {
        let tts = Arc::new(TtsManager::with_synthesizer(None, Arc::new(MemoryCache::default())));
        let handler = GenerateAudioHandler::new(tts, Arc::new(VecRegistry::default()));

        let err = handler
            .handle(GenerateAudio { text: "hi".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NoSynthesizerAvailable));
    }

    #[tokio::test]
    async fn test_clear_cache_reports_removed_files() {
        let tts = tts_manager();
        tts.get_or_synthesize("a").await.unwrap();
        tts.get_or_synthesize("b").await.unwrap();

        let response = ClearCacheHandler::new(tts).handle(ClearCache).await.unwrap();
        assert_eq!(response.removed_files, 2);
    }
}
