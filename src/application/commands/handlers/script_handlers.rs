//! Script Command Handlers

use std::sync::Arc;

use crate::application::commands::{GenerateScript, GenerateScriptResponse};
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioCachePort, AudioRegistryPort, SpeechSynthesizerPort};
use crate::application::services::{ScriptGenerator, TtsManager};

// ============================================================================
// GenerateScript
// ============================================================================

/// GenerateScript Handler
///
/// 生成脚本后为每个块预合成音频并登记，任意一个块的音频失败则整体失败
pub struct GenerateScriptHandler {
    script_generator: Arc<ScriptGenerator>,
    synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>>,
    audio_cache: Arc<dyn AudioCachePort>,
    audio_registry: Arc<dyn AudioRegistryPort>,
}

impl GenerateScriptHandler {
    pub fn new(
        script_generator: Arc<ScriptGenerator>,
        synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>>,
        audio_cache: Arc<dyn AudioCachePort>,
        audio_registry: Arc<dyn AudioRegistryPort>,
    ) -> Self {
        Self {
            script_generator,
            synthesizers,
            audio_cache,
            audio_registry,
        }
    }

    pub async fn handle(
        &self,
        command: GenerateScript,
    ) -> Result<GenerateScriptResponse, ApplicationError> {
        if command.question.trim().is_empty() {
            return Err(ApplicationError::validation("Question must not be empty"));
        }
        if !command.repository_path.is_dir() {
            return Err(ApplicationError::validation(format!(
                "Repository path does not exist: {}",
                command.repository_path.display()
            )));
        }

        let script = self
            .script_generator
            .generate(
                &command.repository_path,
                &command.question,
                command.ai_provider.as_deref(),
            )
            .await?;

        let tts = TtsManager::bind(
            &self.synthesizers,
            command.tts_provider.as_deref(),
            Arc::clone(&self.audio_cache),
        )
        .await;

        if !tts.has_synthesizer() {
            tracing::warn!("No TTS provider available, skipping audio generation");
            return Ok(GenerateScriptResponse {
                script,
                audio_ids: None,
            });
        }

        let mut audio_ids = Vec::with_capacity(script.len());
        for (index, block) in script.iter().enumerate() {
            let audio = tts.get_or_synthesize(block.markdown()).await.map_err(|e| {
                tracing::error!(block = index, error = %e, "Audio generation failed");
                ApplicationError::ExternalServiceError(format!(
                    "Failed to generate audio for block {}: {}",
                    index, e
                ))
            })?;

            let size = audio.data.len();
            let audio_id = self.audio_registry.insert(audio.data);
            tracing::info!(
                block = index,
                audio_id = %audio_id,
                size,
                cache_hit = audio.cache_hit,
                "Audio registered"
            );
            audio_ids.push(audio_id);
        }

        Ok(GenerateScriptResponse {
            script,
            audio_ids: Some(audio_ids),
        })
    }
}
