//! Application State
//!
//! 持有端口实现与全部 Command/Query Handlers

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ClearCacheHandler, GenerateAudioHandler, GenerateScriptHandler,
    // Query handlers
    GetAudioHandler, GetCacheStatsHandler, GetFileContentHandler, ListProvidersHandler,
    QuickSystemCheckHandler, SystemCheckHandler,
    // Ports
    AnswerGeneratorPort, AudioCachePort, AudioRegistryPort, SpeechSynthesizerPort,
    // Services
    ScriptGenerator, TtsManager,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub audio_cache: Arc<dyn AudioCachePort>,
    pub audio_registry: Arc<dyn AudioRegistryPort>,
    pub tts: Arc<TtsManager>,

    // ========== Command Handlers ==========
    pub generate_script_handler: GenerateScriptHandler,
    pub generate_audio_handler: GenerateAudioHandler,
    pub clear_cache_handler: ClearCacheHandler,

    // ========== Query Handlers ==========
    pub get_audio_handler: GetAudioHandler,
    pub cache_stats_handler: GetCacheStatsHandler,
    pub list_providers_handler: ListProvidersHandler,
    pub quick_check_handler: QuickSystemCheckHandler,
    pub system_check_handler: SystemCheckHandler,
    pub file_content_handler: GetFileContentHandler,
}

impl AppState {
    /// 创建应用状态
    ///
    /// 默认 TTS 合成方在这里选定，`/generate-audio` 始终使用它
    pub async fn new(
        answer_generators: Vec<Arc<dyn AnswerGeneratorPort>>,
        synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>>,
        audio_cache: Arc<dyn AudioCachePort>,
        audio_registry: Arc<dyn AudioRegistryPort>,
    ) -> Self {
        let tts = Arc::new(TtsManager::bind(&synthesizers, None, audio_cache.clone()).await);
        let script_generator = Arc::new(ScriptGenerator::new(answer_generators.clone()));

        Self {
            audio_cache: audio_cache.clone(),
            audio_registry: audio_registry.clone(),
            tts: tts.clone(),

            // Command handlers
            generate_script_handler: GenerateScriptHandler::new(
                script_generator,
                synthesizers.clone(),
                audio_cache.clone(),
                audio_registry.clone(),
            ),
            generate_audio_handler: GenerateAudioHandler::new(tts.clone(), audio_registry.clone()),
            clear_cache_handler: ClearCacheHandler::new(tts),

            // Query handlers
            get_audio_handler: GetAudioHandler::new(audio_registry),
            cache_stats_handler: GetCacheStatsHandler::new(audio_cache),
            list_providers_handler: ListProvidersHandler::new(
                answer_generators.clone(),
                synthesizers.clone(),
            ),
            quick_check_handler: QuickSystemCheckHandler::new(
                answer_generators.clone(),
                synthesizers.clone(),
            ),
            system_check_handler: SystemCheckHandler::new(answer_generators, synthesizers),
            file_content_handler: GetFileContentHandler::new(),
        }
    }
}
