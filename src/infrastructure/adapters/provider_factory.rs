//! Provider Factory - 按配置装配 AI / TTS 提供方
//!
//! 返回的列表顺序即回退优先级：
//! - AI: claude_code -> openai -> opencode
//! - TTS: elevenlabs -> openai

use std::sync::Arc;

use crate::application::ports::{AnswerGeneratorPort, ProcessRunnerPort, SpeechSynthesizerPort};
use crate::config::AppConfig;

use super::ai::{CliAgentConfig, CliAnswerGenerator, OpenAiChatConfig, OpenAiChatGenerator};
use super::tts::{ElevenLabsClient, ElevenLabsConfig, OpenAiTtsClient, OpenAiTtsConfig};

/// 按优先级构造回答生成方
///
/// HTTP 客户端构造失败的提供方会被跳过并记录日志
pub fn answer_generators(
    config: &AppConfig,
    runner: Arc<dyn ProcessRunnerPort>,
) -> Vec<Arc<dyn AnswerGeneratorPort>> {
    let cli_config = |program: &str| {
        CliAgentConfig::new(program)
            .with_timeout(config.cli.timeout())
            .with_retry(config.cli.retry_policy())
    };

    let mut generators: Vec<Arc<dyn AnswerGeneratorPort>> = vec![Arc::new(
        CliAnswerGenerator::claude_code(cli_config(&config.cli.claude_command), runner.clone()),
    )];

    let openai = OpenAiChatConfig {
        api_key: config.providers.openai_api_key.clone(),
        base_url: config.providers.openai_base_url.clone(),
        model: config.providers.openai_model.clone(),
        timeout_secs: config.cli.timeout_secs,
        ..OpenAiChatConfig::default()
    };
    match OpenAiChatGenerator::new(openai) {
        Ok(generator) => generators.push(Arc::new(generator)),
        Err(e) => tracing::warn!(error = %e, "Skipping OpenAI answer provider"),
    }

    generators.push(Arc::new(CliAnswerGenerator::opencode(
        cli_config(&config.cli.opencode_command),
        runner,
    )));

    generators
}

/// 按优先级构造语音合成方
pub fn speech_synthesizers(config: &AppConfig) -> Vec<Arc<dyn SpeechSynthesizerPort>> {
    let mut synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>> = Vec::new();

    let elevenlabs = ElevenLabsConfig {
        api_key: config.providers.elevenlabs_api_key.clone(),
        base_url: config.providers.elevenlabs_base_url.clone(),
        voice: config.providers.elevenlabs_voice.clone(),
        model: config.providers.elevenlabs_model.clone(),
        ..ElevenLabsConfig::default()
    };
    match ElevenLabsClient::new(elevenlabs) {
        Ok(client) => synthesizers.push(Arc::new(client)),
        Err(e) => tracing::warn!(error = %e, "Skipping ElevenLabs synthesizer"),
    }

    let openai = OpenAiTtsConfig {
        api_key: config.providers.openai_api_key.clone(),
        base_url: config.providers.openai_base_url.clone(),
        model: config.providers.openai_tts_model.clone(),
        voice: config.providers.openai_tts_voice.clone(),
        ..OpenAiTtsConfig::default()
    };
    match OpenAiTtsClient::new(openai) {
        Ok(client) => synthesizers.push(Arc::new(client)),
        Err(e) => tracing::warn!(error = %e, "Skipping OpenAI synthesizer"),
    }

    synthesizers
}
