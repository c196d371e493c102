//! Provider Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AnswerGeneratorPort, CliStatus, SpeechServiceStatus, SpeechSynthesizerPort,
};
use crate::application::queries::provider_queries::{
    ListProviders, ListProvidersResponse, QuickSystemCheck, QuickSystemCheckResponse,
    RequirementsMet, ServiceStatuses, SystemCheck, SystemCheckResponse,
};
use crate::domain::{AnswerProviderId, ProviderInfo, SpeechProviderId};

/// ListProviders Handler - 逐个探测可用性
pub struct ListProvidersHandler {
    answer_generators: Vec<Arc<dyn AnswerGeneratorPort>>,
    synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>>,
}

impl ListProvidersHandler {
    pub fn new(
        answer_generators: Vec<Arc<dyn AnswerGeneratorPort>>,
        synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>>,
    ) -> Self {
        Self {
            answer_generators,
            synthesizers,
        }
    }

    pub async fn handle(&self, _query: ListProviders) -> Result<ListProvidersResponse, ApplicationError> {
        let mut ai_providers = Vec::new();
        for provider in &self.answer_generators {
            if provider.is_available().await {
                ai_providers.push(ProviderInfo::from(provider.id()));
            }
        }

        let mut tts_providers = Vec::new();
        for synthesizer in &self.synthesizers {
            if synthesizer.is_available().await {
                tts_providers.push(ProviderInfo::from(synthesizer.id()));
            }
        }

        Ok(ListProvidersResponse {
            ai_providers,
            tts_providers,
        })
    }
}

/// QuickSystemCheck Handler
///
/// AI 只统计本地 CLI；TTS 只看是否配置了 key
pub struct QuickSystemCheckHandler {
    answer_generators: Vec<Arc<dyn AnswerGeneratorPort>>,
    synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>>,
}

impl QuickSystemCheckHandler {
    pub fn new(
        answer_generators: Vec<Arc<dyn AnswerGeneratorPort>>,
        synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>>,
    ) -> Self {
        Self {
            answer_generators,
            synthesizers,
        }
    }

    pub async fn handle(
        &self,
        _query: QuickSystemCheck,
    ) -> Result<QuickSystemCheckResponse, ApplicationError> {
        let mut has_ai_cli = false;
        for provider in self.answer_generators.iter().filter(|p| p.id().is_local_cli()) {
            if provider.is_available().await {
                has_ai_cli = true;
                break;
            }
        }

        let mut has_tts = false;
        for synthesizer in &self.synthesizers {
            if synthesizer.is_available().await {
                has_tts = true;
                break;
            }
        }

        Ok(QuickSystemCheckResponse {
            system_ready: has_ai_cli && has_tts,
            has_ai_cli,
            has_tts,
        })
    }
}

/// SystemCheck Handler
///
/// 四项检查并发执行；TTS 检查会真正请求服务端
pub struct SystemCheckHandler {
    answer_generators: Vec<Arc<dyn AnswerGeneratorPort>>,
    synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>>,
}

impl SystemCheckHandler {
    pub fn new(
        answer_generators: Vec<Arc<dyn AnswerGeneratorPort>>,
        synthesizers: Vec<Arc<dyn SpeechSynthesizerPort>>,
    ) -> Self {
        Self {
            answer_generators,
            synthesizers,
        }
    }

    pub async fn handle(&self, _query: SystemCheck) -> Result<SystemCheckResponse, ApplicationError> {
        let (claude_code, opencode, elevenlabs, openai_tts) = tokio::join!(
            self.cli_status(AnswerProviderId::ClaudeCode),
            self.cli_status(AnswerProviderId::OpenCode),
            self.speech_status(SpeechProviderId::ElevenLabs),
            self.speech_status(SpeechProviderId::OpenAi),
        );

        let ai_cli = cli_ready(&claude_code) || cli_ready(&opencode);
        let tts_service = speech_ready(&elevenlabs) || speech_ready(&openai_tts);

        let services = ServiceStatuses {
            claude_code,
            opencode,
            elevenlabs,
            openai_tts,
        };
        let recommendations = recommendations(&services, ai_cli, tts_service);

        tracing::info!(ai_cli, tts_service, "System check completed");

        Ok(SystemCheckResponse {
            system_ready: ai_cli && tts_service,
            requirements_met: RequirementsMet { ai_cli, tts_service },
            services,
            recommendations,
        })
    }

    async fn cli_status(&self, id: AnswerProviderId) -> CliStatus {
        let status = match self.answer_generators.iter().find(|p| p.id() == id) {
            Some(provider) => provider.cli_status().await,
            None => None,
        };

        status.unwrap_or_else(|| CliStatus {
            error: Some(format!("{} not found in PATH", id.display_name())),
            ..Default::default()
        })
    }

    async fn speech_status(&self, id: SpeechProviderId) -> SpeechServiceStatus {
        match self.synthesizers.iter().find(|s| s.id() == id) {
            Some(synthesizer) => synthesizer.check_access().await,
            None => SpeechServiceStatus {
                error: Some(format!("{} is not configured", id.display_name())),
                ..Default::default()
            },
        }
    }
}

fn cli_ready(status: &CliStatus) -> bool {
    status.installed && status.configured
}

fn speech_ready(status: &SpeechServiceStatus) -> bool {
    status.configured && status.accessible
}

fn recommendations(services: &ServiceStatuses, ai_cli: bool, tts_service: bool) -> Vec<String> {
    let mut out = Vec::new();

    if !ai_cli {
        let (claude, opencode) = (&services.claude_code, &services.opencode);
        if !claude.installed && !opencode.installed {
            out.push("Install either Claude Code (recommended) or OpenCode CLI tool".to_string());
        } else if claude.installed && !claude.configured {
            out.push("Configure Claude Code by running: claude login".to_string());
        } else if opencode.installed && !opencode.configured {
            out.push("Configure OpenCode by setting up your API credentials".to_string());
        }
    }

    if !tts_service {
        let (elevenlabs, openai) = (&services.elevenlabs, &services.openai_tts);
        if !elevenlabs.api_key_set && !openai.api_key_set {
            out.push("Set either ELEVENLABS_API_KEY or OPENAI_API_KEY environment variable".to_string());
        } else if elevenlabs.api_key_set && !elevenlabs.accessible {
            out.push(format!(
                "Fix ElevenLabs configuration: {}",
                elevenlabs.error.as_deref().unwrap_or("unknown error")
            ));
        } else if openai.api_key_set && !openai.accessible {
            out.push(format!(
                "Fix OpenAI configuration: {}",
                openai.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::fakes::{FakeAnswerGenerator, FakeSynthesizer};
    use crate::domain::{AnswerProviderId, SpeechProviderId};

    fn answers(list: Vec<Arc<FakeAnswerGenerator>>) -> Vec<Arc<dyn AnswerGeneratorPort>> {
        list.into_iter()
            .map(|p| p as Arc<dyn AnswerGeneratorPort>)
            .collect()
    }

    fn speech(list: Vec<Arc<FakeSynthesizer>>) -> Vec<Arc<dyn SpeechSynthesizerPort>> {
        list.into_iter()
            .map(|s| s as Arc<dyn SpeechSynthesizerPort>)
            .collect()
    }

    #[tokio::test]
    async fn test_lists_only_available_providers() {
        let handler = ListProvidersHandler::new(
            answers(vec![
                FakeAnswerGenerator::unavailable(AnswerProviderId::ClaudeCode),
                FakeAnswerGenerator::ok(AnswerProviderId::OpenCode, "[]"),
            ]),
            speech(vec![
                FakeSynthesizer::new(SpeechProviderId::ElevenLabs, true),
                FakeSynthesizer::new(SpeechProviderId::OpenAi, false),
            ]),
        );

        let response = handler.handle(ListProviders).await.unwrap();

        let ai: Vec<_> = response.ai_providers.iter().map(|p| p.id.as_str()).collect();
        let tts: Vec<_> = response.tts_providers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ai, vec!["opencode"]);
        assert_eq!(tts, vec!["elevenlabs"]);
        assert_eq!(response.tts_providers[0].name, "ElevenLabs");
    }

    #[tokio::test]
    async fn test_hosted_ai_does_not_count_as_cli() {
        let handler = QuickSystemCheckHandler::new(
            answers(vec![FakeAnswerGenerator::ok(AnswerProviderId::OpenAi, "[]")]),
            speech(vec![FakeSynthesizer::new(SpeechProviderId::OpenAi, true)]),
        );

        let response = handler.handle(QuickSystemCheck).await.unwrap();

        assert!(!response.has_ai_cli);
        assert!(response.has_tts);
        assert!(!response.system_ready);
    }

    #[tokio::test]
    async fn test_ready_with_cli_and_tts() {
        let handler = QuickSystemCheckHandler::new(
            answers(vec![FakeAnswerGenerator::ok(AnswerProviderId::ClaudeCode, "[]")]),
            speech(vec![FakeSynthesizer::new(SpeechProviderId::ElevenLabs, true)]),
        );

        assert!(handler.handle(QuickSystemCheck).await.unwrap().system_ready);
    }

    #[tokio::test]
    async fn test_full_check_reports_each_service() {
        let handler = SystemCheckHandler::new(
            answers(vec![
                FakeAnswerGenerator::ok(AnswerProviderId::ClaudeCode, "[]"),
                FakeAnswerGenerator::ok(AnswerProviderId::OpenAi, "[]"),
                FakeAnswerGenerator::unavailable(AnswerProviderId::OpenCode),
            ]),
            speech(vec![
                FakeSynthesizer::new(SpeechProviderId::ElevenLabs, false),
                FakeSynthesizer::new(SpeechProviderId::OpenAi, true),
            ]),
        );

        let response = handler.handle(SystemCheck).await.unwrap();

        assert!(response.system_ready);
        assert_eq!(
            response.requirements_met,
            RequirementsMet {
                ai_cli: true,
                tts_service: true
            }
        );
        assert_eq!(response.services.claude_code.version.as_deref(), Some("claude_code 1.0.0"));
        assert!(!response.services.opencode.installed);
        assert!(!response.services.elevenlabs.api_key_set);
        assert!(response.services.openai_tts.accessible);
        assert!(response.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_full_check_recommends_missing_pieces() {
        let handler = SystemCheckHandler::new(
            answers(vec![FakeAnswerGenerator::ok(AnswerProviderId::OpenAi, "[]")]),
            speech(Vec::new()),
        );

        let response = handler.handle(SystemCheck).await.unwrap();

        assert!(!response.system_ready);
        assert_eq!(
            response.services.claude_code.error.as_deref(),
            Some("Claude Code not found in PATH")
        );
        assert_eq!(
            response.recommendations,
            vec![
                "Install either Claude Code (recommended) or OpenCode CLI tool".to_string(),
                "Set either ELEVENLABS_API_KEY or OPENAI_API_KEY environment variable".to_string(),
            ]
        );
    }

    #[test]
    fn test_rejected_key_is_surfaced_in_recommendation() {
        let services = ServiceStatuses {
            claude_code: CliStatus {
                installed: true,
                configured: true,
                ..Default::default()
            },
            opencode: CliStatus::default(),
            elevenlabs: SpeechServiceStatus {
                api_key_set: true,
                configured: true,
                accessible: false,
                error: Some("Invalid ElevenLabs API key".to_string()),
            },
            openai_tts: SpeechServiceStatus::default(),
        };

        assert_eq!(
            recommendations(&services, true, false),
            vec!["Fix ElevenLabs configuration: Invalid ElevenLabs API key".to_string()]
        );
    }
}
