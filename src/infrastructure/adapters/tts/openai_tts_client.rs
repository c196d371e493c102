//! OpenAI TTS Client
//!
//! POST {base_url}/v1/audio/speech
//! Request: {"model": "tts-1", "voice": "alloy", "input": "..."}  (JSON)
//! Response: audio/mpeg binary
//!
//! 连通性检查: GET {base_url}/v1/models，并确认账号下存在 tts 模型

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{access_status, map_request_error, missing_key_status, read_audio, DEFAULT_TTS_TIMEOUT_SECS};
use crate::application::ports::{SpeechServiceStatus, SpeechSynthesizerPort, TtsError};
use crate::domain::SpeechProviderId;

/// 支持的音色
pub const OPENAI_TTS_VOICES: [&str; 6] = ["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    #[serde(default)]
    id: String,
}

impl ModelList {
    fn has_tts_model(&self) -> bool {
        self.data.iter().any(|m| m.id.to_lowercase().contains("tts"))
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiTtsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub voice: String,
    pub timeout_secs: u64,
}

impl Default for OpenAiTtsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            timeout_secs: DEFAULT_TTS_TIMEOUT_SECS,
        }
    }
}

pub struct OpenAiTtsClient {
    client: Client,
    config: OpenAiTtsConfig,
}

impl OpenAiTtsClient {
    pub fn new(config: OpenAiTtsConfig) -> Result<Self, TtsError> {
        if !OPENAI_TTS_VOICES.contains(&config.voice.as_str()) {
            tracing::warn!(voice = %config.voice, "Unrecognized OpenAI TTS voice");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    fn speech_url(&self) -> String {
        format!("{}/v1/audio/speech", self.config.base_url.trim_end_matches('/'))
    }

    fn models_url(&self) -> String {
        format!("{}/v1/models", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SpeechSynthesizerPort for OpenAiTtsClient {
    fn id(&self) -> SpeechProviderId {
        SpeechProviderId::OpenAi
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let api_key = self
            .api_key()
            .ok_or(TtsError::Unavailable(SpeechProviderId::OpenAi))?;

        tracing::debug!(
            url = %self.speech_url(),
            model = %self.config.model,
            voice = %self.config.voice,
            text_len = text.len(),
            "Sending OpenAI TTS request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(api_key)
            .json(&SpeechRequest {
                model: &self.config.model,
                voice: &self.config.voice,
                input: text,
            })
            .send()
            .await
            .map_err(|e| map_request_error("OpenAI TTS", e))?;

        let audio_data = read_audio("OpenAI TTS", response).await?;

        tracing::info!(audio_size = audio_data.len(), "OpenAI TTS synthesis completed");

        Ok(audio_data)
    }

    async fn is_available(&self) -> bool {
        self.api_key().is_some()
    }

    async fn check_access(&self) -> SpeechServiceStatus {
        let Some(api_key) = self.api_key() else {
            return missing_key_status("OpenAI");
        };

        let request = self.client.get(self.models_url()).bearer_auth(api_key);
        access_status("OpenAI", request, |response| async move {
            match response.json::<ModelList>().await {
                Ok(models) if models.has_tts_model() => None,
                Ok(_) => Some("TTS models not available in OpenAI account".to_string()),
                Err(e) => Some(format!("Could not read OpenAI model list: {}", e)),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = OpenAiTtsConfig::default();
        assert_eq!(config.model, "tts-1");
        assert_eq!(config.voice, "alloy");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(SpeechRequest {
            model: "tts-1",
            voice: "nova",
            input: "hello",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"model": "tts-1", "voice": "nova", "input": "hello"}));
    }

    #[tokio::test]
    async fn test_available_iff_key_present() {
        let without = OpenAiTtsClient::new(OpenAiTtsConfig::default()).unwrap();
        let with = OpenAiTtsClient::new(OpenAiTtsConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert!(!without.is_available().await);
        assert!(with.is_available().await);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let client = OpenAiTtsClient::new(OpenAiTtsConfig {
            api_key: Some("sk-test".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();

        let err = client.synthesize("hello").await.unwrap_err();
        assert!(matches!(err, TtsError::NetworkError(_) | TtsError::Timeout));
    }

    fn client_for(base_url: String, api_key: &str) -> OpenAiTtsClient {
        OpenAiTtsClient::new(OpenAiTtsConfig {
            api_key: Some(api_key.to_string()),
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_check_access_requires_tts_model() {
        use axum::{http::HeaderMap, http::StatusCode, routing::get, Json, Router};

        let router = Router::new().route(
            "/v1/models",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                match auth.as_str() {
                    "Bearer with-tts" => Ok(Json(serde_json::json!({
                        "data": [{"id": "gpt-4o"}, {"id": "tts-1-hd"}]
                    }))),
                    "Bearer no-tts" => Ok(Json(serde_json::json!({"data": [{"id": "gpt-4o"}]}))),
                    _ => Err(StatusCode::UNAUTHORIZED),
                }
            }),
        );
        let base_url = crate::infrastructure::adapters::tts::test_server::spawn(router).await;

        let ok = client_for(base_url.clone(), "with-tts").check_access().await;
        assert!(ok.accessible);
        assert!(ok.error.is_none());

        let no_tts = client_for(base_url.clone(), "no-tts").check_access().await;
        assert!(no_tts.accessible);
        assert_eq!(no_tts.error.as_deref(), Some("TTS models not available in OpenAI account"));

        let rejected = client_for(base_url, "wrong").check_access().await;
        assert!(!rejected.accessible);
        assert_eq!(rejected.error.as_deref(), Some("Invalid OpenAI API key"));
    }

    #[test]
    fn test_model_list_detects_tts_case_insensitively() {
        let models: ModelList =
            serde_json::from_str(r#"{"data":[{"id":"whisper-1"},{"id":"TTS-1"}]}"#).unwrap();
        assert!(models.has_tts_model());

        let empty: ModelList = serde_json::from_str("{}").unwrap();
        assert!(!empty.has_tts_model());
    }
}
