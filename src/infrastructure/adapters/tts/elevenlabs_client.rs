//! ElevenLabs TTS Client
//!
//! POST {base_url}/v1/text-to-speech/{voice_id}
//! Header: xi-api-key
//! Request: {"text": "...", "model_id": "..."}  (JSON)
//! Response: audio/mpeg binary
//!
//! 连通性检查: GET {base_url}/v1/user

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{access_status, map_request_error, missing_key_status, read_audio, DEFAULT_TTS_TIMEOUT_SECS};
use crate::application::ports::{SpeechServiceStatus, SpeechSynthesizerPort, TtsError};
use crate::domain::SpeechProviderId;

/// 常用预置音色名 -> voice id
const PREMADE_VOICES: &[(&str, &str)] = &[
    ("Rachel", "21m00Tcm4TlvDq8ikWAM"),
    ("Domi", "AZnzlk1XvdvUeBnXmlld"),
    ("Bella", "EXAVITQu4vr4xnSDxMaL"),
    ("Antoni", "ErXwobaYiN019PkySvjV"),
    ("Elli", "MF3mGyEYCl7XYWbV9V6O"),
    ("Josh", "TxGEqnHWrfWFTfGW9XjX"),
    ("Arnold", "VR6AewLTigWG4xSOukaG"),
    ("Adam", "pNInz6obpgDQGcFmaJgB"),
    ("Sam", "yoZ06aMxZJJ28mfd3POQ"),
];

/// 音色名解析为 voice id，未知名称原样作为 id 使用
pub fn resolve_voice_id(voice: &str) -> &str {
    PREMADE_VOICES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(voice))
        .map(|(_, id)| *id)
        .unwrap_or(voice)
}

#[derive(Debug, Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// 音色名或 voice id
    pub voice: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.elevenlabs.io".to_string(),
            voice: "Rachel".to_string(),
            model: "eleven_turbo_v2_5".to_string(),
            timeout_secs: DEFAULT_TTS_TIMEOUT_SECS,
        }
    }
}

pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsClient {
    pub fn new(config: ElevenLabsConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    fn user_url(&self) -> String {
        format!("{}/v1/user", self.config.base_url.trim_end_matches('/'))
    }

    fn speech_url(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            resolve_voice_id(&self.config.voice)
        )
    }
}

#[async_trait]
impl SpeechSynthesizerPort for ElevenLabsClient {
    fn id(&self) -> SpeechProviderId {
        SpeechProviderId::ElevenLabs
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let api_key = self
            .api_key()
            .ok_or(TtsError::Unavailable(SpeechProviderId::ElevenLabs))?;

        tracing::debug!(
            url = %self.speech_url(),
            model = %self.config.model,
            text_len = text.len(),
            "Sending ElevenLabs TTS request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .header("xi-api-key", api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&ElevenLabsRequest {
                text,
                model_id: &self.config.model,
            })
            .send()
            .await
            .map_err(|e| map_request_error("ElevenLabs", e))?;

        let audio_data = read_audio("ElevenLabs", response).await?;

        tracing::info!(audio_size = audio_data.len(), "ElevenLabs synthesis completed");

        Ok(audio_data)
    }

    async fn is_available(&self) -> bool {
        self.api_key().is_some()
    }

    async fn check_access(&self) -> SpeechServiceStatus {
        let Some(api_key) = self.api_key() else {
            return missing_key_status("ElevenLabs");
        };

        let request = self.client.get(self.user_url()).header("xi-api-key", api_key);
        access_status("ElevenLabs", request, |_| async { None }).await
    }
}
