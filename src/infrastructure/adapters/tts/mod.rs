//! TTS Adapters - HTTP 语音合成客户端
//!
//! - elevenlabs_client: ElevenLabs text-to-speech API
//! - openai_tts_client: OpenAI audio/speech API

mod elevenlabs_client;
mod openai_tts_client;

pub use elevenlabs_client::{resolve_voice_id, ElevenLabsClient, ElevenLabsConfig};
pub use openai_tts_client::{OpenAiTtsClient, OpenAiTtsConfig, OPENAI_TTS_VOICES};

use std::time::Duration;

use crate::application::ports::{SpeechServiceStatus, TtsError};

/// 默认请求超时（秒）
pub const DEFAULT_TTS_TIMEOUT_SECS: u64 = 120;

/// 连通性检查的请求超时
const ACCESS_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// 未配置 key 时的状态
fn missing_key_status(service: &str) -> SpeechServiceStatus {
    SpeechServiceStatus {
        error: Some(format!("{} API key not configured", service)),
        ..Default::default()
    }
}

/// 已配置 key，按连通性检查请求的结果填充状态
///
/// 401 视为 key 无效；`on_success` 可在 200 时进一步检查响应体
async fn access_status<F, Fut>(
    service: &str,
    request: reqwest::RequestBuilder,
    on_success: F,
) -> SpeechServiceStatus
where
    F: FnOnce(reqwest::Response) -> Fut,
    Fut: std::future::Future<Output = Option<String>>,
{
    let mut status = SpeechServiceStatus {
        api_key_set: true,
        configured: true,
        ..Default::default()
    };

    match request.timeout(ACCESS_CHECK_TIMEOUT).send().await {
        Ok(response) if response.status().is_success() => {
            status.accessible = true;
            status.error = on_success(response).await;
        }
        Ok(response) if response.status() == reqwest::StatusCode::UNAUTHORIZED => {
            status.error = Some(format!("Invalid {} API key", service));
        }
        Ok(response) => {
            status.error = Some(format!(
                "{} API returned status {}",
                service,
                response.status().as_u16()
            ));
        }
        Err(e) => {
            status.error = Some(format!("Could not connect to {} API: {}", service, e));
        }
    }

    tracing::debug!(service, accessible = status.accessible, error = ?status.error, "TTS access checked");
    status
}

fn map_request_error(service: &str, e: reqwest::Error) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else if e.is_connect() {
        TtsError::NetworkError(format!("Cannot connect to {}: {}", service, e))
    } else {
        TtsError::NetworkError(e.to_string())
    }
}

/// 检查状态码并读取音频字节
async fn read_audio(service: &str, response: reqwest::Response) -> Result<Vec<u8>, TtsError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(TtsError::ServiceError(format!(
            "{} HTTP {}: {}",
            service, status, error_text
        )));
    }

    let audio_data = response
        .bytes()
        .await
        .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
        .to_vec();

    if audio_data.is_empty() {
        return Err(TtsError::InvalidResponse(format!("{} returned no audio", service)));
    }

    Ok(audio_data)
}
