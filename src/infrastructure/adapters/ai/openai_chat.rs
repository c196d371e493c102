//! OpenAI Chat - 托管 chat completions 回答生成方
//!
//! POST {base_url}/v1/chat/completions
//! 仓库内容通过文件清单摘要传给模型

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::repo_context::{build_repository_context, DEFAULT_MAX_FILES};
use crate::application::ports::{AnswerGeneratorPort, ProviderError};
use crate::domain::script::SYSTEM_PROMPT;
use crate::domain::AnswerProviderId;

#[derive(Debug, Clone)]
pub struct OpenAiChatConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub max_context_files: usize,
}

impl Default for OpenAiChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4-turbo-preview".to_string(),
            temperature: 0.3,
            max_tokens: 4000,
            timeout_secs: 120,
            max_context_files: DEFAULT_MAX_FILES,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

pub struct OpenAiChatGenerator {
    client: Client,
    config: OpenAiChatConfig,
}

impl OpenAiChatGenerator {
    pub fn new(config: OpenAiChatConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::RequestFailed {
                provider: AnswerProviderId::OpenAi,
                message: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn failed(message: impl Into<String>) -> ProviderError {
        ProviderError::RequestFailed {
            provider: AnswerProviderId::OpenAi,
            message: message.into(),
        }
    }
}

fn user_message(repository_path: &Path, question: &str, context: &str) -> String {
    format!(
        "Repository path: {}\nQuestion: {}\n\nRepository structure and key files:\n{}\n\n\
         Please analyze this repository and answer the question. Remember to respond with a \
         valid JSON array as specified in the system prompt.",
        repository_path.display(),
        question,
        context
    )
}

#[async_trait]
impl AnswerGeneratorPort for OpenAiChatGenerator {
    fn id(&self) -> AnswerProviderId {
        AnswerProviderId::OpenAi
    }

    async fn analyze(
        &self,
        repository_path: &Path,
        question: &str,
        _prompt: &str,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .api_key()
            .ok_or(ProviderError::Unavailable(AnswerProviderId::OpenAi))?;

        let root = repository_path.to_path_buf();
        let max_files = self.config.max_context_files;
        let context = tokio::task::spawn_blocking(move || build_repository_context(&root, max_files))
            .await
            .map_err(|e| Self::failed(format!("Repository walk failed: {}", e)))?;

        let user = user_message(repository_path, question, &context);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            model = %self.config.model,
            context_len = context.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        provider: AnswerProviderId::OpenAi,
                        secs: self.config.timeout_secs,
                    }
                } else {
                    Self::failed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::failed(format!("HTTP {}: {}", status, error_text)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| Self::failed(format!("Invalid response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ProviderError::EmptyResponse(AnswerProviderId::OpenAi));
        }

        Ok(content)
    }

    async fn is_available(&self) -> bool {
        self.api_key().is_some()
    }
}
