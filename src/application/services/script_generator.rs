//! Script Generator - AI 提供方回退编排
//!
//! 按固定优先级依次尝试回答生成方：跳过不可用的，失败则换下一个，
//! 第一个非空结果交给提取器后立即返回。不并行，也不合并部分结果

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{AnswerGeneratorPort, ProviderError};
use crate::domain::script::{build_prompt, extract_blocks, ExtractError, NarrationBlock};
use crate::domain::AnswerProviderId;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("No AI providers are available")]
    NoProviderAvailable,

    #[error("All AI providers failed. Last error: {last_error}")]
    AllProvidersExhausted { last_error: String },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// 讲解脚本生成器（回退编排器）
pub struct ScriptGenerator {
    providers: Vec<Arc<dyn AnswerGeneratorPort>>,
}

impl ScriptGenerator {
    /// `providers` 的顺序即回退顺序
    pub fn new(providers: Vec<Arc<dyn AnswerGeneratorPort>>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[Arc<dyn AnswerGeneratorPort>] {
        &self.providers
    }

    /// 根据偏好筛选候选列表
    ///
    /// - 已知 id：只保留该提供方
    /// - 未知 id 或未注册：记录日志并使用完整列表
    fn candidates(&self, preferred: Option<&str>) -> Vec<Arc<dyn AnswerGeneratorPort>> {
        let Some(preferred) = preferred else {
            return self.providers.clone();
        };

        let id = match preferred.parse::<AnswerProviderId>() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(provider = %preferred, "Unknown AI provider, using all providers");
                return self.providers.clone();
            }
        };

        let selected: Vec<_> = self
            .providers
            .iter()
            .filter(|p| p.id() == id)
            .cloned()
            .collect();

        if selected.is_empty() {
            tracing::warn!(provider = %id, "Preferred AI provider not registered, trying all");
            return self.providers.clone();
        }

        selected
    }

    /// 生成讲解脚本
    pub async fn generate(
        &self,
        repository_path: &Path,
        question: &str,
        preferred_provider: Option<&str>,
    ) -> Result<Vec<NarrationBlock>, ScriptError> {
        let prompt = build_prompt(&repository_path.to_string_lossy(), question);
        let candidates = self.candidates(preferred_provider);

        let mut any_available = false;
        let mut last_error: Option<ProviderError> = None;

        for provider in candidates {
            let id = provider.id();

            if !provider.is_available().await {
                tracing::debug!(provider = %id, "AI provider not available, skipping");
                continue;
            }
            any_available = true;

            tracing::info!(provider = %id, "Attempting AI provider");

            match provider.analyze(repository_path, question, &prompt).await {
                Ok(raw) if !raw.trim().is_empty() => {
                    tracing::info!(provider = %id, response_len = raw.len(), "Got response from AI provider");
                    let blocks = extract_blocks(&raw)?;
                    tracing::info!(provider = %id, blocks = blocks.len(), "Script generated");
                    return Ok(blocks);
                }
                Ok(_) => {
                    tracing::warn!(provider = %id, "AI provider returned empty response");
                    last_error = Some(ProviderError::EmptyResponse(id));
                }
                Err(e) => {
                    tracing::error!(provider = %id, error = %e, "AI provider failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if any_available => Err(ScriptError::AllProvidersExhausted {
                last_error: e.to_string(),
            }),
            _ => Err(ScriptError::NoProviderAvailable),
        }
    }
}
