//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{CacheError, RegistryError};
use crate::application::services::{AudioError, ScriptError};
use crate::domain::ExtractError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 没有任何可用的 AI 提供方
    #[error("No AI providers are available")]
    NoProviderAvailable,

    /// 所有 AI 提供方都失败
    #[error("All AI providers failed. Last error: {0}")]
    ProvidersExhausted(String),

    /// AI 输出无法解析为讲解脚本
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    /// 没有可用的 TTS 提供方
    #[error("No TTS provider available")]
    NoSynthesizerAvailable,

    /// 外部服务错误
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<ScriptError> for ApplicationError {
    fn from(err: ScriptError) -> Self {
        match err {
            ScriptError::NoProviderAvailable => Self::NoProviderAvailable,
            ScriptError::AllProvidersExhausted { last_error } => Self::ProvidersExhausted(last_error),
            ScriptError::Extract(e) => e.into(),
        }
    }
}

impl From<ExtractError> for ApplicationError {
    fn from(err: ExtractError) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<AudioError> for ApplicationError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::NoSynthesizerAvailable => Self::NoSynthesizerAvailable,
            AudioError::SynthesisFailed(message) => Self::ExternalServiceError(message),
            AudioError::Cache(e) => e.into(),
        }
    }
}

impl From<CacheError> for ApplicationError {
    fn from(err: CacheError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<RegistryError> for ApplicationError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(id) => Self::not_found("Audio", id),
        }
    }
}
