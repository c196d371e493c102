//! Script Commands

use std::path::PathBuf;

use crate::domain::NarrationBlock;

/// 生成讲解脚本命令
#[derive(Debug, Clone)]
pub struct GenerateScript {
    pub repository_path: PathBuf,
    pub question: String,
    /// 偏好的 AI 提供方 id
    pub ai_provider: Option<String>,
    /// 偏好的 TTS 提供方 id
    pub tts_provider: Option<String>,
}

/// 生成讲解脚本响应
#[derive(Debug, Clone)]
pub struct GenerateScriptResponse {
    pub script: Vec<NarrationBlock>,
    /// 与 `script` 一一对应的登记 id；没有可用 TTS 时为 None
    pub audio_ids: Option<Vec<String>>,
}
