//! Audio Commands

/// 单段文本最大字符数
pub const MAX_AUDIO_TEXT_CHARS: usize = 5000;

/// 合成单段文本命令
#[derive(Debug, Clone)]
pub struct GenerateAudio {
    pub text: String,
}

/// 合成单段文本响应
#[derive(Debug, Clone)]
pub struct GenerateAudioResponse {
    pub audio_id: String,
    pub cache_hit: bool,
}

/// 清空音频缓存命令
#[derive(Debug, Clone, Default)]
pub struct ClearCache;

/// 清空音频缓存响应
#[derive(Debug, Clone)]
pub struct ClearCacheResponse {
    pub removed_files: u64,
}
