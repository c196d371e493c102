//! Audio Registry Port - 临时音频登记
//!
//! 刚生成的音频按随机 id 暂存在内存中，供音频获取接口读取

use thiserror::Error;

/// 默认存活时间（秒）
pub const DEFAULT_REGISTRY_TTL_SECS: u64 = 3600;

/// 默认最大条目数
pub const DEFAULT_REGISTRY_MAX_ENTRIES: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Audio not found: {0}")]
    NotFound(String),
}

/// Audio Registry Port
///
/// - 按插入顺序淘汰，读取不会刷新位置
/// - 只在插入时清理：先清过期，再按数量上限淘汰最旧条目
/// - 读取时不检查过期
pub trait AudioRegistryPort: Send + Sync {
    /// 登记音频，返回新生成的 id
    fn insert(&self, audio_data: Vec<u8>) -> String;

    /// 根据 id 读取音频
    fn get(&self, audio_id: &str) -> Result<Vec<u8>, RegistryError>;

    /// 当前条目数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
