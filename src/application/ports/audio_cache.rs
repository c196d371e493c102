//! Audio Cache Port - 音频缓存管理
//!
//! 定义按内容寻址的音频缓存抽象接口，具体实现为扁平目录文件存储

use async_trait::async_trait;
use thiserror::Error;

/// Audio Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Invalid cache key: {0}")]
    InvalidKey(String),
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::IoError(err.to_string())
    }
}

/// Audio Cache Port
///
/// - 缓存 key: md5(text)
/// - 文件存在即命中，不维护额外索引
/// - 不做淘汰，只提供统计与整体清空
#[async_trait]
pub trait AudioCachePort: Send + Sync {
    /// 根据缓存 key 获取音频数据
    async fn get(&self, cache_key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// 写入音频数据（同一 key 重复写入时后写覆盖，内容相同）
    async fn put(&self, cache_key: &str, audio_data: &[u8]) -> Result<(), CacheError>;

    /// 检查缓存是否存在
    async fn exists(&self, cache_key: &str) -> Result<bool, CacheError>;

    /// 获取缓存统计信息
    async fn stats(&self) -> Result<CacheStats, CacheError>;

    /// 删除全部缓存文件，返回删除数量
    async fn clear(&self) -> Result<u64, CacheError>;
}

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: u64,
    /// 配置的上限，仅用于展示，不参与淘汰
    pub max_size_bytes: u64,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// 生成缓存 key
///
/// 使用 md5(text) 的十六进制摘要作为缓存 key
pub fn generate_cache_key(text: &str) -> String {
    let digest = md5::compute(text.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_deterministic() {
        assert_eq!(generate_cache_key("hello"), generate_cache_key("hello"));
        assert_eq!(generate_cache_key("hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_distinct_texts_have_distinct_keys() {
        let words = ["alpha", "beta", "gamma", "delta", "Alpha", "alpha "];
        let keys: std::collections::HashSet<_> = words.iter().map(|w| generate_cache_key(w)).collect();
        assert_eq!(keys.len(), words.len());
    }
}
