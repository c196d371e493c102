//! File-based Audio Cache Implementation
//!
//! 每个缓存条目是缓存目录下的一个 `<md5>.audio` 文件，文件存在即命中

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;

use crate::application::ports::{AudioCachePort, CacheError, CacheStats};

/// 缓存文件扩展名
pub const CACHE_FILE_EXTENSION: &str = "audio";

/// 扁平目录音频缓存
pub struct FileAudioCache {
    dir: PathBuf,
    max_size_bytes: u64,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl FileAudioCache {
    /// 创建缓存实例，目录不存在时自动创建
    pub fn new(dir: impl Into<PathBuf>, max_size_bytes: u64) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        tracing::info!(
            dir = %dir.display(),
            max_size_bytes,
            "FileAudioCache initialized"
        );

        Ok(Self {
            dir,
            max_size_bytes,
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, cache_key: &str) -> Result<PathBuf, CacheError> {
        if cache_key.is_empty() || !cache_key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CacheError::InvalidKey(cache_key.to_string()));
        }
        Ok(self
            .dir
            .join(format!("{}.{}", cache_key, CACHE_FILE_EXTENSION)))
    }

    fn is_cache_file(path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(CACHE_FILE_EXTENSION)
    }

    /// 列出所有缓存文件及大小
    async fn entries(&self) -> Result<Vec<(PathBuf, u64)>, CacheError> {
        let mut result = Vec::new();
        let mut dir = match fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(result),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if !Self::is_cache_file(&path) {
                continue;
            }
            let metadata = entry.metadata().await?;
            if metadata.is_file() {
                result.push((path, metadata.len()));
            }
        }

        Ok(result)
    }
}

#[async_trait]
impl AudioCachePort for FileAudioCache {
    async fn get(&self, cache_key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.entry_path(cache_key)?;

        match fs::read(&path).await {
            Ok(data) => {
                self.hit_count.fetch_add(1, Ordering::Relaxed);
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.miss_count.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, cache_key: &str, audio_data: &[u8]) -> Result<(), CacheError> {
        let path = self.entry_path(cache_key)?;
        fs::create_dir_all(&self.dir).await?;

        // 先写临时文件再改名，`.audio` 文件一旦出现就是完整的
        let tmp_path = path.with_extension(format!("{}.tmp", CACHE_FILE_EXTENSION));
        fs::write(&tmp_path, audio_data).await?;
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!(
            cache_key = %cache_key,
            size_bytes = audio_data.len(),
            "Audio cached"
        );

        Ok(())
    }

    async fn exists(&self, cache_key: &str) -> Result<bool, CacheError> {
        let path = self.entry_path(cache_key)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        let entries = self.entries().await?;

        Ok(CacheStats {
            total_entries: entries.len(),
            total_size_bytes: entries.iter().map(|(_, size)| size).sum(),
            max_size_bytes: self.max_size_bytes,
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        })
    }

    async fn clear(&self) -> Result<u64, CacheError> {
        let mut removed = 0;
        for (path, _) in self.entries().await? {
            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::generate_cache_key;

    fn cache() -> (tempfile::TempDir, FileAudioCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileAudioCache::new(dir.path().join("audio_cache"), 1024).unwrap();
        (dir, cache)
    }

    #[tokio::test]
    async fn test_creates_directory() {
        let (_dir, cache) = cache();
        assert!(cache.dir().is_dir());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (_dir, cache) = cache();
        let key = generate_cache_key("hello");

        assert_eq!(cache.get(&key).await.unwrap(), None);
        cache.put(&key, b"mp3-bytes").await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some(b"mp3-bytes".to_vec()));
        assert!(cache.exists(&key).await.unwrap());
        assert!(cache.dir().join(format!("{}.audio", key)).is_file());

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
    }

    #[tokio::test]
    async fn test_put_leaves_no_partial_file_behind() {
        let (_dir, cache) = cache();
        let key = generate_cache_key("atomic");
        let payload = vec![7u8; 4096];

        cache.put(&key, &payload).await.unwrap();

        assert!(!cache.dir().join(format!("{}.audio.tmp", key)).exists());
        assert_eq!(cache.get(&key).await.unwrap(), Some(payload));
    }

    #[tokio::test]
    async fn test_unfinished_write_is_a_miss() {
        let (_dir, cache) = cache();
        let key = generate_cache_key("interrupted");
        std::fs::write(cache.dir().join(format!("{}.audio.tmp", key)), b"half").unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), None);
        assert!(!cache.exists(&key).await.unwrap());
        assert_eq!(cache.stats().await.unwrap().total_entries, 0);
        assert_eq!(cache.clear().await.unwrap(), 0);

        cache.put(&key, b"whole").await.unwrap();
        assert_eq!(cache.get(&key).await.unwrap(), Some(b"whole".to_vec()));
    }

    #[tokio::test]
    async fn test_distinct_keys_are_independent_files() {
        let (_dir, cache) = cache();
        cache.put(&generate_cache_key("a"), b"A").await.unwrap();
        cache.put(&generate_cache_key("b"), b"BB").await.unwrap();

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.total_size_bytes, 3);
        assert_eq!(stats.max_size_bytes, 1024);
    }

    #[tokio::test]
    async fn test_clear_removes_every_cache_file() {
        let (_dir, cache) = cache();
        for text in ["one", "two", "three"] {
            cache.put(&generate_cache_key(text), text.as_bytes()).await.unwrap();
        }
        std::fs::write(cache.dir().join("notes.txt"), "keep").unwrap();

        assert_eq!(cache.clear().await.unwrap(), 3);

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.total_size_bytes, 0);
        assert!(cache.dir().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_path_like_key_is_rejected() {
        let (_dir, cache) = cache();
        let err = cache.put("../escape", b"x").await.unwrap_err();
        assert!(matches!(err, CacheError::InvalidKey(_)));
    }
}
