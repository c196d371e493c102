//! In-Memory Audio Registry Implementation
//!
//! 刚生成的音频按随机 id 暂存，插入时清理过期条目并限制条目数

use chrono::{DateTime, Utc};
use lru::LruCache;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::{
    AudioRegistryPort, Clock, RegistryError, SystemClock, DEFAULT_REGISTRY_MAX_ENTRIES,
    DEFAULT_REGISTRY_TTL_SECS,
};

struct RegistryEntry {
    data: Vec<u8>,
    inserted_at: DateTime<Utc>,
}

/// 内存音频登记表
///
/// LruCache 只用作有序表：读取走 `peek`，不改变顺序，
/// 因此最旧条目始终是最早插入的那个
pub struct InMemoryAudioRegistry {
    entries: Mutex<LruCache<String, RegistryEntry>>,
    ttl: chrono::Duration,
    max_entries: usize,
    clock: Arc<dyn Clock>,
}

impl InMemoryAudioRegistry {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self::with_clock(ttl, max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(LruCache::unbounded()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::weeks(52 * 100)),
            max_entries: max_entries.max(1),
            clock,
        }
    }

    /// 先删除过期条目，再按插入顺序淘汰超出上限的条目
    fn sweep(&self, entries: &mut LruCache<String, RegistryEntry>, now: DateTime<Utc>) {
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| now - entry.inserted_at > self.ttl)
            .map(|(id, _)| id.clone())
            .collect();

        for id in expired {
            entries.pop(&id);
            tracing::debug!(audio_id = %id, "Removed expired audio");
        }

        while entries.len() > self.max_entries {
            if let Some((id, _)) = entries.pop_lru() {
                tracing::debug!(audio_id = %id, "Removed oldest audio to enforce limit");
            }
        }
    }
}

impl Default for InMemoryAudioRegistry {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_REGISTRY_TTL_SECS),
            DEFAULT_REGISTRY_MAX_ENTRIES,
        )
    }
}

impl AudioRegistryPort for InMemoryAudioRegistry {
    fn insert(&self, audio_data: Vec<u8>) -> String {
        let id = Uuid::new_v4().to_string();
        let now = self.clock.now();

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.put(
            id.clone(),
            RegistryEntry {
                data: audio_data,
                inserted_at: now,
            },
        );
        self.sweep(&mut entries, now);

        id
    }

    fn get(&self, audio_id: &str) -> Result<Vec<u8>, RegistryError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .peek(audio_id)
            .map(|entry| entry.data.clone())
            .ok_or_else(|| RegistryError::NotFound(audio_id.to_string()))
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
