//! TTL result cache keyed by `(filename, content hash)`.
//!
//! Same filename with changed content hashes to a different key, so stale
//! results are never served for edited files; expired and poisoned
//! entries degrade to a miss and trigger recomputation, never an error.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::metrics::AnalysisOutput;

const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct CacheEntry {
    result: AnalysisOutput,
    created_at: Instant,
}

/// Shared analysis cache. Interior mutability behind an `RwLock`, so
/// concurrent batch workers share one instance by reference.
pub struct ResultCache {
    entries: RwLock<HashMap<(String, u64), CacheEntry>>,
    ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn key(filename: &str, content: &str) -> (String, u64) {
        let mut hasher = DefaultHasher::new();
        content.hash(&mut hasher);
        (filename.to_string(), hasher.finish())
    }

    /// Look up a fresh entry. Expired entries and a poisoned lock both
    /// read as a miss; an expired entry is evicted on the way out.
    pub fn get(&self, filename: &str, content: &str) -> Option<AnalysisOutput> {
        let key = Self::key(filename, content);
        {
            let entries = self.entries.read().ok()?;
            match entries.get(&key) {
                None => return None,
                Some(entry) if entry.created_at.elapsed() <= self.ttl => {
                    return Some(entry.result.clone());
                }
                Some(_) => {}
            }
        }
        // Expired: re-check under the write lock before removing.
        if let Ok(mut entries) = self.entries.write() {
            if let Some(entry) = entries.get(&key) {
                if entry.created_at.elapsed() > self.ttl {
                    entries.remove(&key);
                }
            }
        }
        None
    }

    /// Insert or replace the entry for this `(filename, content)` pair. A
    /// poisoned lock drops the write silently; the next lookup recomputes.
    ///
    /// Expired entries are swept here too: an edited file hashes to a new
    /// key, so its old entry would otherwise never be read again.
    pub fn insert(&self, filename: &str, content: &str, result: AnalysisOutput) {
        let key = Self::key(filename, content);
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, entry| entry.created_at.elapsed() <= self.ttl);
            entries.insert(
                key,
                CacheEntry {
                    result,
                    created_at: Instant::now(),
                },
            );
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Language;

    fn output(path: &str) -> AnalysisOutput {
        AnalysisOutput::failed(path, Language::Unknown, "placeholder")
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = ResultCache::new();
        assert!(cache.get("a.ts", "const x = 1;").is_none());

        cache.insert("a.ts", "const x = 1;", output("a.ts"));
        let hit = cache.get("a.ts", "const x = 1;").unwrap();
        assert_eq!(hit.path, "a.ts");
    }

    #[test]
    fn test_changed_content_misses() {
        let cache = ResultCache::new();
        cache.insert("a.ts", "const x = 1;", output("a.ts"));
        assert!(cache.get("a.ts", "const x = 2;").is_none());
    }

    #[test]
    fn test_same_content_different_file_misses() {
        let cache = ResultCache::new();
        cache.insert("a.ts", "const x = 1;", output("a.ts"));
        assert!(cache.get("b.ts", "const x = 1;").is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss_and_evicted() {
        let cache = ResultCache::with_ttl(Duration::from_millis(0));
        cache.insert("a.ts", "x", output("a.ts"));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("a.ts", "x").is_none());
        // the expired read dropped the entry
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_sweeps_stale_keys() {
        let cache = ResultCache::with_ttl(Duration::from_millis(0));
        cache.insert("edited.ts", "old content", output("edited.ts"));
        std::thread::sleep(Duration::from_millis(5));
        // the edited file hashes to a new key; the old one is swept
        cache.insert("edited.ts", "new content", output("edited.ts"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = ResultCache::new();
        cache.insert("a.ts", "x", output("a.ts"));
        cache.insert("b.ts", "y", output("b.ts"));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_access() {
        use std::sync::Arc;
        let cache = Arc::new(ResultCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let name = format!("f{}.ts", i);
                    cache.insert(&name, "body", output(&name));
                    cache.get(&name, "body").is_some()
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
        assert_eq!(cache.len(), 8);
    }
}
