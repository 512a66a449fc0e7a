//! Per-run analysis cache
//!
//! Keyed by the SHA-256 of the analysed content. One cache belongs to one
//! `enhance_tree_with_content_analysis` call and is dropped with it.

use crate::analysis::{calculate_content_complexity, detect_content_type};
use crate::models::ContentType;
use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;

/// Cached result of analysing one `detail` string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedAnalysis {
    pub content_type: ContentType,
    pub complexity: f64,
}

impl CachedAnalysis {
    /// Run the detector and score the result
    pub fn compute(content: &str) -> Self {
        let analysis = detect_content_type(content, None);
        Self {
            content_type: analysis.content_type,
            complexity: calculate_content_complexity(Some(&analysis)),
        }
    }
}

/// Hex SHA-256 of `content`
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub struct AnalysisCache {
    entries: LruCache<String, CachedAnalysis>,
    hits: usize,
    misses: usize,
}

impl AnalysisCache {
    /// Create a cache holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or_else(|| {
            tracing::warn!("Analysis cache capacity 0 requested, using 1");
            NonZeroUsize::MIN
        });

        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Return the cached analysis for `hash`, computing it from `content` on a miss
    pub fn get_or_compute(&mut self, hash: &str, content: &str) -> CachedAnalysis {
        if let Some(cached) = self.entries.get(hash) {
            self.hits += 1;
            return *cached;
        }

        self.misses += 1;
        let computed = CachedAnalysis::compute(content);
        self.entries.put(hash.to_string(), computed);
        computed
    }

    /// Count a hit served from outside the cache (an up-to-date node)
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
