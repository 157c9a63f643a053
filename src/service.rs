//! Read-through orchestration: cache, then generation, then write-back.

use crate::cache::{CacheKey, VocabCache};
use crate::generation::Generator;
use crate::structured::ResponseExtractor;
use crate::types::{VocabInfoRecord, VocabInfoRequest};
use crate::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Serves vocabulary lookups.
///
/// Holds the cache and generator injected at startup. Each call makes at most
/// one generation request; concurrent misses for the same key are not
/// coalesced and the last write wins.
pub struct VocabInfoService {
    cache: VocabCache,
    generator: Arc<dyn Generator>,
    extractor: ResponseExtractor,
}

impl VocabInfoService {
    pub fn new(cache: VocabCache, generator: Arc<dyn Generator>) -> Result<Self> {
        Ok(Self {
            cache,
            generator,
            extractor: ResponseExtractor::new()?,
        })
    }

    pub fn cache(&self) -> &VocabCache {
        &self.cache
    }

    pub async fn fetch(&self, vocab: &str, language: &str) -> Result<VocabInfoRecord> {
        self.fetch_request(&VocabInfoRequest::new(vocab, language))
            .await
    }

    pub async fn fetch_request(&self, request: &VocabInfoRequest) -> Result<VocabInfoRecord> {
        request.validate()?;

        let key = CacheKey::normalize(&request.vocab, &request.language);
        if let Some(record) = self.cache.get(&key).await {
            info!(key = %key, "vocab info served from cache");
            return Ok(record);
        }

        let raw = self
            .generator
            .generate(&request.vocab, &request.language)
            .await?;

        let record = self.extractor.extract(&raw).map_err(|e| {
            warn!(key = %key, error = %e, "model output rejected");
            e
        })?;

        self.cache
            .put(&key, &request.vocab, &request.language, &record)
            .await;
        info!(key = %key, "vocab info generated");
        Ok(record)
    }
}
