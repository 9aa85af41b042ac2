// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The hybrid memory façade: short-term buffer + long-term vector tier
//! behind the framework's `Memory` contract.
//!
//! Tiering runs synchronously on the write path, which guarantees that a
//! search issued after `add` returns sees every migration that add
//! triggered. No background tasks are spawned.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use tidemark_config::MemoryConfig;
use tidemark_core::error::TidemarkError;
use tidemark_core::traits::{EmbeddingAdapter, VectorIndexAdapter};
use tidemark_core::types::Message;

use crate::long_term::LongTermStore;
use crate::search::HybridSearchEngine;
use crate::short_term::ShortTermStore;
use crate::tiering::TieringPolicy;
use crate::types::{SearchOptions, SearchResult, resolve_user_id};

/// The minimal memory contract the surrounding framework consumes.
///
/// All operations are tenant-scoped; `None` selects the default tenant.
#[async_trait]
pub trait Memory: Send + Sync {
    /// Appends a message to the tenant's memory.
    async fn add(&self, message: Message, user_id: Option<&str>);

    /// Returns the tenant's messages in insertion order.
    async fn get_messages(&self, user_id: Option<&str>) -> Vec<Message>;

    /// Removes the tenant's messages.
    async fn clear(&self, user_id: Option<&str>);

    /// Number of messages held for the tenant.
    async fn size(&self, user_id: Option<&str>) -> usize;

    /// Capability check: returns the search extension when this memory
    /// supports it. Callers must feature-detect before relying on search.
    fn as_searchable(&self) -> Option<&dyn SearchableMemory> {
        None
    }
}

/// Search extension over the minimal [`Memory`] contract.
#[async_trait]
pub trait SearchableMemory: Memory {
    /// Hybrid search with engine-default weights, sorted by descending
    /// relevance.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        user_id: Option<&str>,
    ) -> Result<Vec<SearchResult>, TidemarkError>;

    /// Hybrid search with caller-supplied options.
    async fn search_with_options(
        &self,
        query: &str,
        options: SearchOptions,
        user_id: Option<&str>,
    ) -> Result<Vec<SearchResult>, TidemarkError>;
}

/// Configures the hybrid memory behavior.
///
/// Both collaborators are required; construction fails without them.
pub struct HybridMemoryConfig {
    /// Vector index backing the long-term tier.
    pub vector_index: Option<Arc<dyn VectorIndexAdapter>>,
    /// Embedding function used during migration.
    pub embedder: Option<Arc<dyn EmbeddingAdapter>>,
    /// Engine-wide settings and search defaults.
    pub memory: MemoryConfig,
}

/// Two-tier memory: short-term buffers plus a vector-indexed long-term tier.
///
/// A single reader/writer lock guards the tenant buckets: `add` and `clear`
/// take exclusive access, everything else shared. Vector-index and embedding
/// calls happen while the lock is held; their latency is bounded by the
/// collaborator's own deadline semantics.
pub struct HybridMemory {
    short_term: RwLock<ShortTermStore>,
    long_term: LongTermStore,
    tiering: TieringPolicy,
    config: MemoryConfig,
}

impl std::fmt::Debug for HybridMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridMemory")
            .field("tiering", &self.tiering)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HybridMemory {
    /// Creates a hybrid memory instance.
    ///
    /// Fails with [`TidemarkError::Config`] when a collaborator is missing
    /// or the settings are inconsistent; no partial instance is created.
    /// Collection creation is attempted once here and tolerated on failure,
    /// since the collection may already exist.
    pub async fn new(config: HybridMemoryConfig) -> Result<Self, TidemarkError> {
        let vector_index = config
            .vector_index
            .ok_or_else(|| TidemarkError::Config("vector index is required".to_string()))?;
        let embedder = config
            .embedder
            .ok_or_else(|| TidemarkError::Config("embedder is required".to_string()))?;

        let memory = normalize_config(config.memory)?;

        let long_term = LongTermStore::new(vector_index, embedder);
        if let Err(e) = long_term.create_collection(&memory.collection_name).await {
            debug!(
                collection = %memory.collection_name,
                "collection creation failed, it may already exist: {e}"
            );
        }

        Ok(Self {
            short_term: RwLock::new(ShortTermStore::new(memory.max_short_term_messages)),
            long_term,
            tiering: TieringPolicy::new(memory.long_term_threshold),
            config: memory,
        })
    }
}

/// Applies engine defaults to unset fields and rejects inconsistent settings.
fn normalize_config(mut memory: MemoryConfig) -> Result<MemoryConfig, TidemarkError> {
    let defaults = MemoryConfig::default();
    if memory.max_short_term_messages == 0 {
        memory.max_short_term_messages = defaults.max_short_term_messages;
    }
    if memory.default_vector_weight <= 0.0 {
        memory.default_vector_weight = defaults.default_vector_weight;
    }
    if memory.default_text_weight <= 0.0 {
        memory.default_text_weight = defaults.default_text_weight;
    }
    if memory.default_min_score <= 0.0 {
        memory.default_min_score = defaults.default_min_score;
    }
    if memory.collection_name.trim().is_empty() {
        memory.collection_name = defaults.collection_name;
    }

    // A threshold at or above the cap would evict messages before they
    // qualify for migration.
    if memory.long_term_threshold > 0
        && memory.long_term_threshold >= memory.max_short_term_messages
    {
        return Err(TidemarkError::Config(format!(
            "long_term_threshold ({}) must be below max_short_term_messages ({})",
            memory.long_term_threshold, memory.max_short_term_messages
        )));
    }

    Ok(memory)
}

#[async_trait]
impl Memory for HybridMemory {
    /// Appends to short-term, then runs the tiering policy synchronously.
    async fn add(&self, message: Message, user_id: Option<&str>) {
        let uid = resolve_user_id(user_id);
        let mut short_term = self.short_term.write().await;
        short_term.append(uid, message);

        if self.tiering.enabled() {
            let snapshot = short_term.messages(uid);
            let migrated = self.tiering.migrate(&self.long_term, uid, &snapshot).await;
            if migrated > 0 {
                debug!(user_id = uid, migrated, "replicated messages to long-term tier");
            }
        }
    }

    /// Short-term listing only; migrated messages still appear here because
    /// migration replicates without removing.
    async fn get_messages(&self, user_id: Option<&str>) -> Vec<Message> {
        let uid = resolve_user_id(user_id);
        self.short_term.read().await.messages(uid)
    }

    /// Clears the short-term tier. Long-term entries are left in place:
    /// bulk delete-by-filter is not assumed of the vector-index
    /// collaborator, so previously migrated messages remain queryable.
    async fn clear(&self, user_id: Option<&str>) {
        let uid = resolve_user_id(user_id);
        self.short_term.write().await.clear(uid);
    }

    async fn size(&self, user_id: Option<&str>) -> usize {
        let uid = resolve_user_id(user_id);
        self.short_term.read().await.count(uid)
    }

    fn as_searchable(&self) -> Option<&dyn SearchableMemory> {
        Some(self)
    }
}

#[async_trait]
impl SearchableMemory for HybridMemory {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        user_id: Option<&str>,
    ) -> Result<Vec<SearchResult>, TidemarkError> {
        let options = SearchOptions {
            limit,
            vector_weight: self.config.default_vector_weight,
            text_weight: self.config.default_text_weight,
            min_score: self.config.default_min_score,
            ..Default::default()
        };
        self.search_with_options(query, options, user_id).await
    }

    async fn search_with_options(
        &self,
        query: &str,
        options: SearchOptions,
        user_id: Option<&str>,
    ) -> Result<Vec<SearchResult>, TidemarkError> {
        let uid = resolve_user_id(user_id);
        let short_term = self.short_term.read().await;
        let engine = HybridSearchEngine::new(&short_term, &self.long_term, &self.config);
        Ok(engine.search_with_options(query, options, uid).await)
    }
}
