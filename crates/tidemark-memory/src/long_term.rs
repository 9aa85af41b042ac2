// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thin façade over the vector index and embedding collaborators.
//!
//! Converts between [`Message`] and [`VectorRecord`] and scopes every query
//! to a tenant via the `user_id` metadata filter. Errors from the underlying
//! collaborators propagate to the caller as recoverable per-operation
//! failures, never engine-fatal.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use tidemark_core::error::TidemarkError;
use tidemark_core::traits::{EmbeddingAdapter, VectorIndexAdapter};
use tidemark_core::types::{EmbeddingInput, Message, Role, VectorQueryMatch, VectorRecord};

/// Metadata key carrying the owning tenant id.
pub(crate) const META_USER_ID: &str = "user_id";
/// Metadata key carrying the original message role.
pub(crate) const META_ROLE: &str = "role";
/// Metadata key carrying the write-time creation timestamp.
pub(crate) const META_CREATED_AT: &str = "created_at";

/// Long-term tier access for the hybrid engine.
pub struct LongTermStore {
    index: Arc<dyn VectorIndexAdapter>,
    embedder: Arc<dyn EmbeddingAdapter>,
}

impl LongTermStore {
    pub fn new(index: Arc<dyn VectorIndexAdapter>, embedder: Arc<dyn EmbeddingAdapter>) -> Self {
        Self { index, embedder }
    }

    /// Creates the collection backing this store.
    pub async fn create_collection(&self, name: &str) -> Result<(), TidemarkError> {
        self.index.create_collection(name, None).await
    }

    /// Whether an entry with this id is already present.
    pub async fn exists(&self, id: &str) -> Result<bool, TidemarkError> {
        let ids = [id.to_string()];
        let found = self.index.get_by_ids(&ids).await?;
        Ok(!found.is_empty())
    }

    /// Embeds a single text.
    pub async fn embed_one(&self, text: &str) -> Result<Vec<f32>, TidemarkError> {
        let output = self.embedder.embed(EmbeddingInput::single(text)).await?;
        output
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| TidemarkError::embedding("embedding returned no vectors"))
    }

    /// Writes entries in one batch, assigning a creation timestamp to any
    /// record that lacks one.
    pub async fn upsert(&self, mut records: Vec<VectorRecord>) -> Result<(), TidemarkError> {
        let now = chrono::Utc::now().to_rfc3339();
        for record in &mut records {
            record
                .metadata
                .entry(META_CREATED_AT.to_string())
                .or_insert_with(|| serde_json::Value::String(now.clone()));
        }
        self.index.upsert(records).await
    }

    /// Queries the index by text, scoped to the tenant.
    pub async fn query(
        &self,
        text: &str,
        limit: usize,
        user_id: &str,
    ) -> Result<Vec<VectorQueryMatch>, TidemarkError> {
        let filter = HashMap::from([(
            META_USER_ID.to_string(),
            serde_json::Value::String(user_id.to_string()),
        )]);
        self.index.query_by_text(text, limit, Some(filter)).await
    }

    /// Builds the long-term record for a message.
    pub fn record_for(message: &Message, user_id: &str, embedding: Vec<f32>) -> VectorRecord {
        let metadata = HashMap::from([
            (
                META_USER_ID.to_string(),
                serde_json::Value::String(user_id.to_string()),
            ),
            (
                META_ROLE.to_string(),
                serde_json::Value::String(message.role.to_string()),
            ),
        ]);
        VectorRecord {
            id: message.id.clone(),
            content: message.content.clone(),
            embedding,
            metadata,
        }
    }

    /// Reconstructs a message from a query match.
    ///
    /// The role falls back to assistant when the stored metadata is missing
    /// or unparseable.
    pub fn message_from(m: &VectorQueryMatch) -> Message {
        let role = m
            .metadata
            .get(META_ROLE)
            .and_then(|v| v.as_str())
            .and_then(|s| Role::from_str(s).ok())
            .unwrap_or(Role::Assistant);

        Message {
            id: m.id.clone(),
            role,
            content: m.content.clone(),
            metadata: m.metadata.clone(),
        }
    }
}
