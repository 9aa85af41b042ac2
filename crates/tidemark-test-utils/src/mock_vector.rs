// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock vector index adapter for deterministic testing.
//!
//! `MockVectorIndex` implements `VectorIndexAdapter` with an in-memory,
//! insertion-ordered record list. Queries return records matching the
//! metadata filter in insertion order with descending synthetic scores,
//! so tests get reproducible rankings without a real ANN backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use tidemark_core::TidemarkError;
use tidemark_core::traits::{PluginAdapter, VectorIndexAdapter};
use tidemark_core::types::{AdapterType, HealthStatus, VectorQueryMatch, VectorRecord};

#[derive(Default)]
struct Inner {
    records: Vec<VectorRecord>,
    score_overrides: HashMap<String, f32>,
    collections: Vec<String>,
}

/// An in-memory vector index that fakes similarity ranking.
///
/// Construction knobs (`failing_queries`, `failing_writes`,
/// `failing_collection_creation`) turn individual operations into errors
/// for degradation tests.
pub struct MockVectorIndex {
    inner: Mutex<Inner>,
    fail_queries: bool,
    fail_writes: bool,
    fail_collection_creation: bool,
}

impl MockVectorIndex {
    /// Creates an empty, fully working mock index.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            fail_queries: false,
            fail_writes: false,
            fail_collection_creation: false,
        }
    }

    /// Makes every `query_by_text` call fail.
    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Makes every `upsert` call fail.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Makes every `create_collection` call fail.
    pub fn failing_collection_creation(mut self) -> Self {
        self.fail_collection_creation = true;
        self
    }

    /// Inserts a record directly, bypassing the adapter trait.
    pub fn seed(
        &self,
        id: &str,
        content: &str,
        metadata: HashMap<String, serde_json::Value>,
    ) {
        let mut inner = self.inner.lock().expect("mock index lock poisoned");
        inner.records.push(VectorRecord {
            id: id.to_string(),
            content: content.to_string(),
            embedding: Vec::new(),
            metadata,
        });
    }

    /// Pins the similarity score returned for a record id.
    pub fn set_score(&self, id: &str, score: f32) {
        let mut inner = self.inner.lock().expect("mock index lock poisoned");
        inner.score_overrides.insert(id.to_string(), score);
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("mock index lock poisoned").records.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of collections created through the adapter.
    pub fn collection_names(&self) -> Vec<String> {
        self.inner
            .lock()
            .expect("mock index lock poisoned")
            .collections
            .clone()
    }
}

impl Default for MockVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(
    record: &VectorRecord,
    filter: &Option<HashMap<String, serde_json::Value>>,
) -> bool {
    match filter {
        None => true,
        Some(conditions) => conditions
            .iter()
            .all(|(key, value)| record.metadata.get(key) == Some(value)),
    }
}

#[async_trait]
impl PluginAdapter for MockVectorIndex {
    fn name(&self) -> &str {
        "mock-vector-index"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Vector
    }

    async fn health_check(&self) -> Result<HealthStatus, TidemarkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TidemarkError> {
        Ok(())
    }
}

#[async_trait]
impl VectorIndexAdapter for MockVectorIndex {
    async fn create_collection(
        &self,
        name: &str,
        _metadata: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<(), TidemarkError> {
        if self.fail_collection_creation {
            return Err(TidemarkError::vector_index("mock collection creation failure"));
        }
        let mut inner = self.inner.lock().expect("mock index lock poisoned");
        inner.collections.push(name.to_string());
        Ok(())
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), TidemarkError> {
        if self.fail_writes {
            return Err(TidemarkError::vector_index("mock write failure"));
        }
        let mut inner = self.inner.lock().expect("mock index lock poisoned");
        for record in records {
            match inner.records.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => inner.records.push(record),
            }
        }
        Ok(())
    }

    async fn query_by_text(
        &self,
        _text: &str,
        limit: usize,
        filter: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<VectorQueryMatch>, TidemarkError> {
        if self.fail_queries {
            return Err(TidemarkError::vector_index("mock query failure"));
        }

        let inner = self.inner.lock().expect("mock index lock poisoned");
        let mut results = Vec::new();
        let mut score = 1.0f32;
        for record in inner.records.iter().filter(|r| matches_filter(r, &filter)) {
            if limit > 0 && results.len() >= limit {
                break;
            }
            results.push(VectorQueryMatch {
                id: record.id.clone(),
                content: record.content.clone(),
                score: inner
                    .score_overrides
                    .get(&record.id)
                    .copied()
                    .unwrap_or(score),
                metadata: record.metadata.clone(),
            });
            score = (score - 0.1).max(0.0);
        }
        Ok(results)
    }

    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<VectorRecord>, TidemarkError> {
        let inner = self.inner.lock().expect("mock index lock poisoned");
        Ok(inner
            .records
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<(), TidemarkError> {
        let mut inner = self.inner.lock().expect("mock index lock poisoned");
        inner.records.retain(|r| !ids.contains(&r.id));
        Ok(())
    }
}
