// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector index adapter trait for the long-term tier.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::TidemarkError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{VectorQueryMatch, VectorRecord};

/// Adapter for an external vector index backend.
///
/// The engine never implements approximate-nearest-neighbor search itself;
/// it delegates storage and similarity ranking to this collaborator. Query
/// filters are metadata equality maps (the engine filters on `user_id` for
/// tenant isolation).
#[async_trait]
pub trait VectorIndexAdapter: PluginAdapter {
    /// Creates a collection, tolerating pre-existing collections per backend.
    async fn create_collection(
        &self,
        name: &str,
        metadata: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<(), TidemarkError>;

    /// Writes records, replacing any existing record with the same id.
    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<(), TidemarkError>;

    /// Queries by text, returning up to `limit` candidates ranked by
    /// similarity. The backend owns query embedding.
    async fn query_by_text(
        &self,
        text: &str,
        limit: usize,
        filter: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<Vec<VectorQueryMatch>, TidemarkError>;

    /// Fetches records by id; missing ids are omitted from the result.
    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<VectorRecord>, TidemarkError>;

    /// Deletes records by id; missing ids are ignored.
    async fn delete_by_ids(&self, ids: &[String]) -> Result<(), TidemarkError>;
}
