// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock embedding adapter for deterministic testing.
//!
//! `MockEmbedder` derives small fixed-width vectors from the input bytes,
//! so identical texts always embed identically and no model files or
//! network calls are involved. Failure injection is substring-based to
//! exercise per-item skip paths.

use async_trait::async_trait;

use tidemark_core::TidemarkError;
use tidemark_core::traits::{EmbeddingAdapter, PluginAdapter};
use tidemark_core::types::{AdapterType, EmbeddingInput, EmbeddingOutput, HealthStatus};

/// Dimensionality of mock embeddings.
pub const MOCK_EMBEDDING_DIM: usize = 8;

/// An embedding adapter producing deterministic content-derived vectors.
pub struct MockEmbedder {
    failure_triggers: Vec<String>,
}

impl MockEmbedder {
    /// Creates a mock embedder that succeeds on every input.
    pub fn new() -> Self {
        Self {
            failure_triggers: Vec::new(),
        }
    }

    /// Fails any embed call whose text contains the given substring.
    pub fn failing_on(mut self, substring: impl Into<String>) -> Self {
        self.failure_triggers.push(substring.into());
        self
    }

    fn embed_text(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; MOCK_EMBEDDING_DIM];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % MOCK_EMBEDDING_DIM] += f32::from(byte) / 255.0;
        }
        vector
    }
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockEmbedder {
    fn name(&self) -> &str {
        "mock-embedder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Embedding
    }

    async fn health_check(&self) -> Result<HealthStatus, TidemarkError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TidemarkError> {
        Ok(())
    }
}

#[async_trait]
impl EmbeddingAdapter for MockEmbedder {
    async fn embed(&self, input: EmbeddingInput) -> Result<EmbeddingOutput, TidemarkError> {
        let mut embeddings = Vec::with_capacity(input.texts.len());
        for text in &input.texts {
            if let Some(trigger) = self
                .failure_triggers
                .iter()
                .find(|t| text.contains(t.as_str()))
            {
                return Err(TidemarkError::embedding(format!(
                    "mock failure triggered by `{trigger}`"
                )));
            }
            embeddings.push(Self::embed_text(text));
        }

        Ok(EmbeddingOutput {
            embeddings,
            dimensions: MOCK_EMBEDDING_DIM,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identical_texts_embed_identically() {
        let embedder = MockEmbedder::new();
        let a = embedder
            .embed(EmbeddingInput::single("hello world"))
            .await
            .unwrap();
        let b = embedder
            .embed(EmbeddingInput::single("hello world"))
            .await
            .unwrap();
        assert_eq!(a.embeddings, b.embeddings);
        assert_eq!(a.dimensions, MOCK_EMBEDDING_DIM);
    }

    #[tokio::test]
    async fn different_texts_embed_differently() {
        let embedder = MockEmbedder::new();
        let a = embedder
            .embed(EmbeddingInput::single("hello"))
            .await
            .unwrap();
        let b = embedder
            .embed(EmbeddingInput::single("goodbye"))
            .await
            .unwrap();
        assert_ne!(a.embeddings, b.embeddings);
    }

    #[tokio::test]
    async fn batch_produces_one_vector_per_text() {
        let embedder = MockEmbedder::new();
        let output = embedder
            .embed(EmbeddingInput {
                texts: vec!["one".to_string(), "two".to_string(), "three".to_string()],
            })
            .await
            .unwrap();
        assert_eq!(output.embeddings.len(), 3);
    }

    #[tokio::test]
    async fn failure_trigger_fails_matching_text_only() {
        let embedder = MockEmbedder::new().failing_on("poison");

        assert!(embedder.embed(EmbeddingInput::single("clean text")).await.is_ok());

        let err = embedder
            .embed(EmbeddingInput::single("a poison pill"))
            .await
            .unwrap_err();
        assert!(matches!(err, TidemarkError::Embedding { .. }));
    }
}
