// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Tidemark memory engine.

use thiserror::Error;

/// The primary error type used across all Tidemark adapter traits and core operations.
///
/// Only [`TidemarkError::Config`] is a hard failure surfaced from construction.
/// Vector-index and embedding errors are recoverable per-operation failures:
/// the tiering policy skips the affected item and the search engine degrades
/// to short-term-only results.
#[derive(Debug, Error)]
pub enum TidemarkError {
    /// Configuration errors (missing collaborators, invalid settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// Vector index errors (collection creation, upsert, query failure).
    #[error("vector index error: {message}")]
    VectorIndex {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding errors (model failure, rejected input).
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TidemarkError {
    /// Shorthand for a vector index error without an underlying source.
    pub fn vector_index(message: impl Into<String>) -> Self {
        TidemarkError::VectorIndex {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for an embedding error without an underlying source.
    pub fn embedding(message: impl Into<String>) -> Self {
        TidemarkError::Embedding {
            message: message.into(),
            source: None,
        }
    }
}
