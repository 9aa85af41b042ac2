// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Tidemark integration tests.
//!
//! Provides mock collaborator adapters for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockVectorIndex`] - In-memory vector index with deterministic ranking
//!   and per-operation failure injection
//! - [`MockEmbedder`] - Content-derived deterministic embeddings with
//!   substring-triggered failures

pub mod mock_embedder;
pub mod mock_vector;

pub use mock_embedder::{MOCK_EMBEDDING_DIM, MockEmbedder};
pub use mock_vector::MockVectorIndex;
