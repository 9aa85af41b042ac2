// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Tidemark memory engine.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Tidemark workspace. The vector index
//! and embedding collaborators implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TidemarkError;
pub use types::{AdapterType, HealthStatus, Message, Role};

// Re-export adapter traits at crate root.
pub use traits::{EmbeddingAdapter, PluginAdapter, VectorIndexAdapter};
