// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-tier conversational memory for the Tidemark engine.
//!
//! Keeps a bounded window of recent messages in a fast in-process tier and
//! replicates older messages into a durable vector-indexed tier, then
//! answers relevance queries by merging lexical and vector similarity
//! signals across both tiers.
//!
//! ## Architecture
//!
//! - **ShortTermStore**: per-tenant bounded, insertion-ordered buffers
//! - **TieringPolicy**: oldest-prefix replication into the long-term tier
//! - **LongTermStore**: façade over the vector index + embedding adapters
//! - **HybridSearchEngine**: lexical + vector passes merged by identity
//! - **HybridMemory**: the public façade behind the `Memory` contract

pub mod hybrid;
pub mod long_term;
pub mod search;
pub mod short_term;
pub mod tiering;
pub mod types;

pub use hybrid::{HybridMemory, HybridMemoryConfig, Memory, SearchableMemory};
pub use long_term::LongTermStore;
pub use search::text_similarity;
pub use short_term::ShortTermStore;
pub use tiering::TieringPolicy;
pub use types::{DEFAULT_USER_ID, ResultSource, SearchOptions, SearchResult};
