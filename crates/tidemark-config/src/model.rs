// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration models with serde defaults.
//!
//! All sections use `deny_unknown_fields` so typos surface as diagnostics
//! instead of silently falling back to defaults.

use serde::{Deserialize, Serialize};

/// Root configuration for the Tidemark engine.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TidemarkConfig {
    /// Hybrid memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Hybrid memory engine configuration.
///
/// These are the engine-wide defaults applied once at construction time;
/// per-query overrides arrive via search options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Maximum number of messages kept per tenant in the short-term buffer.
    /// The oldest non-system messages are evicted beyond this cap.
    #[serde(default = "default_max_short_term_messages")]
    pub max_short_term_messages: usize,

    /// Short-term count above which the oldest messages are replicated into
    /// the long-term tier. 0 disables tiering entirely.
    #[serde(default)]
    pub long_term_threshold: usize,

    /// Vector index collection name for long-term entries.
    #[serde(default = "default_collection_name")]
    pub collection_name: String,

    /// Default weight for vector similarity in combined search scores.
    #[serde(default = "default_vector_weight")]
    pub default_vector_weight: f64,

    /// Default weight for lexical similarity in combined search scores.
    #[serde(default = "default_text_weight")]
    pub default_text_weight: f64,

    /// Default minimum combined score below which search results are dropped.
    #[serde(default = "default_min_score")]
    pub default_min_score: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_short_term_messages: default_max_short_term_messages(),
            long_term_threshold: 0,
            collection_name: default_collection_name(),
            default_vector_weight: default_vector_weight(),
            default_text_weight: default_text_weight(),
            default_min_score: default_min_score(),
        }
    }
}

fn default_max_short_term_messages() -> usize {
    100
}

fn default_collection_name() -> String {
    "agent_memory".to_string()
}

fn default_vector_weight() -> f64 {
    0.7
}

fn default_text_weight() -> f64 {
    0.3
}

fn default_min_score() -> f64 {
    0.1
}
