// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search domain types for the hybrid memory engine.

use serde::{Deserialize, Serialize};
use tidemark_core::types::{Message, Role};

/// Tenant id used when callers omit one.
pub const DEFAULT_USER_ID: &str = "default";

/// Resolve a caller-supplied tenant id to the effective one.
pub(crate) fn resolve_user_id(user_id: Option<&str>) -> &str {
    match user_id {
        Some(id) if !id.is_empty() => id,
        _ => DEFAULT_USER_ID,
    }
}

/// Which tier produced a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// Lexical hit from the short-term buffer.
    ShortTerm,
    /// Vector hit from the long-term index.
    LongTerm,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSource::ShortTerm => "short_term",
            ResultSource::LongTerm => "long_term",
        }
    }
}

/// A memory search result with relevance scores.
///
/// Ephemeral: recomputed per query, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// The matched message.
    pub message: Message,
    /// Combined relevance score (0-1).
    pub score: f64,
    /// Vector similarity component.
    pub vector_score: f64,
    /// Lexical similarity component.
    pub text_score: f64,
    /// Which tier produced this result.
    pub source: ResultSource,
}

/// Configures advanced search behavior.
///
/// Zero/negative fields fall back to the engine's configured defaults:
/// `limit == 0` means the engine default (5), weights `<= 0` mean the
/// configured default weights, and a negative `min_score` means the
/// configured default minimum. An explicit `min_score` of 0 disables the
/// score cut.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Maximum number of results to return.
    pub limit: usize,

    /// Minimum combined relevance score (0-1). Negative selects the
    /// engine default.
    pub min_score: f64,

    /// Weight for vector similarity.
    pub vector_weight: f64,

    /// Weight for lexical similarity.
    pub text_weight: f64,

    /// When non-empty, only messages with one of these roles are returned.
    pub filter_by_role: Vec<Role>,

    /// Always include the most recent short-term messages, bypassing the
    /// minimum-score cut (role filter and limit still apply).
    pub include_recent: bool,

    /// Number of recent messages to include when `include_recent` is set.
    pub recent_count: usize,
}
