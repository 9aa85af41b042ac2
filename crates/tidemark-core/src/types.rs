// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Tidemark engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The role of a conversation message.
///
/// Unknown role strings read back from long-term metadata fall back to
/// [`Role::Assistant`] at the reconstruction site, not here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// An immutable unit of conversation.
///
/// The memory engine never mutates a message's id or role after ingestion;
/// it only relocates messages between tiers. The metadata bag is opaque to
/// the engine and owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier within a tenant.
    pub id: String,
    /// Message role.
    pub role: Role,
    /// Textual content.
    pub content: String,
    /// Opaque caller-owned metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Message {
    /// Creates a message with the given role and a generated uuid-v4 id.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a tool message.
    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(Role::Tool, content)
    }

    /// Replaces the generated id with a caller-supplied one.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Vector,
    Embedding,
}

/// Input for an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingInput {
    /// Texts to embed, one vector produced per text.
    pub texts: Vec<String>,
}

impl EmbeddingInput {
    /// Input for a single text.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            texts: vec![text.into()],
        }
    }
}

/// Output from an embedding adapter.
#[derive(Debug, Clone)]
pub struct EmbeddingOutput {
    /// One embedding per input text, in input order.
    pub embeddings: Vec<Vec<f32>>,
    /// Dimensionality of the produced vectors.
    pub dimensions: usize,
}

/// A record stored in the vector index.
#[derive(Debug, Clone)]
pub struct VectorRecord {
    /// Record identity; matches the originating message id.
    pub id: String,
    /// Original textual content.
    pub content: String,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// Metadata map; carries at minimum `user_id` and `role`.
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A ranked candidate returned by a vector index query.
#[derive(Debug, Clone)]
pub struct VectorQueryMatch {
    /// Record identity.
    pub id: String,
    /// Stored textual content.
    pub content: String,
    /// Similarity score in [0, 1].
    pub score: f32,
    /// Stored metadata map.
    pub metadata: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn role_display_round_trip() {
        for role in [Role::System, Role::User, Role::Assistant, Role::Tool] {
            let s = role.to_string();
            assert_eq!(Role::from_str(&s).expect("should parse back"), role);
        }
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::Tool.to_string(), "tool");
    }

    #[test]
    fn role_serde_snake_case() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }

    #[test]
    fn unknown_role_string_fails_parse() {
        assert!(Role::from_str("supervisor").is_err());
    }

    #[test]
    fn message_constructors_set_role_and_unique_id() {
        let user = Message::user("hello");
        let system = Message::system("be helpful");
        assert_eq!(user.role, Role::User);
        assert_eq!(system.role, Role::System);
        assert_ne!(user.id, system.id);
        assert!(!user.id.is_empty());
    }

    #[test]
    fn message_with_id_overrides_generated() {
        let msg = Message::assistant("reply").with_id("msg-42");
        assert_eq!(msg.id, "msg-42");
        assert_eq!(msg.role, Role::Assistant);
    }

    #[test]
    fn embedding_input_single() {
        let input = EmbeddingInput::single("hello world");
        assert_eq!(input.texts, vec!["hello world".to_string()]);
    }
}
