// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Tidemark configuration system.

use tidemark_config::diagnostic::{ConfigError, suggest_key};
use tidemark_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_tidemark_config() {
    let toml = r#"
[memory]
max_short_term_messages = 50
long_term_threshold = 20
collection_name = "conversation_memory"
default_vector_weight = 0.6
default_text_weight = 0.4
default_min_score = 0.2
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.memory.max_short_term_messages, 50);
    assert_eq!(config.memory.long_term_threshold, 20);
    assert_eq!(config.memory.collection_name, "conversation_memory");
    assert_eq!(config.memory.default_vector_weight, 0.6);
    assert_eq!(config.memory.default_text_weight, 0.4);
    assert_eq!(config.memory.default_min_score, 0.2);
}

/// Unknown field in [memory] section produces an error.
#[test]
fn unknown_field_in_memory_produces_error() {
    let toml = r#"
[memory]
colection_name = "oops"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("colection_name"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Missing sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.memory.max_short_term_messages, 100);
    assert_eq!(config.memory.long_term_threshold, 0);
    assert_eq!(config.memory.collection_name, "agent_memory");
    assert_eq!(config.memory.default_vector_weight, 0.7);
    assert_eq!(config.memory.default_text_weight, 0.3);
    assert_eq!(config.memory.default_min_score, 0.1);
}

/// load_and_validate_str surfaces unknown keys as UnknownKey diagnostics
/// with a typo suggestion.
#[test]
fn unknown_key_diagnostic_carries_suggestion() {
    let toml = r#"
[memory]
long_term_treshold = 5
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce diagnostics");
    assert!(!errors.is_empty());

    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey { key, suggestion, .. } => Some((key, suggestion)),
            _ => None,
        })
        .expect("should contain an UnknownKey diagnostic");
    assert_eq!(unknown.0, "long_term_treshold");
    assert_eq!(unknown.1.as_deref(), Some("long_term_threshold"));
}

/// Semantic validation catches values serde accepts.
#[test]
fn validation_rejects_threshold_at_or_above_cap() {
    let toml = r#"
[memory]
max_short_term_messages = 10
long_term_threshold = 10
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { .. })),
        "expected a Validation diagnostic"
    );
}

#[test]
fn validation_rejects_out_of_range_weight() {
    let toml = r#"
[memory]
default_vector_weight = 3.0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(
        errors
            .iter()
            .any(|e| e.to_string().contains("default_vector_weight"))
    );
}

#[test]
fn wrong_type_produces_error() {
    let toml = r#"
[memory]
max_short_term_messages = "lots"
"#;

    let err = load_config_from_str(toml).expect_err("should reject wrong type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("expected"),
        "error should mention the type mismatch, got: {err_str}"
    );
}

#[test]
fn suggest_key_is_exported_for_external_tooling() {
    let valid = &["max_short_term_messages", "collection_name"];
    assert_eq!(
        suggest_key("max_shortterm_messages", valid),
        Some("max_short_term_messages".to_string())
    );
}
