// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as weight ranges and tiering threshold sanity.

use crate::diagnostic::ConfigError;
use crate::model::TidemarkConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TidemarkConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let memory = &config.memory;

    if memory.max_short_term_messages == 0 {
        errors.push(ConfigError::Validation {
            message: "memory.max_short_term_messages must be at least 1".to_string(),
        });
    }

    // A threshold at or above the cap would evict messages before they
    // qualify for migration.
    if memory.long_term_threshold > 0
        && memory.long_term_threshold >= memory.max_short_term_messages
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "memory.long_term_threshold ({}) must be below memory.max_short_term_messages ({})",
                memory.long_term_threshold, memory.max_short_term_messages
            ),
        });
    }

    if memory.collection_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "memory.collection_name must not be empty".to_string(),
        });
    }

    for (name, weight) in [
        ("memory.default_vector_weight", memory.default_vector_weight),
        ("memory.default_text_weight", memory.default_text_weight),
    ] {
        if !weight.is_finite() || weight <= 0.0 || weight > 1.0 {
            errors.push(ConfigError::Validation {
                message: format!("{name} must be in (0.0, 1.0], got {weight}"),
            });
        }
    }

    if !memory.default_min_score.is_finite()
        || memory.default_min_score < 0.0
        || memory.default_min_score > 1.0
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "memory.default_min_score must be in [0.0, 1.0], got {}",
                memory.default_min_score
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemoryConfig;

    #[test]
    fn default_config_validates() {
        let config = TidemarkConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_cap_rejected() {
        let config = TidemarkConfig {
            memory: MemoryConfig {
                max_short_term_messages: 0,
                ..Default::default()
            },
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("max_short_term_messages"))
        );
    }

    #[test]
    fn threshold_at_cap_rejected() {
        let config = TidemarkConfig {
            memory: MemoryConfig {
                max_short_term_messages: 50,
                long_term_threshold: 50,
                ..Default::default()
            },
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("long_term_threshold"));
    }

    #[test]
    fn threshold_below_cap_accepted() {
        let config = TidemarkConfig {
            memory: MemoryConfig {
                max_short_term_messages: 50,
                long_term_threshold: 10,
                ..Default::default()
            },
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn out_of_range_weights_rejected() {
        let config = TidemarkConfig {
            memory: MemoryConfig {
                default_vector_weight: 1.5,
                default_text_weight: -0.1,
                ..Default::default()
            },
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn out_of_range_min_score_rejected() {
        let config = TidemarkConfig {
            memory: MemoryConfig {
                default_min_score: 2.0,
                ..Default::default()
            },
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("min_score")));
    }

    #[test]
    fn empty_collection_name_rejected() {
        let config = TidemarkConfig {
            memory: MemoryConfig {
                collection_name: "  ".to_string(),
                ..Default::default()
            },
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("collection_name"))
        );
    }
}
