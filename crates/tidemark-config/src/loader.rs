// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tidemark.toml` > `~/.config/tidemark/tidemark.toml`
//! > `/etc/tidemark/tidemark.toml` with environment variable overrides via
//! the `TIDEMARK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TidemarkConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tidemark/tidemark.toml` (system-wide)
/// 3. `~/.config/tidemark/tidemark.toml` (user XDG config)
/// 4. `./tidemark.toml` (local directory)
/// 5. `TIDEMARK_*` environment variables
pub fn load_config() -> Result<TidemarkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TidemarkConfig::default()))
        .merge(Toml::file("/etc/tidemark/tidemark.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tidemark/tidemark.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tidemark.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Useful for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TidemarkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TidemarkConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TidemarkConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TidemarkConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TIDEMARK_MEMORY_LONG_TERM_THRESHOLD`
/// must map to `memory.long_term_threshold`, not `memory.long.term.threshold`.
fn env_provider() -> Env {
    Env::prefixed("TIDEMARK_").map(|key| {
        let mapped = key.as_str().replacen("memory_", "memory.", 1);
        mapped.into()
    })
}
