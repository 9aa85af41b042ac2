// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tiering policy: replicates the oldest short-term messages into the
//! long-term tier once a tenant's buffer exceeds the configured threshold.
//!
//! Migration is additive: the short-term buffer is never pruned here. A
//! message is migrated at most once; candidates already present in the
//! long-term tier are skipped by identity lookup before the write.

use tracing::{debug, warn};

use tidemark_core::types::{Message, Role};

use crate::long_term::LongTermStore;

/// Decides which messages move to the long-term tier after each append.
#[derive(Debug, Clone, Copy)]
pub struct TieringPolicy {
    threshold: usize,
}

impl TieringPolicy {
    /// A policy with the given threshold; 0 disables tiering.
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Whether tiering is enabled at all.
    pub fn enabled(&self) -> bool {
        self.threshold > 0
    }

    /// Selects migration candidates from a tenant's buffer snapshot.
    ///
    /// Candidates are the oldest `len - threshold` messages, minus
    /// system-role messages, which remain short-term indefinitely.
    pub fn candidates<'a>(&self, messages: &'a [Message]) -> Vec<&'a Message> {
        if !self.enabled() || messages.len() <= self.threshold {
            return Vec::new();
        }
        let overflow = messages.len() - self.threshold;
        messages[..overflow]
            .iter()
            .filter(|m| m.role != Role::System)
            .collect()
    }

    /// Runs one migration pass over the tenant's buffer snapshot.
    ///
    /// Per-candidate failures (embedding, lookup) are non-fatal: the
    /// message is skipped, the batch continues, and nothing is retried
    /// within the same pass. Returns the number of records written.
    pub async fn migrate(
        &self,
        long_term: &LongTermStore,
        user_id: &str,
        messages: &[Message],
    ) -> usize {
        let candidates = self.candidates(messages);
        if candidates.is_empty() {
            return 0;
        }

        let mut records = Vec::with_capacity(candidates.len());
        for message in candidates {
            // Identity check keeps re-migration idempotent. A failed lookup
            // is treated as absent: the subsequent upsert replaces by id.
            match long_term.exists(&message.id).await {
                Ok(true) => {
                    debug!(id = %message.id, "already migrated, skipping");
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    debug!(id = %message.id, "existence lookup failed, assuming absent: {e}");
                }
            }

            let embedding = match long_term.embed_one(&message.content).await {
                Ok(vec) => vec,
                Err(e) => {
                    warn!(id = %message.id, "embedding failed, skipping message: {e}");
                    continue;
                }
            };

            records.push(LongTermStore::record_for(message, user_id, embedding));
        }

        if records.is_empty() {
            return 0;
        }

        let written = records.len();
        if let Err(e) = long_term.upsert(records).await {
            warn!(user_id, "long-term write failed, messages stay short-term only: {e}");
            return 0;
        }
        written
    }
}
