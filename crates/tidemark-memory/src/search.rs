// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid search: lexical pass over the short-term buffer, vector pass over
//! the long-term index, merged by message identity.
//!
//! A long-term query failure is logged and swallowed; the search degrades to
//! short-term-only results. Availability wins over completeness here.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use tidemark_config::MemoryConfig;

use crate::long_term::LongTermStore;
use crate::short_term::ShortTermStore;
use crate::types::{ResultSource, SearchOptions, SearchResult};

/// Result limit applied when the caller passes 0.
const DEFAULT_LIMIT: usize = 5;

/// Word-overlap similarity between a query and a message content.
///
/// Both sides are lower-cased and whitespace-tokenized; message words are
/// treated as a set, so duplicate words in the message count once. The
/// score is `matches / query_word_count`, in [0, 1]. An empty query scores
/// 0 against everything.
pub fn text_similarity(query: &str, content: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let query_words: Vec<&str> = query_lower.split_whitespace().collect();
    if query_words.is_empty() {
        return 0.0;
    }

    let content_lower = content.to_lowercase();
    let content_words: HashSet<&str> = content_lower.split_whitespace().collect();

    let matches = query_words
        .iter()
        .filter(|w| content_words.contains(**w))
        .count();

    matches as f64 / query_words.len() as f64
}

/// One-query view over both tiers.
///
/// Borrows the short-term store under the façade's read lock; the engine
/// itself holds no state between queries.
pub(crate) struct HybridSearchEngine<'a> {
    short_term: &'a ShortTermStore,
    long_term: &'a LongTermStore,
    config: &'a MemoryConfig,
}

/// Merge arena: results keyed by message id, insertion order preserved so
/// the final sort is deterministic regardless of map iteration order.
struct ResultArena {
    results: Vec<SearchResult>,
    by_id: HashMap<String, usize>,
}

impl ResultArena {
    fn new() -> Self {
        Self {
            results: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut SearchResult> {
        self.by_id.get(id).map(|&i| &mut self.results[i])
    }

    fn insert(&mut self, result: SearchResult) {
        self.by_id
            .insert(result.message.id.clone(), self.results.len());
        self.results.push(result);
    }

    fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }
}

impl<'a> HybridSearchEngine<'a> {
    pub(crate) fn new(
        short_term: &'a ShortTermStore,
        long_term: &'a LongTermStore,
        config: &'a MemoryConfig,
    ) -> Self {
        Self {
            short_term,
            long_term,
            config,
        }
    }

    /// Resolves caller options against engine defaults and normalizes the
    /// weights to sum to 1.
    fn resolve_options(&self, mut options: SearchOptions) -> SearchOptions {
        if options.limit == 0 {
            options.limit = DEFAULT_LIMIT;
        }
        if options.vector_weight <= 0.0 {
            options.vector_weight = self.config.default_vector_weight;
        }
        if options.text_weight <= 0.0 {
            options.text_weight = self.config.default_text_weight;
        }
        if options.min_score < 0.0 {
            options.min_score = self.config.default_min_score;
        }

        let total = options.vector_weight + options.text_weight;
        if total > 0.0 {
            options.vector_weight /= total;
            options.text_weight /= total;
        }

        options
    }

    pub(crate) async fn search_with_options(
        &self,
        query: &str,
        options: SearchOptions,
        user_id: &str,
    ) -> Vec<SearchResult> {
        let options = self.resolve_options(options);
        let mut arena = ResultArena::new();

        // 1. Lexical pass over the tenant's short-term messages.
        for message in self.short_term.messages(user_id) {
            let text_score = text_similarity(query, &message.content);
            if text_score > 0.0 {
                arena.insert(SearchResult {
                    score: text_score * options.text_weight,
                    vector_score: 0.0,
                    text_score,
                    source: ResultSource::ShortTerm,
                    message,
                });
            }
        }

        // 2. Vector pass over the long-term tier; over-fetch to survive the
        // merge and filters. Failure degrades to short-term-only results.
        match self
            .long_term
            .query(query, options.limit * 2, user_id)
            .await
        {
            Ok(matches) => {
                for m in &matches {
                    let vector_score = f64::from(m.score);
                    if let Some(existing) = arena.get_mut(&m.id) {
                        // The same message can surface from both tiers;
                        // keep the stronger vector signal.
                        if vector_score > existing.vector_score {
                            existing.vector_score = vector_score;
                            existing.score = existing.text_score * options.text_weight
                                + vector_score * options.vector_weight;
                        }
                    } else {
                        arena.insert(SearchResult {
                            message: LongTermStore::message_from(m),
                            score: vector_score * options.vector_weight,
                            vector_score,
                            text_score: 0.0,
                            source: ResultSource::LongTerm,
                        });
                    }
                }
            }
            Err(e) => {
                warn!(user_id, "long-term query failed, degrading to short-term only: {e}");
            }
        }

        // 3. Recent-message pinning: pinned entries bypass the score cut.
        let mut pinned: HashSet<String> = HashSet::new();
        if options.include_recent && options.recent_count > 0 {
            for message in self.short_term.recent(user_id, options.recent_count) {
                pinned.insert(message.id.clone());
                if !arena.contains(&message.id) {
                    let text_score = text_similarity(query, &message.content);
                    arena.insert(SearchResult {
                        score: text_score * options.text_weight,
                        vector_score: 0.0,
                        text_score,
                        source: ResultSource::ShortTerm,
                        message,
                    });
                }
            }
        }

        // 4. Filter by minimum score and role allow-list.
        let mut results: Vec<SearchResult> = arena
            .results
            .into_iter()
            .filter(|r| r.score >= options.min_score || pinned.contains(&r.message.id))
            .filter(|r| {
                options.filter_by_role.is_empty()
                    || options.filter_by_role.contains(&r.message.role)
            })
            .collect();

        // 5. Sort by combined score descending; equal scores break ties by
        // message id ascending so ordering stays reproducible.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.message.id.cmp(&b.message.id))
        });

        // 6. Truncate to the requested limit.
        results.truncate(options.limit);

        results
    }
}
