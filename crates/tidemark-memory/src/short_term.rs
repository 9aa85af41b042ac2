// SPDX-FileCopyrightText: 2026 Tidemark Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-tenant insertion-ordered short-term buffers.
//!
//! The store itself carries no lock; the façade's reader/writer lock is the
//! single guard for all tenant state (see `hybrid.rs`).

use std::collections::HashMap;

use tidemark_core::types::{Message, Role};

/// Bounded, insertion-ordered message buffers keyed by tenant.
///
/// Buckets are created lazily on first append. When a tenant's buffer
/// exceeds `max_messages`, the oldest non-system messages are evicted until
/// the cap holds again; system messages are never evicted, so a buffer may
/// exceed the cap by the number of system messages it holds.
#[derive(Debug)]
pub struct ShortTermStore {
    max_messages: usize,
    buckets: HashMap<String, Vec<Message>>,
}

impl ShortTermStore {
    /// Creates a store with the given per-tenant cap.
    pub fn new(max_messages: usize) -> Self {
        Self {
            max_messages,
            buckets: HashMap::new(),
        }
    }

    /// Appends a message to the end of the tenant's sequence.
    ///
    /// No dedup: identical messages stack in arrival order.
    pub fn append(&mut self, user_id: &str, message: Message) {
        let bucket = self.buckets.entry(user_id.to_string()).or_default();
        bucket.push(message);

        while bucket.len() > self.max_messages {
            match bucket.iter().position(|m| m.role != Role::System) {
                Some(oldest) => {
                    bucket.remove(oldest);
                }
                // Only system messages left; the cap yields to them.
                None => break,
            }
        }
    }

    /// Returns a snapshot of all messages for the tenant, oldest first.
    pub fn messages(&self, user_id: &str) -> Vec<Message> {
        self.buckets.get(user_id).cloned().unwrap_or_default()
    }

    /// Returns the `n` most recent messages for the tenant, oldest first.
    pub fn recent(&self, user_id: &str, n: usize) -> Vec<Message> {
        let Some(bucket) = self.buckets.get(user_id) else {
            return Vec::new();
        };
        let start = bucket.len().saturating_sub(n);
        bucket[start..].to_vec()
    }

    /// Removes all messages for the tenant.
    pub fn clear(&mut self, user_id: &str) {
        self.buckets.remove(user_id);
    }

    /// Number of messages held for the tenant.
    pub fn count(&self, user_id: &str) -> usize {
        self.buckets.get(user_id).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ShortTermStore {
        ShortTermStore::new(100)
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut s = store();
        s.append("u1", Message::user("first"));
        s.append("u1", Message::assistant("second"));
        s.append("u1", Message::user("third"));

        let messages = s.messages("u1");
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn messages_returns_independent_snapshot() {
        let mut s = store();
        s.append("u1", Message::user("hello"));

        let snapshot = s.messages("u1");
        s.append("u1", Message::user("world"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(s.count("u1"), 2);
    }

    #[test]
    fn tenants_are_isolated() {
        let mut s = store();
        s.append("u1", Message::user("for u1"));
        s.append("u2", Message::user("for u2"));

        assert_eq!(s.count("u1"), 1);
        assert_eq!(s.count("u2"), 1);
        assert_eq!(s.messages("u1")[0].content, "for u1");
        assert_eq!(s.messages("u2")[0].content, "for u2");
    }

    #[test]
    fn unknown_tenant_is_empty() {
        let s = store();
        assert!(s.messages("nobody").is_empty());
        assert_eq!(s.count("nobody"), 0);
        assert!(s.recent("nobody", 5).is_empty());
    }

    #[test]
    fn clear_affects_only_that_tenant() {
        let mut s = store();
        s.append("u1", Message::user("one"));
        s.append("u2", Message::user("two"));

        s.clear("u1");

        assert_eq!(s.count("u1"), 0);
        assert_eq!(s.count("u2"), 1);
    }

    #[test]
    fn recent_returns_tail_oldest_first() {
        let mut s = store();
        for i in 0..5 {
            s.append("u1", Message::user(format!("message {i}")));
        }

        let recent = s.recent("u1", 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "message 3");
        assert_eq!(recent[1].content, "message 4");

        // Asking for more than held returns everything.
        assert_eq!(s.recent("u1", 50).len(), 5);
    }

    #[test]
    fn cap_evicts_oldest_non_system() {
        let mut s = ShortTermStore::new(3);
        s.append("u1", Message::system("rules"));
        s.append("u1", Message::user("a"));
        s.append("u1", Message::user("b"));
        s.append("u1", Message::user("c"));

        let messages = s.messages("u1");
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        // "a" was the oldest non-system message.
        assert_eq!(contents, vec!["rules", "b", "c"]);
    }

    #[test]
    fn cap_yields_to_system_messages() {
        let mut s = ShortTermStore::new(2);
        s.append("u1", Message::system("one"));
        s.append("u1", Message::system("two"));
        s.append("u1", Message::system("three"));

        // All system: nothing is evicted even though the cap is exceeded.
        assert_eq!(s.count("u1"), 3);

        s.append("u1", Message::user("chat"));
        // The user message is the only eviction candidate.
        assert_eq!(s.count("u1"), 3);
        assert!(s.messages("u1").iter().all(|m| m.role == Role::System));
    }
}
