//! Content-hash deduplication of composed notification messages
//!
//! The guard is content-addressed, not change-addressed: the exact same
//! message text is delivered at most once per process lifetime, but a
//! one-character difference (say, a date rolling over) produces a new
//! digest and goes out again. Nothing is persisted across restarts.

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::info;

/// Records the SHA-256 digest of every message already sent.
#[derive(Default)]
pub struct Deduplicator {
    sent: HashSet<[u8; 32]>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once per distinct message text, recording the
    /// digest as sent when it does.
    pub fn should_send(&mut self, text: &str) -> bool {
        let digest: [u8; 32] = Sha256::digest(text.as_bytes()).into();

        if self.sent.insert(digest) {
            true
        } else {
            info!(digest = %hex::encode(digest), "duplicate_message_skipped");
            false
        }
    }

    /// Number of distinct messages sent so far.
    pub fn seen(&self) -> usize {
        self.sent.len()
    }
}
