//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `feed` - CSV schedule feed fetched over HTTP (Google Sheets export)
//! - `telegram` - message delivery via the Telegram Bot API
//!
//! The scheduler only sees the `FeedSource` and `Notifier` traits, so
//! both collaborators can be swapped out (and mocked in tests).

use crate::domain::RawRow;
use async_trait::async_trait;

pub mod feed;
pub mod telegram;

// Re-export commonly used types
pub use feed::SheetFetcher;
pub use telegram::TelegramNotifier;

/// Source of the raw tabular schedule-change feed.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Vec<RawRow>>;
}

/// Delivers a composed notice to the chat channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, text: &str) -> anyhow::Result<()>;
}
