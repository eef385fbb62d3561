//! Services - business logic of the notification pipeline
//!
//! This module contains the core business logic:
//! - `filter` - row selection with carry-forward dates and future cutoff
//! - `classifier` - raw rows into typed schedule changes
//! - `dedup` - content-hash guard against re-sending a message
//! - `time_gate` - HH:MM check-point gating for the poll loop
//! - `scheduler` - the control loop tying the pipeline together

pub mod classifier;
pub mod dedup;
pub mod filter;
pub mod scheduler;
pub mod time_gate;

// Re-export commonly used types
pub use classifier::Classifier;
pub use dedup::Deduplicator;
pub use filter::RowFilter;
pub use scheduler::Scheduler;
pub use time_gate::TimeGate;
