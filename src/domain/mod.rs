//! Domain models - core business types for schedule changes
//!
//! This module contains the canonical data types used throughout the system:
//! - `RawRow` - one positionally-interpreted record from the tabular feed
//! - `ScheduleChange` - the two kinds of schedule disruption we recognize
//! - notice rendering and batch composition

pub mod change;

// Re-export commonly used types at module level
pub use change::{compose_batch, RawRow, ScheduleChange};
