//! Schedule change variants and notice rendering
//!
//! Column layout of a feed row (positional, rows may be shorter):
//! - 0: date (DD.MM.YYYY, may be empty - inherits the previous row's date)
//! - 1: lesson number
//! - 2: teacher
//! - 3: substitute teacher
//! - 4: group/class identifier (doubles as the room for substitutions)
//! - 5: unused
//! - 6: change-type marker (cancellation literal vs. anything else)

/// One record from the tabular feed, columns positionally meaningful.
pub type RawRow = Vec<String>;

/// A recognized schedule disruption, produced by the classifier.
///
/// `date` is always non-empty here: the filter stage carries the most
/// recent date forward onto rows that omit one before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleChange {
    Cancellation {
        date: String,
        lesson_number: u32,
        teacher: String,
        /// Not populated by the feed; kept as an empty field so the
        /// rendered layout stays stable for the chat client.
        subject: String,
    },
    Substitution {
        date: String,
        lesson_number: u32,
        teacher: String,
        subject: String,
        substitute_teacher: String,
        class_room: String,
    },
}

impl ScheduleChange {
    pub fn date(&self) -> &str {
        match self {
            ScheduleChange::Cancellation { date, .. } => date,
            ScheduleChange::Substitution { date, .. } => date,
        }
    }

    pub fn lesson_number(&self) -> u32 {
        match self {
            ScheduleChange::Cancellation { lesson_number, .. } => *lesson_number,
            ScheduleChange::Substitution { lesson_number, .. } => *lesson_number,
        }
    }

    pub fn teacher(&self) -> &str {
        match self {
            ScheduleChange::Cancellation { teacher, .. } => teacher,
            ScheduleChange::Substitution { teacher, .. } => teacher,
        }
    }

    /// Render the canonical notice text for this change.
    ///
    /// The templates (including the 🚫/🔄 marker glyphs) are fixed: the
    /// chat rendering client matches on them, so they must not drift.
    pub fn notice(&self) -> String {
        match self {
            ScheduleChange::Cancellation { date, lesson_number, teacher, subject } => {
                format!("🚫 Cancellation {}: {}\n{}({} lesson)", date, teacher, subject, lesson_number)
            }
            ScheduleChange::Substitution {
                date,
                lesson_number,
                teacher,
                subject,
                substitute_teacher,
                class_room,
            } => {
                format!(
                    "🔄 Substitution {}: {}\n{}({} lesson), replaces {} in room {}",
                    date, teacher, subject, lesson_number, substitute_teacher, class_room
                )
            }
        }
    }
}

/// Compose a batch of changes into one message: notices joined by a blank
/// line, in input order, no trailing separator.
pub fn compose_batch(changes: &[ScheduleChange]) -> String {
    changes.iter().map(ScheduleChange::notice).collect::<Vec<_>>().join("\n\n")
}
