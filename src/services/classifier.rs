//! Classification of filtered rows into typed schedule changes

use crate::domain::{RawRow, ScheduleChange};
use tracing::warn;

const MARKER_CELL: usize = 6;
/// Cells needed for positional access up to the room column.
const MIN_CELLS: usize = 5;

/// Converts filtered raw rows into `ScheduleChange` variants.
pub struct Classifier {
    cancel_marker: String,
}

impl Classifier {
    pub fn new(cancel_marker: &str) -> Self {
        Self { cancel_marker: cancel_marker.to_string() }
    }

    pub fn classify(&self, rows: &[RawRow]) -> Vec<ScheduleChange> {
        rows.iter().filter_map(|row| self.classify_row(row)).collect()
    }

    /// Rows carrying the cancellation marker in column 6 become
    /// cancellations; everything else is a substitution. Rows too short
    /// for positional access are a shape error and are skipped.
    fn classify_row(&self, row: &RawRow) -> Option<ScheduleChange> {
        if row.len() < MIN_CELLS {
            warn!(cells = row.len(), "row_too_short_skipped");
            return None;
        }

        let date = row[0].clone();
        let lesson_number = parse_lesson_number(&row[1]);
        let teacher = row[2].clone();

        if row.len() > MARKER_CELL && row[MARKER_CELL] == self.cancel_marker {
            Some(ScheduleChange::Cancellation {
                date,
                lesson_number,
                teacher,
                subject: String::new(),
            })
        } else {
            Some(ScheduleChange::Substitution {
                date,
                lesson_number,
                teacher,
                subject: String::new(),
                substitute_teacher: row[3].clone(),
                class_room: row[4].clone(),
            })
        }
    }
}

/// Lesson numbers degrade to 0 on a bad cell rather than failing the
/// batch, but the discarded parse error is at least logged.
fn parse_lesson_number(cell: &str) -> u32 {
    match cell.trim().parse() {
        Ok(n) => n,
        Err(e) => {
            warn!(lesson = %cell, error = %e, "lesson_number_unparseable");
            0
        }
    }
}
