//! Row filtering: group selection, carry-forward dates, future cutoff
//!
//! The feed lists several rows per day but only writes the date on the
//! first row of each day. The filter carries the most recent date forward
//! and stamps it back into column 0, so every emitted row has a
//! well-formed, non-empty date.

use crate::domain::RawRow;
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Date format used by the feed (and by the rendered notices).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

const DATE_CELL: usize = 0;
const GROUP_CELL: usize = 4;

/// Selects rows relevant to one group, dated strictly after a cutoff.
pub struct RowFilter {
    group_id: String,
}

impl RowFilter {
    pub fn new(group_id: &str) -> Self {
        Self { group_id: group_id.to_string() }
    }

    /// Single forward pass over the feed, order-preserving.
    ///
    /// Rows with an unparseable date are skipped without touching the
    /// carried date; rows too short to hold a group cell never match.
    pub fn filter(&self, rows: Vec<RawRow>, cutoff: NaiveDate) -> Vec<RawRow> {
        let mut kept = Vec::new();
        let mut last_date: Option<NaiveDate> = None;

        for mut row in rows {
            if row.is_empty() {
                continue;
            }

            let raw_date = row[DATE_CELL].trim();
            if !raw_date.is_empty() {
                // The date cell may carry a time-of-day suffix after a
                // space; only the date part is meaningful.
                let date_text = raw_date.split(' ').next().unwrap_or(raw_date);
                match NaiveDate::parse_from_str(date_text, DATE_FORMAT) {
                    Ok(parsed) => last_date = Some(parsed),
                    Err(e) => {
                        warn!(date = %raw_date, error = %e, "row_date_unparseable");
                        continue;
                    }
                }
            }

            let group = row.get(GROUP_CELL).map(|c| c.trim()).unwrap_or("");
            if !group.contains(&self.group_id) {
                debug!(group = %group, "row_group_mismatch");
                continue;
            }

            match last_date {
                Some(date) if date > cutoff => {
                    // Stamp the carried date back, overwriting whatever the
                    // cell held, so downstream stages see one format.
                    row[DATE_CELL] = date.format(DATE_FORMAT).to_string();
                    kept.push(row);
                }
                _ => {}
            }
        }

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn cutoff() -> NaiveDate {
        date(2025, 1, 31)
    }

    #[test]
    fn test_carry_forward_date() {
        let filter = RowFilter::new("7A");
        let rows = vec![
            row(&["01.02.2025", "1", "Mr. Smith", "", "7A"]),
            row(&["", "2", "Ms. Johnson", "", "7A"]),
        ];

        let kept = filter.filter(rows, cutoff());

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0][0], "01.02.2025");
        assert_eq!(kept[1][0], "01.02.2025");
    }

    #[test]
    fn test_group_substring_match() {
        let filter = RowFilter::new("7A");
        let rows = vec![row(&["01.02.2025", "1", "Mr. Smith", "", "7A,7B"])];
        assert_eq!(filter.filter(rows, cutoff()).len(), 1);

        let filter = RowFilter::new("7C");
        let rows = vec![row(&["01.02.2025", "1", "Mr. Smith", "", "7A,7B"])];
        assert!(filter.filter(rows, cutoff()).is_empty());
    }

    #[test]
    fn test_cutoff_is_strictly_after() {
        let filter = RowFilter::new("7A");
        let boundary = date(2025, 2, 1);

        // Row dated exactly at the cutoff is excluded
        let rows = vec![row(&["01.02.2025", "1", "Mr. Smith", "", "7A"])];
        assert!(filter.filter(rows, boundary).is_empty());

        // One day later is included
        let rows = vec![row(&["02.02.2025", "1", "Mr. Smith", "", "7A"])];
        assert_eq!(filter.filter(rows, boundary).len(), 1);
    }

    #[test]
    fn test_invalid_date_skips_row_without_updating_carry() {
        let filter = RowFilter::new("7A");
        let rows = vec![
            row(&["01.02.2025", "1", "Mr. Smith", "", "7A"]),
            row(&["not-a-date", "2", "Ms. Johnson", "", "7A"]),
            row(&["", "3", "Mr. Brown", "", "7A"]),
        ];

        let kept = filter.filter(rows, cutoff());

        // Bad row dropped; dateless row still inherits the first date
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1][0], "01.02.2025");
        assert_eq!(kept[1][1], "3");
    }

    #[test]
    fn test_time_suffix_truncated() {
        let filter = RowFilter::new("7A");
        let rows = vec![row(&["01.02.2025 08:30", "1", "Mr. Smith", "", "7A"])];

        let kept = filter.filter(rows, cutoff());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0][0], "01.02.2025");
    }

    #[test]
    fn test_rows_before_first_date_are_dropped() {
        let filter = RowFilter::new("7A");
        let rows = vec![row(&["", "1", "Mr. Smith", "", "7A"])];
        assert!(filter.filter(rows, cutoff()).is_empty());
    }

    #[test]
    fn test_short_and_empty_rows_are_skipped() {
        let filter = RowFilter::new("7A");
        let rows = vec![row(&[]), row(&["01.02.2025", "1"]), row(&["01.02.2025", "1", "Mr. Smith", "", "7A"])];

        let kept = filter.filter(rows, cutoff());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0][2], "Mr. Smith");
    }

    #[test]
    fn test_whitespace_trimmed_before_matching() {
        let filter = RowFilter::new("7A");
        let rows = vec![row(&["  01.02.2025  ", "1", "Mr. Smith", "", "  7A  "])];

        let kept = filter.filter(rows, cutoff());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0][0], "01.02.2025");
    }
}
