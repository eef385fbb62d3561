//! HH:MM check-point gating for the poll loop
//!
//! The loop ticks more often than once a minute, so the gate remembers
//! the last minute it fired in and refuses to fire twice within it.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use tracing::warn;

pub struct TimeGate {
    check_points: Vec<NaiveTime>,
    last_fired: Option<NaiveDateTime>,
}

impl TimeGate {
    /// Parse the configured HH:MM check points. Unparseable entries are
    /// logged and ignored rather than failing startup.
    pub fn new(check_times: &[String]) -> Self {
        let mut check_points = Vec::with_capacity(check_times.len());
        for entry in check_times {
            match NaiveTime::parse_from_str(entry.trim(), "%H:%M") {
                Ok(point) => check_points.push(point),
                Err(e) => warn!(check_time = %entry, error = %e, "check_time_unparseable"),
            }
        }
        Self { check_points, last_fired: None }
    }

    /// True when `now` falls on a configured check point and the gate has
    /// not already fired within that wall-clock minute.
    pub fn should_fire(&mut self, now: NaiveDateTime) -> bool {
        let matches = self
            .check_points
            .iter()
            .any(|p| p.hour() == now.hour() && p.minute() == now.minute());
        if !matches {
            return false;
        }

        let minute = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        if self.last_fired == Some(minute) {
            return false;
        }

        self.last_fired = Some(minute);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn gate(times: &[&str]) -> TimeGate {
        let times: Vec<String> = times.iter().map(|t| t.to_string()).collect();
        TimeGate::new(&times)
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_fires_on_check_point() {
        let mut gate = gate(&["06:00", "12:00"]);
        assert!(gate.should_fire(at(6, 0, 3)));
    }

    #[test]
    fn test_does_not_fire_off_check_point() {
        let mut gate = gate(&["06:00", "12:00"]);
        assert!(!gate.should_fire(at(6, 1, 0)));
        assert!(!gate.should_fire(at(11, 59, 59)));
    }

    #[test]
    fn test_fires_once_per_minute() {
        let mut gate = gate(&["06:00"]);
        assert!(gate.should_fire(at(6, 0, 3)));
        assert!(!gate.should_fire(at(6, 0, 23)));
        assert!(!gate.should_fire(at(6, 0, 43)));
    }

    #[test]
    fn test_refires_on_next_occurrence() {
        let mut gate = gate(&["06:00"]);
        assert!(gate.should_fire(at(6, 0, 0)));

        let next_day =
            NaiveDate::from_ymd_opt(2025, 2, 2).unwrap().and_hms_opt(6, 0, 0).unwrap();
        assert!(gate.should_fire(next_day));
    }

    #[test]
    fn test_bad_entries_ignored() {
        let mut gate = gate(&["not-a-time", "06:00"]);
        assert!(gate.should_fire(at(6, 0, 0)));
    }
}
