//! Operating-hours gate: should a device be powered on right now?

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::time_window::TimeWindow;
use crate::types::DbId;

/// One operating-hours window configured for a device.
#[derive(Debug, Clone, Serialize)]
pub struct OperatingWindow {
    pub id: DbId,
    pub name: String,
    pub window: TimeWindow,
    pub active: bool,
}

/// A device with no active windows is always on. Otherwise it is on iff any
/// active window matches `at` (union; overlapping windows have no precedence).
pub fn is_powered_on(windows: &[OperatingWindow], at: NaiveDateTime) -> bool {
    let mut active = windows.iter().filter(|w| w.active).peekable();
    if active.peek().is_none() {
        return true;
    }
    active.any(|w| w.window.matches(at))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::time_window::{TimeRange, WeekdaySet};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn monday_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap().and_time(hm(h, m))
    }

    fn op_window(id: DbId, start: NaiveTime, end: NaiveTime, active: bool) -> OperatingWindow {
        OperatingWindow {
            id,
            name: format!("window {id}"),
            window: TimeWindow::new(WeekdaySet::EVERY_DAY, TimeRange::new(start, end).unwrap()),
            active,
        }
    }

    #[test]
    fn no_windows_means_always_on() {
        for hour in 0..24 {
            assert!(is_powered_on(&[], monday_at(hour, 30)));
        }
    }

    #[test]
    fn only_inactive_windows_means_always_on() {
        let windows = vec![op_window(1, hm(9, 0), hm(10, 0), false)];
        assert!(is_powered_on(&windows, monday_at(3, 0)));
    }

    #[test]
    fn on_inside_active_window_off_outside() {
        let windows = vec![op_window(1, hm(9, 0), hm(18, 0), true)];
        assert!(is_powered_on(&windows, monday_at(9, 0)));
        assert!(!is_powered_on(&windows, monday_at(20, 0)));
    }

    #[test]
    fn overlapping_windows_use_union() {
        let windows = vec![
            op_window(1, hm(8, 0), hm(12, 0), true),
            op_window(2, hm(11, 0), hm(14, 0), true),
        ];
        assert!(is_powered_on(&windows, monday_at(8, 30)));
        assert!(is_powered_on(&windows, monday_at(13, 30)));
        assert!(!is_powered_on(&windows, monday_at(15, 0)));
    }

    #[test]
    fn inactive_window_does_not_power_on() {
        let windows = vec![
            op_window(1, hm(8, 0), hm(9, 0), true),
            op_window(2, hm(20, 0), hm(22, 0), false),
        ];
        assert!(!is_powered_on(&windows, monday_at(21, 0)));
    }

    #[test]
    fn overnight_needs_two_windows() {
        let windows = vec![
            op_window(1, hm(22, 0), NaiveTime::from_hms_opt(23, 59, 59).unwrap(), true),
            op_window(2, hm(0, 0), hm(2, 0), true),
        ];
        assert!(is_powered_on(&windows, monday_at(23, 30)));
        assert!(is_powered_on(&windows, monday_at(1, 0)));
        assert!(!is_powered_on(&windows, monday_at(3, 0)));
    }
}
