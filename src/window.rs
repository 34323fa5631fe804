//! Time-window filtering.
//!
//! A [`TimeWindow`] is an hour-of-day range crossed with a day-of-week range,
//! both inclusive. Hour ranges may wrap past midnight (`23..=5`). Days are
//! numbered Monday = 0 through Sunday = 6.

use std::fmt;

use chrono::{Datelike, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::point::{GpsFix, Point};

/// An inclusive hour-of-day and day-of-week window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First hour (0-23).
    pub start_hour: u8,
    /// Last hour (0-23). Smaller than `start_hour` means the range wraps.
    pub end_hour: u8,
    /// First weekday, Monday = 0.
    pub first_day: u8,
    /// Last weekday, Sunday = 6.
    pub last_day: u8,
}

impl TimeWindow {
    /// Create a window, validating hours and days.
    pub fn new(start_hour: u8, end_hour: u8, first_day: u8, last_day: u8) -> Result<Self> {
        if start_hour > 23 || end_hour > 23 {
            return Err(Error::InvalidArgument {
                name: "hour",
                message: "must be in 0..=23",
            });
        }
        if first_day > 6 || last_day > 6 || first_day > last_day {
            return Err(Error::InvalidArgument {
                name: "day",
                message: "must be an ordered range within 0..=6 (Monday = 0)",
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
            first_day,
            last_day,
        })
    }

    /// Working hours: 10:00 through 16:59, Monday to Friday.
    pub const fn work() -> Self {
        Self {
            start_hour: 10,
            end_hour: 16,
            first_day: 0,
            last_day: 4,
        }
    }

    /// Sleeping hours: 23:00 through 05:59, Monday to Thursday.
    ///
    /// The day is that of the fix itself, so the early hours of Friday are out
    /// while those of Monday are in.
    pub const fn home() -> Self {
        Self {
            start_hour: 23,
            end_hour: 5,
            first_day: 0,
            last_day: 3,
        }
    }

    /// Whether a local `hour` (0-23) on `weekday` (Monday = 0) falls inside.
    pub fn contains(&self, hour: u32, weekday: u32) -> bool {
        let (start, end) = (u32::from(self.start_hour), u32::from(self.end_hour));
        let hour_ok = if start <= end {
            hour >= start && hour <= end
        } else {
            hour >= start || hour <= end
        };
        hour_ok && weekday >= u32::from(self.first_day) && weekday <= u32::from(self.last_day)
    }

    /// Whether `fix`, seen in local time at `offset`, falls inside.
    pub fn contains_fix(&self, fix: &GpsFix, offset: FixedOffset) -> bool {
        let local = fix.timestamp.with_timezone(&offset);
        self.contains(local.hour(), local.weekday().num_days_from_monday())
    }
}

/// Points of the fixes that fall inside `window`, in input order.
pub fn filter(fixes: &[GpsFix], window: &TimeWindow, offset: FixedOffset) -> Vec<Point> {
    fixes
        .iter()
        .filter(|f| window.contains_fix(f, offset))
        .map(|f| f.point)
        .collect()
}

/// What a location stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Home,
    Work,
}

impl Label {
    /// The preset window for this label.
    pub fn window(&self) -> TimeWindow {
        match self {
            Label::Home => TimeWindow::home(),
            Label::Work => TimeWindow::work(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Home => "Home",
            Label::Work => "Work",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_work_window() {
        let w = TimeWindow::work();
        assert!(w.contains(10, 0));
        assert!(w.contains(16, 4));
        assert!(!w.contains(9, 0));
        assert!(!w.contains(17, 0));
        assert!(!w.contains(12, 5)); // Saturday
    }

    #[test]
    fn test_home_window_wraps_midnight() {
        let w = TimeWindow::home();
        assert!(w.contains(23, 0));
        assert!(w.contains(0, 1));
        assert!(w.contains(5, 3));
        assert!(!w.contains(6, 0));
        assert!(!w.contains(22, 0));
        assert!(!w.contains(2, 4)); // Friday
    }

    #[test]
    fn test_new_validates() {
        assert!(TimeWindow::new(24, 5, 0, 4).is_err());
        assert!(TimeWindow::new(9, 17, 5, 2).is_err());
        assert!(TimeWindow::new(9, 17, 0, 7).is_err());
        assert_eq!(TimeWindow::new(10, 16, 0, 4).unwrap(), TimeWindow::work());
    }

    #[test]
    fn test_filter_uses_local_time() {
        // 2024-01-01 is a Monday. 08:00 UTC is 10:00 at UTC+2.
        let at = |h| Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap();
        let fixes = vec![
            GpsFix::new(at(8), 1.0, 2.0),
            GpsFix::new(at(15), 3.0, 4.0),
        ];

        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(
            filter(&fixes, &TimeWindow::work(), utc),
            vec![Point::from_lat_lng(3.0, 4.0)]
        );
        assert_eq!(
            filter(&fixes, &TimeWindow::work(), plus_two),
            vec![Point::from_lat_lng(1.0, 2.0)]
        );
    }

    #[test]
    fn test_label_windows() {
        assert_eq!(Label::Home.window(), TimeWindow::home());
        assert_eq!(Label::Work.to_string(), "Work");
    }
}
