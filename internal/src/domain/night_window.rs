use chrono::{DateTime, TimeZone, Timelike, Utc};

use crate::domain::error::AlarmConfigError;

pub const DEFAULT_UPPER_BOUND: u32 = 20;
pub const DEFAULT_LOWER_BOUND: u32 = 6;
const LAST_HOUR: u32 = 23;

/// Hours of the day during which detected motion raises an alarm.
///
/// The window wraps around midnight: an hour is part of the night when it is
/// at or after `upper_bound`, or strictly before `lower_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    upper_bound: u32,
    lower_bound: u32,
}

impl Default for NightWindow {
    fn default() -> Self {
        NightWindow {
            upper_bound: DEFAULT_UPPER_BOUND,
            lower_bound: DEFAULT_LOWER_BOUND,
        }
    }
}

impl NightWindow {
    pub fn new(upper_bound: u32, lower_bound: u32) -> Result<Self, AlarmConfigError> {
        Self::validate_hour("upper", upper_bound)?;
        Self::validate_hour("lower", lower_bound)?;
        Ok(NightWindow {
            upper_bound,
            lower_bound,
        })
    }

    fn validate_hour(name: &'static str, value: u32) -> Result<(), AlarmConfigError> {
        if value > LAST_HOUR {
            return Err(AlarmConfigError::InvalidHour { name, value });
        }
        Ok(())
    }

    pub fn upper_bound(&self) -> u32 {
        self.upper_bound
    }

    pub fn lower_bound(&self) -> u32 {
        self.lower_bound
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.upper_bound || hour < self.lower_bound
    }

    /// Wall-clock hour of `at` in the given timezone.
    pub fn local_hour<Tz: TimeZone>(at: &DateTime<Utc>, timezone: &Tz) -> u32 {
        at.with_timezone(timezone).hour()
    }

    pub fn contains<Tz: TimeZone>(&self, at: &DateTime<Utc>, timezone: &Tz) -> bool {
        self.contains_hour(Self::local_hour(at, timezone))
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn should_match_rule_for_every_hour() {
        let window = NightWindow::default();
        for hour in 0..=23 {
            assert_eq!(window.contains_hour(hour), hour >= 20 || hour < 6, "hour {hour}");
        }
    }

    #[test]
    fn should_include_upper_and_exclude_lower_bound() {
        let window = NightWindow::default();
        assert!(window.contains_hour(20));
        assert!(!window.contains_hour(6));
        assert!(window.contains_hour(5));
        assert!(!window.contains_hour(19));
    }

    #[test]
    fn should_honour_custom_bounds() {
        let window = NightWindow::new(22, 5).unwrap();
        assert!(window.contains_hour(22));
        assert!(window.contains_hour(0));
        assert!(window.contains_hour(4));
        assert!(!window.contains_hour(5));
        assert!(!window.contains_hour(21));
        assert_eq!(window.upper_bound(), 22);
        assert_eq!(window.lower_bound(), 5);
    }

    #[test]
    fn should_reject_hours_out_of_range() {
        assert_eq!(
            NightWindow::new(24, 6).unwrap_err(),
            AlarmConfigError::InvalidHour {
                name: "upper",
                value: 24
            }
        );
        assert_eq!(
            NightWindow::new(20, 30).unwrap_err(),
            AlarmConfigError::InvalidHour {
                name: "lower",
                value: 30
            }
        );
    }

    #[test]
    fn should_convert_to_local_hour_before_checking() {
        let window = NightWindow::default();
        // 05:30 UTC
        let at = DateTime::from_timestamp(1_704_087_000, 0).unwrap();
        let utc_plus_one = FixedOffset::east_opt(3600).unwrap();
        let utc_minus_ten = FixedOffset::east_opt(-10 * 3600).unwrap();

        assert_eq!(NightWindow::local_hour(&at, &Utc), 5);
        assert!(window.contains(&at, &Utc));
        assert_eq!(NightWindow::local_hour(&at, &utc_plus_one), 6);
        assert!(!window.contains(&at, &utc_plus_one));
        assert_eq!(NightWindow::local_hour(&at, &utc_minus_ten), 19);
        assert!(!window.contains(&at, &utc_minus_ten));
    }
}
