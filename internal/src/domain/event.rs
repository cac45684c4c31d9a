use chrono::{DateTime, Utc};

use crate::domain::error::EventError;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// A single motion sensor reading, read once from the stream and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    occurred_at: DateTime<Utc>,
    motion_detected: bool,
}

impl MotionEvent {
    /// Builds an event from a timestamp expressed in (fractional) seconds since the epoch.
    pub fn new(timestamp: f64, motion_detected: bool) -> Result<Self, EventError> {
        if !timestamp.is_finite() {
            return Err(EventError::InvalidTimestamp(timestamp));
        }
        let seconds = timestamp.floor();
        let nanos = (((timestamp - seconds) * NANOS_PER_SECOND) as u32).min(999_999_999);
        DateTime::from_timestamp(seconds as i64, nanos)
            .map(|occurred_at| MotionEvent {
                occurred_at,
                motion_detected,
            })
            .ok_or(EventError::InvalidTimestamp(timestamp))
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn motion_detected(&self) -> bool {
        self.motion_detected
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn should_build_event_from_integer_seconds() {
        let event = MotionEvent::new(1_700_000_000.0, true).unwrap();
        assert_eq!(event.occurred_at(), Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        assert!(event.motion_detected());
    }

    #[test]
    fn should_keep_sub_second_precision() {
        let event = MotionEvent::new(1_700_000_000.25, false).unwrap();
        assert_eq!(event.occurred_at().nanosecond(), 250_000_000);
        assert_eq!(event.occurred_at().timestamp_millis(), 1_700_000_000_250);
        assert!(!event.motion_detected());
    }

    #[test]
    fn should_accept_timestamps_before_the_epoch() {
        let event = MotionEvent::new(-1.5, true).unwrap();
        assert_eq!(event.occurred_at().timestamp(), -2);
        assert_eq!(event.occurred_at().nanosecond(), 500_000_000);
    }

    #[test]
    fn should_reject_non_finite_timestamp() {
        assert!(matches!(
            MotionEvent::new(f64::NAN, true).unwrap_err(),
            EventError::InvalidTimestamp(..)
        ));
        assert_eq!(
            MotionEvent::new(f64::INFINITY, true).unwrap_err(),
            EventError::InvalidTimestamp(f64::INFINITY)
        );
    }

    #[test]
    fn should_reject_out_of_range_timestamp() {
        let err = MotionEvent::new(1e300, true).unwrap_err();
        assert_eq!(err, EventError::InvalidTimestamp(1e300));
    }
}
