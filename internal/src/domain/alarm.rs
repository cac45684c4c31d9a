use std::str::FromStr;

use crate::domain::{error::AlarmConfigError, night_window::NightWindow};

pub const DEFAULT_ALARM_TEXT: &str = "MOTION DETECTED";

/// What to do with a message that cannot be decoded into a motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedEventPolicy {
    /// Log the message and carry on with the next one.
    Skip,
    /// Stop consuming, the process exits with an error.
    ///
    /// The offending message is terminated on the stream first so a restart
    /// does not receive it again.
    #[default]
    Abort,
}

impl FromStr for MalformedEventPolicy {
    type Err = AlarmConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "skip" => Ok(MalformedEventPolicy::Skip),
            "abort" => Ok(MalformedEventPolicy::Abort),
            _ => Err(AlarmConfigError::UnknownPolicy(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlarmConfig {
    pub window: NightWindow,
    pub alarm_text: String,
    pub malformed_policy: MalformedEventPolicy,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        AlarmConfig {
            window: NightWindow::default(),
            alarm_text: DEFAULT_ALARM_TEXT.to_string(),
            malformed_policy: MalformedEventPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmOutcome {
    NoMotion,
    OutsideNightWindow,
    Notified,
    NotificationFailed,
    Skipped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_policy_ignoring_case() {
        assert_eq!("skip".parse(), Ok(MalformedEventPolicy::Skip));
        assert_eq!(" ABORT ".parse(), Ok(MalformedEventPolicy::Abort));
    }

    #[test]
    fn should_not_parse_unknown_policy() {
        let err = "retry".parse::<MalformedEventPolicy>().unwrap_err();
        assert_eq!(err, AlarmConfigError::UnknownPolicy("retry".into()));
    }

    #[test]
    fn should_default_to_night_between_20_and_6() {
        let config = AlarmConfig::default();
        assert_eq!(config.window.upper_bound(), 20);
        assert_eq!(config.window.lower_bound(), 6);
        assert_eq!(config.alarm_text, "MOTION DETECTED");
        assert_eq!(config.malformed_policy, MalformedEventPolicy::Abort);
    }
}
