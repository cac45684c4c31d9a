use thiserror::Error;

/// Reasons a stream message cannot be turned into a motion event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error("Payload is not valid JSON: {0}")]
    InvalidPayload(String),
    #[error("Payload must be a JSON object")]
    NotAnObject,
    #[error("Envelope key `{0}` is missing or does not hold a JSON string")]
    MissingEnvelope(String),
    #[error("Invalid event field: {0}")]
    InvalidField(String),
    #[error("Timestamp {0} cannot be converted into a date")]
    InvalidTimestamp(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotificationError {
    #[error("Configuration missing: {0} is not set")]
    ConfigurationMissing(&'static str),
    #[error("Webhook answered with status code {0}")]
    NotificationFailure(u16),
    #[error("Unable to reach the webhook: {0}")]
    NotificationTransport(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlarmServiceError {
    #[error("Malformed event: {0}")]
    MalformedEvent(#[from] EventError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlarmConfigError {
    #[error("Hour {value} for the {name} bound is out of range, expected 0..=23")]
    InvalidHour { name: &'static str, value: u32 },
    #[error("Unknown malformed event policy `{0}`, expected `skip` or `abort`")]
    UnknownPolicy(String),
}
