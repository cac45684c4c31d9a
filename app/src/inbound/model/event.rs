use std::str::FromStr;

use anyhow::anyhow;
use internal::domain::{error::EventError, event::MotionEvent};
use serde::Deserialize;
use serde_json::Value;

/// How the motion reading is framed inside a stream message.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    #[default]
    Plain,
    Nested,
}

impl EnvelopeKind {
    pub fn with_key(self, key: &str) -> Envelope {
        match self {
            EnvelopeKind::Plain => Envelope::Plain,
            EnvelopeKind::Nested => Envelope::Nested { key: key.to_string() },
        }
    }
}

impl FromStr for EnvelopeKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "plain" => Ok(EnvelopeKind::Plain),
            "nested" => Ok(EnvelopeKind::Nested),
            _ => Err(anyhow!("Unknown envelope `{}`, expected `plain` or `nested`", value)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Envelope {
    /// The payload is the event object itself.
    Plain,
    /// The payload is an object holding the event as a JSON encoded string under `key`.
    Nested { key: String },
}

#[derive(Deserialize, Debug)]
struct MotionPayload {
    timestamp: f64,
    motion_detected: bool,
}

pub struct EventDecoder {
    envelope: Envelope,
}

impl EventDecoder {
    pub fn new(envelope: Envelope) -> Self {
        EventDecoder { envelope }
    }

    pub fn extract_event(&self, payload: &[u8]) -> Result<MotionEvent, EventError> {
        let value: Value =
            serde_json::from_slice(payload).map_err(|e| EventError::InvalidPayload(e.to_string()))?;
        let value = self.unwrap_envelope(value)?;
        if !value.is_object() {
            return Err(EventError::NotAnObject);
        }
        let data = MotionPayload::deserialize(value).map_err(|e| EventError::InvalidField(e.to_string()))?;
        MotionEvent::new(data.timestamp, data.motion_detected)
    }

    fn unwrap_envelope(&self, value: Value) -> Result<Value, EventError> {
        match &self.envelope {
            Envelope::Plain => Ok(value),
            Envelope::Nested { key } => {
                if !value.is_object() {
                    return Err(EventError::NotAnObject);
                }
                let inner = value
                    .get(key)
                    .and_then(Value::as_str)
                    .ok_or_else(|| EventError::MissingEnvelope(key.clone()))?;
                serde_json::from_str(inner).map_err(|e| EventError::InvalidPayload(e.to_string()))
            }
        }
    }
}
