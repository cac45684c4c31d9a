use async_nats::jetstream::AckKind;
use internal::{
    domain::{alarm::AlarmOutcome, error::AlarmServiceError},
    port::alarm::AlarmDriverPort,
};

use crate::inbound::model::event::EventDecoder;

/// Turns one stream payload into an alarm decision.
pub struct MotionHandler<A: AlarmDriverPort> {
    decoder: EventDecoder,
    alarm_service: A,
}

impl<A: AlarmDriverPort> MotionHandler<A> {
    pub fn new(decoder: EventDecoder, alarm_service: A) -> Self {
        MotionHandler { decoder, alarm_service }
    }

    pub async fn handle(&self, payload: &[u8]) -> Result<AlarmOutcome, AlarmServiceError> {
        match self.decoder.extract_event(payload) {
            Ok(event) => Ok(self.alarm_service.process(event).await),
            Err(e) => self.alarm_service.handle_malformed(e),
        }
    }
}

/// A handled message is acked, a rejected one is terminated so it is never redelivered.
pub fn ack_kind(result: &Result<AlarmOutcome, AlarmServiceError>) -> AckKind {
    match result {
        Ok(_) => AckKind::Ack,
        Err(_) => AckKind::Term,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use internal::{
        domain::{
            alarm::{AlarmConfig, MalformedEventPolicy},
            error::EventError,
        },
        service::alarm_service::AlarmService,
    };

    use super::*;
    use crate::{
        inbound::model::event::{Envelope, EnvelopeKind},
        outbound::discord_webhook::DiscordWebhook,
    };

    fn handler(policy: MalformedEventPolicy, envelope: Envelope) -> MotionHandler<AlarmService<DiscordWebhook, Utc>> {
        let config = AlarmConfig {
            malformed_policy: policy,
            ..Default::default()
        };
        let service = AlarmService::with_timezone(config, DiscordWebhook::new(None).unwrap(), Utc);
        MotionHandler::new(EventDecoder::new(envelope), service)
    }

    #[tokio::test]
    async fn should_ack_daytime_motion_without_alarm() {
        let handler = handler(MalformedEventPolicy::Abort, Envelope::Plain);

        // 2024-03-01T12:00:00Z
        let result = handler
            .handle(br#"{"timestamp": 1709294400, "motion_detected": true}"#)
            .await;

        assert_eq!(result, Ok(AlarmOutcome::OutsideNightWindow));
        assert!(matches!(ack_kind(&result), AckKind::Ack));
    }

    #[tokio::test]
    async fn should_ack_night_motion_even_when_delivery_fails() {
        let handler = handler(MalformedEventPolicy::Abort, Envelope::Plain);

        // 2024-03-01T23:00:00Z
        let result = handler
            .handle(br#"{"timestamp": 1709334000, "motion_detected": true}"#)
            .await;

        assert_eq!(result, Ok(AlarmOutcome::NotificationFailed));
        assert!(matches!(ack_kind(&result), AckKind::Ack));
    }

    #[tokio::test]
    async fn should_unwrap_nested_envelope_before_deciding() {
        let handler = handler(MalformedEventPolicy::Abort, EnvelopeKind::Nested.with_key("message"));

        let result = handler
            .handle(br#"{"message": "{\"timestamp\": 1709294400, \"motion_detected\": false}"}"#)
            .await;

        assert_eq!(result, Ok(AlarmOutcome::NoMotion));
    }

    #[tokio::test]
    async fn should_ack_and_continue_on_malformed_payload_when_skipping() {
        let handler = handler(MalformedEventPolicy::Skip, Envelope::Plain);

        let skipped = handler.handle(b"not json").await;
        let next = handler
            .handle(br#"{"timestamp": 1709294400, "motion_detected": false}"#)
            .await;

        assert_eq!(skipped, Ok(AlarmOutcome::Skipped));
        assert!(matches!(ack_kind(&skipped), AckKind::Ack));
        assert_eq!(next, Ok(AlarmOutcome::NoMotion));
    }

    #[tokio::test]
    async fn should_terminate_malformed_payload_when_aborting() {
        let handler = handler(MalformedEventPolicy::Abort, Envelope::Plain);

        let result = handler.handle(br#"{"motion_detected": true}"#).await;

        assert!(matches!(
            &result,
            Err(AlarmServiceError::MalformedEvent(EventError::InvalidField(msg))) if msg.contains("timestamp")
        ));
        assert!(matches!(ack_kind(&result), AckKind::Term));
    }
}
