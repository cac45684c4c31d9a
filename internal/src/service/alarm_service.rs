use chrono::{Local, TimeZone};
use log::{debug, info, warn};

use crate::{
    domain::{
        alarm::{AlarmConfig, AlarmOutcome, MalformedEventPolicy},
        error::{AlarmServiceError, EventError, NotificationError},
        event::MotionEvent,
        night_window::NightWindow,
    },
    port::{alarm::AlarmDriverPort, notifier::NotifierDrivenPort},
};

/// Decides, event by event, whether motion happened at night and warns the notifier when it did.
pub struct AlarmService<N: NotifierDrivenPort, Z: TimeZone = Local> {
    config: AlarmConfig,
    notifier: N,
    timezone: Z,
}

impl<N: NotifierDrivenPort> AlarmService<N, Local> {
    pub fn new(config: AlarmConfig, notifier: N) -> Self {
        Self::with_timezone(config, notifier, Local)
    }
}

impl<N: NotifierDrivenPort, Z: TimeZone> AlarmService<N, Z> {
    pub fn with_timezone(config: AlarmConfig, notifier: N, timezone: Z) -> Self {
        AlarmService {
            config,
            notifier,
            timezone,
        }
    }

    pub fn is_night_window(&self, event: &MotionEvent) -> bool {
        let hour = NightWindow::local_hour(&event.occurred_at(), &self.timezone);
        info!(
            "Checking if motion alarm should be sent. Hour: {}, Upper bound: {}, Lower bound: {}",
            hour,
            self.config.window.upper_bound(),
            self.config.window.lower_bound()
        );
        self.config.window.contains(&event.occurred_at(), &self.timezone)
    }

    pub fn should_alarm(&self, event: &MotionEvent) -> bool {
        event.motion_detected() && self.is_night_window(event)
    }

    async fn notify(&self) -> Result<(), NotificationError> {
        if self.config.alarm_text.is_empty() {
            return Err(NotificationError::ConfigurationMissing("motion alarm string"));
        }
        self.notifier.notify(&self.config.alarm_text).await
    }
}

impl<N: NotifierDrivenPort, Z: TimeZone> AlarmDriverPort for AlarmService<N, Z> {
    async fn process(&self, event: MotionEvent) -> AlarmOutcome {
        if !event.motion_detected() {
            debug!("No motion at {}", event.occurred_at());
            return AlarmOutcome::NoMotion;
        }
        if !self.is_night_window(&event) {
            return AlarmOutcome::OutsideNightWindow;
        }
        match self.notify().await {
            Ok(()) => AlarmOutcome::Notified,
            Err(e) => {
                debug!("Motion alarm not delivered: {e}");
                AlarmOutcome::NotificationFailed
            }
        }
    }

    fn handle_malformed(&self, error: EventError) -> Result<AlarmOutcome, AlarmServiceError> {
        match self.config.malformed_policy {
            MalformedEventPolicy::Skip => {
                warn!("Skipping malformed event: {error}");
                Ok(AlarmOutcome::Skipped)
            }
            MalformedEventPolicy::Abort => Err(AlarmServiceError::MalformedEvent(error)),
        }
    }
}
