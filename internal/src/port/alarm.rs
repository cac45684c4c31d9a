use crate::domain::{
    alarm::AlarmOutcome,
    error::{AlarmServiceError, EventError},
    event::MotionEvent,
};

pub trait AlarmDriverPort {
    fn process(&self, event: MotionEvent) -> impl Future<Output = AlarmOutcome>;
    fn handle_malformed(&self, error: EventError) -> Result<AlarmOutcome, AlarmServiceError>;
}
