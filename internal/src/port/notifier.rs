use crate::domain::error::NotificationError;

/// Delivers the alarm text to whoever must be warned.
#[cfg_attr(test, mockall::automock)]
pub trait NotifierDrivenPort {
    fn notify(&self, text: &str) -> impl Future<Output = Result<(), NotificationError>> + Send;
}
