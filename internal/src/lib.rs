pub mod domain {
    pub mod alarm;
    pub mod error;
    pub mod event;
    pub mod night_window;
}
pub mod port {
    pub mod alarm;
    pub mod notifier;
}
pub mod service {
    pub mod alarm_service;
}
