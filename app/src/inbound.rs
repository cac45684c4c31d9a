pub mod model;
pub mod motion_handler;
pub mod nats;
