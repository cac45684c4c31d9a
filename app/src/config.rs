pub mod app_config;
pub mod nats_config;
