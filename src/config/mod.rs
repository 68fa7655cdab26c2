//! Application configuration

mod app_config;

pub use app_config::{AppConfig, GuestLinkSettings, LogFormat, LoggingConfig};
