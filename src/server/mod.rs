//! Networked duel server: configuration and the TCP accept loop.

pub mod config;
pub mod listener;

pub use config::{ConfigError, ServerConfig, DEFAULT_PORT};
pub use listener::DuelServer;
