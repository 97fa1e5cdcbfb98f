//! VoiceCart CLI library
//!
//! Exposes the configuration model and scenario replay for integration tests.

pub mod cli;
pub mod config;
pub mod scenario;

pub use config::{Config, ConfigError, SessionSettings};
pub use scenario::{replay, ReplayReport, Scenario, Step};
