pub mod config;
pub mod error;
pub mod habits;
pub mod telemetry;
