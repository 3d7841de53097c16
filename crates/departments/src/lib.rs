pub mod config;
pub mod departments;
pub mod error;
pub mod reports;
pub mod roster;
pub mod telemetry;
