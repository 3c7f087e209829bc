//! Coverage recommendations derived from a user's demographic and asset profile.

pub mod config;
pub mod error;
pub mod insurance;
pub mod telemetry;
