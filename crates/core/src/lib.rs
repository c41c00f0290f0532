//! devtarget core - shared configuration and error types
//! 
//! Settings and the error type used by the device target tooling.

pub mod config;
pub mod error;

pub use config::{AppConfig, AndroidConfig, EmulatorConfig};
pub use error::{DevtargetError, Result};

/// devtarget version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "devtarget";
