//! Domain layer for the parameter layer loader
//!
//! This module contains the snapshot models, error taxonomy and port traits.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ConfigError, ConfigResult, DecodeError, LoadFailure, VerificationError};
