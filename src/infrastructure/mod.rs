//! Infrastructure layer module
//!
//! This module contains the host-side plumbing around the loader:
//! - Settings management (figment)
//! - Logging infrastructure (tracing)
//! - Service wiring

pub mod config;
pub mod logging;
pub mod setup;
