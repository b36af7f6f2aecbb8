//! Adapters for external systems.

pub mod fetchers;
pub mod http;
pub mod registry;
