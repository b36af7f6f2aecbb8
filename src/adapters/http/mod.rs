//! HTTP surface over the loaded configuration layer.

pub mod env_http;

pub use env_http::{EnvHttpServer, ErrorResponse};
