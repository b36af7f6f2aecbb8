//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that adapters must implement:
//! - SourceFetcher: raw payload retrieval from a parameter store
//! - EnvironmentRegistry: the layered property system snapshots are merged into
//!
//! These traits keep the loader independent of any concrete store or
//! configuration framework.

pub mod environment_registry;
pub mod errors;
pub mod source_fetcher;

pub use environment_registry::EnvironmentRegistry;
pub use errors::FetchError;
pub use source_fetcher::SourceFetcher;
