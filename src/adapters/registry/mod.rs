//! Environment registry adapters.

pub mod figment_registry;

pub use figment_registry::FigmentRegistry;
