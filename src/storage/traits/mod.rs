//! Storage backend traits.

mod registry;

pub use registry::SessionRegistry;
