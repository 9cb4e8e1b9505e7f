//! Service layer.
//!
//! Composes the stateless resolution policies with the session registry.

mod resolution;

pub use resolution::{Delivered, ResolutionService, render_context};
