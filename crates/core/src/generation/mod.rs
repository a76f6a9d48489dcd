//! Generation Registry.
//!
//! Source of truth for how much energy was actually generated. Producers are
//! registered by their owner, and every reported output is kept as an
//! immutable generation event.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::GenerationRegistry;
pub use types::{GenerationEvent, Producer};
