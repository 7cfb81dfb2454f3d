//! Sink module — destination identity and the destination registry.

pub mod registry;
pub mod stream;

pub use registry::DestinationRegistry;
pub use stream::{Sink, Stream};
