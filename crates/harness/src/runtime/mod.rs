//! Runtime module — process setup and the host-output relay.

pub mod boot;
pub mod relay;
