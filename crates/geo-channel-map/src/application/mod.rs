//! Application layer for the channel map engine
//!
//! Wires sources, the detector selector and channel maps into the provider.

pub mod helper;
pub mod provider;

pub use helper::{ChannelMapVariant, StandardGeometryHelper, STANDARD_DETECTORS};
pub use provider::GeometryProvider;
