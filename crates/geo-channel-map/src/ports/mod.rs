//! Ports module for the channel map engine
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{ChannelMapAlg, ChannelMapHandle, GeometryApi, LoadedGeometry};
pub use outbound::{ChannelMapSelection, ExperimentHelper, GeometrySource};
