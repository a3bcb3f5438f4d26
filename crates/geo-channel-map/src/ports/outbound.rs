//! Outbound Ports (Driven Ports / SPI)

use crate::config::GeometryConfig;
use crate::domain::entities::{GeometryData, GeometryHierarchy};
use crate::domain::errors::{GeometryError, LoadError};
use crate::ports::inbound::ChannelMapAlg;
use std::sync::Arc;

/// Reads a geometry description into a hierarchy.
pub trait GeometrySource: Send + Sync {
    /// Load the description named `file`.
    fn load(&self, file: &str) -> Result<GeometryHierarchy, LoadError>;
}

/// A channel map chosen and built for one detector.
#[derive(Debug, Clone)]
pub struct ChannelMapSelection {
    /// Name of the selected channel map variant
    pub variant: String,
    pub geometry: Arc<GeometryData>,
    pub channel_map: Arc<dyn ChannelMapAlg>,
}

/// Chooses and builds the channel map for a detector identity.
pub trait ExperimentHelper: Send + Sync {
    /// Build the channel map for `identity`, or `Ok(None)` when the identity
    /// is not recognized.
    fn configure(
        &self,
        identity: &str,
        config: &GeometryConfig,
        hierarchy: &GeometryHierarchy,
    ) -> Result<Option<ChannelMapSelection>, GeometryError>;
}
