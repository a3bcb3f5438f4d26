//! Error types for the channel map engine

use geo_types::{PlaneId, TpcId, WireId};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error surfaced by the provider and the channel map queries.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The description hierarchy cannot be turned into a detector
    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// The channel tables cannot be built
    #[error("Channel map build failed: {0}")]
    MapBuild(#[from] MapBuildError),

    /// The sorter could not order two siblings
    #[error("Sort error: {0}")]
    Sort(#[from] SortError),

    /// The description could not be read
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Query issued before the channel map was initialized
    #[error("Channel map is not initialized")]
    NotReady,

    /// No channel map was produced for the active detector
    #[error("No channel map available for detector '{detector}'")]
    NoChannelMap { detector: String },

    /// The handle points at a channel map that has since been replaced
    #[error("Stale channel map handle: generation {held} replaced by {current}")]
    StaleHandle { held: u64, current: u64 },

    /// Nearest-wire lookup fell outside the plane
    #[error("Wire {wire} out of range for plane {plane}; nearest valid wire is {nearest_valid}")]
    WireOutOfRange {
        plane: PlaneId,
        wire: i64,
        nearest_valid: u32,
    },

    /// The blocking reload task panicked or was cancelled
    #[error("Reload task failed: {0}")]
    ReloadTask(String),

    /// Load failure with the identity and file that were attempted
    #[error("Failed to load geometry '{file}' for detector '{detector}': {source}")]
    LoadFailed {
        detector: String,
        file: String,
        #[source]
        source: Box<GeometryError>,
    },
}

impl GeometryError {
    /// Nearest valid wire for an out-of-range lookup, as a full wire ID.
    pub fn nearest_valid_wire(&self) -> Option<WireId> {
        match self {
            GeometryError::WireOutOfRange {
                plane,
                nearest_valid,
                ..
            } => Some(plane.wire(*nearest_valid)),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    /// A channel map is required but the detector is not recognized
    #[error("Detector '{detector}' is not supported by any channel map")]
    UnsupportedDetector { detector: String },
}

/// Structural problems in the description hierarchy
#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("Detector '{detector}' has no cryostats")]
    NoCryostats { detector: String },

    #[error("Cryostat {cryostat} contains no TPCs")]
    NoTpcs { cryostat: u32 },

    #[error("TPC {tpc} contains no wire planes")]
    NoPlanes { tpc: TpcId },

    #[error("Plane {plane} contains no wires")]
    NoWires { plane: PlaneId },

    /// Planes sit at the TPC center along x; drift sense undefined
    #[error("Cannot determine drift direction of TPC {tpc}: TPC x = {tpc_x}, plane x = {plane_x}")]
    UnknownDrift { tpc: TpcId, tpc_x: f64, plane_x: f64 },

    /// Adjacent wires are collinear with the wire direction
    #[error("Plane {plane} has degenerate wire layout")]
    DegeneratePlane { plane: PlaneId },

    #[error("Too many {kind} elements: {count}")]
    TooManyElements { kind: &'static str, count: usize },
}

/// Channel table construction errors
#[derive(Debug, Error)]
pub enum MapBuildError {
    /// Wrapped readout configured with a zero period
    #[error("Plane {plane}: wrap period must be positive")]
    ZeroWrapPeriod { plane: PlaneId },

    /// Channel count exceeds the configured or representable limit
    #[error("Channel space exhausted: {needed} channels needed, limit is {limit}")]
    ChannelSpaceExhausted { needed: u64, limit: u64 },
}

/// Errors from an object sorter
#[derive(Debug, Error)]
pub enum SortError {
    #[error("Cannot order planes of TPC {tpc}: drift direction is unknown")]
    UnknownDrift { tpc: TpcId },
}

/// Errors from a geometry source
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Geometry file '{file}' not found in search path [{search_path}]")]
    NotFound { file: String, search_path: String },

    #[error("Failed to read {path}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse {path}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Empty geometry description name")]
    EmptyDescription,
}
