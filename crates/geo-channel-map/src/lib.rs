//! # Geometry Channel Map
//!
//! Builds the bidirectional channel ↔ wire index of a wire-plane detector
//! from a hierarchical geometry description whose on-disk node order is
//! arbitrary.
//!
//! ## Architecture
//!
//! - **Domain**: Geometry node hierarchy, sorted geometry (`GeometryData`), errors, invariants
//! - **Algorithms**: Object sorter, sorted-geometry builder, standard channel map, wire-plane frames
//! - **Ports**: Inbound (`ChannelMapAlg`, `GeometryApi`) and Outbound (`GeometrySource`, `ExperimentHelper`)
//! - **Adapters**: JSON description source, search path, in-memory source, synthetic detector
//! - **Application**: Detector selector (`StandardGeometryHelper`) and `GeometryProvider`
//! - **IPC**: Run-boundary handler feeding detector-identity changes to the provider
//!
//! ## Data Flow
//!
//! ```text
//! description file ──GeometrySource──→ GeometryHierarchy
//!                                            │
//!                         ExperimentHelper (identity → variant)
//!                                            │
//!                    ObjectSorter ──→ build_geometry ──→ GeometryData
//!                                            │
//!                                 ChannelMapAlg::initialize
//!                                            │
//!                         GeometryProvider (atomic publish)
//!                                            │
//!                                   ChannelMapHandle → consumers
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

pub use adapters::{InMemoryGeometrySource, JsonGeometrySource, SearchPath, SyntheticDetector};
pub use algorithms::{
    build_geometry, ObjectSorter, PlaneLayout, StandardChannelMap, StandardSorter, WireIdIter,
};
pub use application::{
    ChannelMapVariant, GeometryProvider, StandardGeometryHelper, STANDARD_DETECTORS,
};
pub use config::{AxisOrder, ChannelRule, GeometryConfig, SortAxis, SortingParameters};
pub use domain::entities::*;
pub use domain::errors::*;
pub use domain::value_objects::*;
pub use ipc::{RunBoundary, RunBoundaryHandler, RunBoundaryResponse};
pub use ports::inbound::{ChannelMapAlg, ChannelMapHandle, GeometryApi, LoadedGeometry};
pub use ports::outbound::{ChannelMapSelection, ExperimentHelper, GeometrySource};

pub use geo_types::{
    ChannelId, CryostatId, DriftDirection, OpChannel, OpDetIndex, PlaneId, SignalType, TpcId, View,
    WireId,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
