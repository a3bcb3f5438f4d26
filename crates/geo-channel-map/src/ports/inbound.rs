//! Inbound Ports (Driving Ports / API)
//!
//! `ChannelMapAlg` is the query surface consumed by reconstruction code;
//! `GeometryApi` is the lifecycle surface of the geometry provider.

use crate::algorithms::channel_map::{PlaneLayout, WireIdIter};
use crate::domain::entities::{GeometryData, GeometryHierarchy};
use crate::domain::errors::GeometryError;
use crate::domain::value_objects::{DetectorIdentityChanged, GeometryDescription, ReloadOutcome};
use geo_types::{ChannelId, OpChannel, OpDetIndex, PlaneId, SignalType, View, WireId};
use nalgebra::Point3;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Channel ↔ wire mapping algorithm.
///
/// Lifecycle is Unbuilt → Built via [`initialize`](Self::initialize); every
/// query on an unbuilt map fails with [`GeometryError::NotReady`]. A built
/// map is immutable and may be shared between threads.
pub trait ChannelMapAlg: Send + Sync + fmt::Debug {
    /// Build the channel tables from sorted geometry. Replaces any previous
    /// tables; on error the map is left unbuilt.
    fn initialize(&mut self, geometry: &GeometryData) -> Result<(), GeometryError>;

    /// Discard the tables.
    fn uninitialize(&mut self);

    fn is_ready(&self) -> bool;

    /// Per-plane layout in plane ID order.
    fn plane_layouts(&self) -> Result<&[PlaneLayout], GeometryError>;

    /// Total number of TPC channels. Channels are `0..channel_count`.
    fn channel_count(&self) -> Result<u32, GeometryError>;

    /// Channel read out by `wire`, or [`ChannelId::INVALID`] when the wire
    /// does not exist.
    fn wire_to_channel(&self, wire: WireId) -> Result<ChannelId, GeometryError>;

    /// Wires read out by `channel`, ascending. Empty for an unknown channel.
    fn channel_to_wires(&self, channel: ChannelId) -> Result<Vec<WireId>, GeometryError>;

    /// Continuous wire coordinate of `position` on `plane`. Wire `k` sits at `k`.
    fn wire_coordinate(&self, position: &Point3<f64>, plane: PlaneId) -> Result<f64, GeometryError>;

    /// Wire closest to `position` on `plane`.
    ///
    /// Returns [`WireId::INVALID`] for an unknown plane or a position with a
    /// non-finite coordinate, and [`GeometryError::WireOutOfRange`] when the
    /// closest wire number falls outside the plane.
    fn nearest_wire_id(&self, position: &Point3<f64>, plane: PlaneId)
        -> Result<WireId, GeometryError>;

    /// Channel of the wire closest to `position`; positions beyond the
    /// plane edge resolve to the edge wire.
    fn nearest_channel(
        &self,
        position: &Point3<f64>,
        plane: PlaneId,
    ) -> Result<ChannelId, GeometryError> {
        let wire = match self.nearest_wire_id(position, plane) {
            Ok(wire) => wire,
            Err(err) => match err.nearest_valid_wire() {
                Some(wire) => wire,
                None => return Err(err),
            },
        };
        self.wire_to_channel(wire)
    }

    /// All wire IDs in canonical order. The iterator is `Clone`, so an
    /// iteration can be restarted from any saved position.
    fn wire_ids(&self) -> Result<WireIdIter<'_>, GeometryError> {
        Ok(WireIdIter::new(self.plane_layouts()?))
    }

    fn plane_ids(&self) -> Result<&BTreeSet<PlaneId>, GeometryError>;

    /// Views present in the detector.
    fn views(&self) -> Result<&BTreeSet<View>, GeometryError>;

    /// View of the plane read by `channel`; [`View::Unknown`] for an unknown channel.
    fn view(&self, channel: ChannelId) -> Result<View, GeometryError>;

    /// Signal type of `channel`; [`SignalType::Unknown`] for an unknown channel.
    fn signal_type(&self, channel: ChannelId) -> Result<SignalType, GeometryError>;

    // -------------------------------------------------------------------------
    // Optical channels: one hardware channel per detector unless overridden.
    // -------------------------------------------------------------------------

    fn op_channel_count(&self, n_op_dets: u32) -> u32 {
        n_op_dets
    }

    /// Largest optical channel number plus one.
    fn max_op_channel(&self, n_op_dets: u32) -> u32 {
        self.op_channel_count(n_op_dets)
    }

    fn op_hardware_channel_count(&self, _op_det: OpDetIndex) -> u32 {
        1
    }

    fn op_channel(&self, op_det: OpDetIndex, _hardware_channel: u32) -> OpChannel {
        op_det
    }

    fn op_det_from_op_channel(&self, op_channel: OpChannel) -> OpDetIndex {
        op_channel
    }

    fn hardware_channel_from_op_channel(&self, _op_channel: OpChannel) -> u32 {
        0
    }

    fn is_valid_op_channel(&self, op_channel: OpChannel, n_op_dets: u32) -> bool {
        op_channel < self.op_channel_count(n_op_dets)
    }
}

/// Everything published by one successful load.
#[derive(Debug)]
pub struct LoadedGeometry {
    pub description: GeometryDescription,
    /// Description file handed to detector simulation
    pub simulation_file: String,
    pub hierarchy: GeometryHierarchy,
    /// Sorted geometry; absent when no channel map was selected
    pub geometry: Option<Arc<GeometryData>>,
    pub channel_map: Option<Arc<dyn ChannelMapAlg>>,
    /// Publish counter of the provider at install time
    pub generation: u64,
}

impl LoadedGeometry {
    pub fn detector_name(&self) -> &str {
        &self.description.detector_name
    }

    pub fn n_op_dets(&self) -> u32 {
        self.geometry.as_ref().map_or(0, |g| g.n_op_dets())
    }
}

/// Shared read handle to a published channel map.
///
/// Stays usable after the provider publishes a newer map; `is_current`
/// reports whether it still refers to the live one.
#[derive(Clone)]
pub struct ChannelMapHandle {
    map: Arc<dyn ChannelMapAlg>,
    generation: u64,
    live: Arc<AtomicU64>,
}

impl ChannelMapHandle {
    pub fn new(map: Arc<dyn ChannelMapAlg>, generation: u64, live: Arc<AtomicU64>) -> Self {
        Self {
            map,
            generation,
            live,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.live.load(Ordering::Acquire) == self.generation
    }

    /// Fail with [`GeometryError::StaleHandle`] once a newer map is live.
    pub fn ensure_current(&self) -> Result<&dyn ChannelMapAlg, GeometryError> {
        let current = self.live.load(Ordering::Acquire);
        if current == self.generation {
            Ok(self.map.as_ref())
        } else {
            Err(GeometryError::StaleHandle {
                held: self.generation,
                current,
            })
        }
    }

    pub fn map(&self) -> &Arc<dyn ChannelMapAlg> {
        &self.map
    }
}

impl Deref for ChannelMapHandle {
    type Target = dyn ChannelMapAlg;

    fn deref(&self) -> &Self::Target {
        self.map.as_ref()
    }
}

impl fmt::Debug for ChannelMapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelMapHandle")
            .field("generation", &self.generation)
            .field("current", &self.is_current())
            .finish()
    }
}

/// Geometry provider API
pub trait GeometryApi: Send + Sync {
    /// Load `description`, select and build the channel map, and publish the
    /// result atomically. On failure the previous geometry stays published.
    fn load_geometry(
        &self,
        description: GeometryDescription,
    ) -> Result<Arc<LoadedGeometry>, GeometryError>;

    /// React to a detector-identity change at a run boundary.
    fn notify(&self, event: DetectorIdentityChanged) -> Result<ReloadOutcome, GeometryError>;

    /// Currently published geometry.
    fn current(&self) -> Result<Arc<LoadedGeometry>, GeometryError>;

    /// Handle to the published channel map.
    fn channel_map(&self) -> Result<ChannelMapHandle, GeometryError>;

    /// Identity of the published detector, if any.
    fn detector_name(&self) -> Option<String>;
}
