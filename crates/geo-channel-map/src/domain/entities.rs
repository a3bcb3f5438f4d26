//! Domain entities
//!
//! Two shapes of the same detector: the [`GeometryHierarchy`] as read from a
//! description (sibling order arbitrary), and the [`GeometryData`] produced by
//! the sorted-geometry builder (sibling order canonical, IDs assigned).

use super::value_objects::{NodeKind, NodeTransform, WireFrame};
use geo_types::{
    CryostatId, DriftDirection, OpDetIndex, PlaneId, SignalType, TpcId, View, WireId,
};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

// =============================================================================
// DESCRIPTION HIERARCHY
// =============================================================================

/// One node of the geometry description tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryNode {
    pub name: String,
    pub kind: NodeKind,
    /// Placement relative to the parent node
    #[serde(default)]
    pub transform: NodeTransform,
    /// Half extent along the local z axis (wire half length for wires)
    #[serde(default)]
    pub half_length: f64,
    #[serde(default)]
    pub children: Vec<GeometryNode>,
}

impl GeometryNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: NodeTransform::identity(),
            half_length: 0.0,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: NodeTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_half_length(mut self, half_length: f64) -> Self {
        self.half_length = half_length;
        self
    }

    pub fn with_child(mut self, child: GeometryNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = GeometryNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes of `kind` in this subtree, this node included.
    pub fn count(&self, kind: NodeKind) -> usize {
        let own = usize::from(self.kind == kind);
        own + self.children.iter().map(|c| c.count(kind)).sum::<usize>()
    }
}

/// A loaded geometry description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryHierarchy {
    pub detector_name: String,
    pub root: GeometryNode,
}

impl GeometryHierarchy {
    pub fn new(detector_name: impl Into<String>, root: GeometryNode) -> Self {
        Self {
            detector_name: detector_name.into(),
            root,
        }
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.root.count(kind)
    }
}

// =============================================================================
// SORTED GEOMETRY
// =============================================================================

/// A sense wire in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireGeo {
    pub id: WireId,
    pub name: String,
    pub center: Point3<f64>,
    /// Unit vector along the wire
    pub direction: Vector3<f64>,
    pub half_length: f64,
}

impl WireGeo {
    pub fn start(&self) -> Point3<f64> {
        self.center - self.direction * self.half_length
    }

    pub fn end(&self) -> Point3<f64> {
        self.center + self.direction * self.half_length
    }
}

/// A wire plane with its wires in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneGeo {
    pub id: PlaneId,
    pub name: String,
    pub center: Point3<f64>,
    pub view: View,
    pub signal_type: SignalType,
    pub frame: WireFrame,
    pub wires: Vec<WireGeo>,
}

impl PlaneGeo {
    pub fn wire_count(&self) -> u32 {
        self.wires.len() as u32
    }

    pub fn pitch(&self) -> f64 {
        self.frame.pitch
    }

    pub fn wire(&self, wire: u32) -> Option<&WireGeo> {
        self.wires.get(wire as usize)
    }
}

/// A TPC with its planes ordered along the drift direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TpcGeo {
    pub id: TpcId,
    pub name: String,
    pub center: Point3<f64>,
    pub drift: DriftDirection,
    pub planes: Vec<PlaneGeo>,
}

impl TpcGeo {
    pub fn plane(&self, plane: u32) -> Option<&PlaneGeo> {
        self.planes.get(plane as usize)
    }
}

/// An optical detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpDetGeo {
    /// Index across the whole detector
    pub index: OpDetIndex,
    pub name: String,
    pub center: Point3<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryostatGeo {
    pub id: CryostatId,
    pub name: String,
    pub center: Point3<f64>,
    pub tpcs: Vec<TpcGeo>,
    pub op_dets: Vec<OpDetGeo>,
}

impl CryostatGeo {
    pub fn tpc(&self, tpc: u32) -> Option<&TpcGeo> {
        self.tpcs.get(tpc as usize)
    }
}

/// The detector in canonical order. Every index equals the element's
/// position in its parent's vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryData {
    pub detector_name: String,
    pub cryostats: Vec<CryostatGeo>,
}

impl GeometryData {
    pub fn cryostat(&self, id: CryostatId) -> Option<&CryostatGeo> {
        self.cryostats.get(id.cryostat as usize)
    }

    pub fn tpc(&self, id: TpcId) -> Option<&TpcGeo> {
        self.cryostat(id.cryostat_id())?.tpc(id.tpc)
    }

    pub fn plane(&self, id: PlaneId) -> Option<&PlaneGeo> {
        self.tpc(id.tpc_id())?.plane(id.plane)
    }

    pub fn wire(&self, id: WireId) -> Option<&WireGeo> {
        self.plane(id.plane_id())?.wire(id.wire)
    }

    pub fn tpcs(&self) -> impl Iterator<Item = &TpcGeo> {
        self.cryostats.iter().flat_map(|c| c.tpcs.iter())
    }

    /// Planes in ID order.
    pub fn planes(&self) -> impl Iterator<Item = &PlaneGeo> {
        self.tpcs().flat_map(|t| t.planes.iter())
    }

    pub fn op_dets(&self) -> impl Iterator<Item = &OpDetGeo> {
        self.cryostats.iter().flat_map(|c| c.op_dets.iter())
    }

    pub fn n_tpcs(&self) -> usize {
        self.tpcs().count()
    }

    pub fn n_planes(&self) -> usize {
        self.planes().count()
    }

    pub fn n_wires(&self) -> usize {
        self.planes().map(|p| p.wires.len()).sum()
    }

    pub fn n_op_dets(&self) -> u32 {
        self.op_dets().count() as u32
    }
}
