//! Sorted-geometry builder
//!
//! Walks a description hierarchy, places every element in world
//! coordinates, orders siblings with an [`ObjectSorter`] and assigns IDs from
//! the resulting positions. Only the sorter decides IDs; the order of nodes
//! in the description has no effect unless two siblings are identical.

use super::sorter::{try_sort_by, ObjectSorter};
use super::wire_geometry::wire_frame;
use crate::domain::entities::{
    CryostatGeo, GeometryData, GeometryHierarchy, GeometryNode, OpDetGeo, PlaneGeo, TpcGeo,
    WireGeo,
};
use crate::domain::errors::{GeometryError, HierarchyError};
use crate::domain::value_objects::{NodeKind, NodeTransform, SortCandidate};
use geo_types::{CryostatId, DriftDirection, PlaneId, SignalType, TpcId, View};
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// Relative tolerance on the TPC/plane x separation used to infer drift.
const DRIFT_TOLERANCE: f64 = 1e-6;

/// A node found in the hierarchy, placed in world coordinates.
struct Placed<'a> {
    node: &'a GeometryNode,
    world: NodeTransform,
    center: Point3<f64>,
    position: usize,
}

impl<'a> Placed<'a> {
    fn candidate(&self) -> SortCandidate<'a> {
        SortCandidate {
            name: &self.node.name,
            center: self.center,
            position: self.position,
        }
    }
}

/// Collect the nearest descendants of `kind` below `node`. The search does
/// not descend into a match.
fn collect<'a>(
    node: &'a GeometryNode,
    node_world: &NodeTransform,
    kind: NodeKind,
    out: &mut Vec<Placed<'a>>,
) {
    for child in &node.children {
        let world = node_world.then(&child.transform);
        if child.kind == kind {
            out.push(Placed {
                node: child,
                center: world.origin(),
                world,
                position: out.len(),
            });
        } else {
            collect(child, &world, kind, out);
        }
    }
}

fn find<'a>(node: &'a GeometryNode, node_world: &NodeTransform, kind: NodeKind) -> Vec<Placed<'a>> {
    let mut out = Vec::new();
    collect(node, node_world, kind, &mut out);
    out
}

fn index(kind: &'static str, i: usize) -> Result<u32, HierarchyError> {
    u32::try_from(i)
        .ok()
        .filter(|&v| v != geo_types::INVALID_INDEX)
        .ok_or(HierarchyError::TooManyElements { kind, count: i + 1 })
}

/// Drift direction of a TPC from the x positions of its center and of one
/// of its planes.
pub fn drift_direction(tpc_x: f64, plane_x: f64) -> DriftDirection {
    let tolerance = DRIFT_TOLERANCE * tpc_x.abs().max(plane_x.abs()).max(1.0);
    let dx = plane_x - tpc_x;
    if dx < -tolerance {
        DriftDirection::NegX
    } else if dx > tolerance {
        DriftDirection::PosX
    } else {
        DriftDirection::Unknown
    }
}

/// Build the canonical [`GeometryData`] of `hierarchy`.
pub fn build_geometry(
    hierarchy: &GeometryHierarchy,
    sorter: &dyn ObjectSorter,
) -> Result<GeometryData, GeometryError> {
    let root_world = hierarchy.root.transform;
    let mut cryostats = if hierarchy.root.kind == NodeKind::Cryostat {
        vec![Placed {
            node: &hierarchy.root,
            center: root_world.origin(),
            world: root_world,
            position: 0,
        }]
    } else {
        find(&hierarchy.root, &root_world, NodeKind::Cryostat)
    };

    if cryostats.is_empty() {
        return Err(HierarchyError::NoCryostats {
            detector: hierarchy.detector_name.clone(),
        }
        .into());
    }
    cryostats.sort_by(|a, b| sorter.compare_cryostats(&a.candidate(), &b.candidate()));

    let mut op_det_count = 0usize;
    let mut built = Vec::with_capacity(cryostats.len());
    for (c, cryostat) in cryostats.iter().enumerate() {
        let id = CryostatId::new(index("cryostat", c)?);
        built.push(build_cryostat(id, cryostat, sorter, &mut op_det_count)?);
    }

    let data = GeometryData {
        detector_name: hierarchy.detector_name.clone(),
        cryostats: built,
    };
    debug!(
        detector = %data.detector_name,
        cryostats = data.cryostats.len(),
        tpcs = data.n_tpcs(),
        planes = data.n_planes(),
        wires = data.n_wires(),
        op_dets = data.n_op_dets(),
        "[geo] Sorted geometry built"
    );
    Ok(data)
}

fn build_cryostat(
    id: CryostatId,
    cryostat: &Placed<'_>,
    sorter: &dyn ObjectSorter,
    op_det_count: &mut usize,
) -> Result<CryostatGeo, GeometryError> {
    let mut tpcs = find(cryostat.node, &cryostat.world, NodeKind::Tpc);
    if tpcs.is_empty() {
        return Err(HierarchyError::NoTpcs {
            cryostat: id.cryostat,
        }
        .into());
    }
    tpcs.sort_by(|a, b| sorter.compare_tpcs(&a.candidate(), &b.candidate()));

    let mut tpc_geos = Vec::with_capacity(tpcs.len());
    for (t, tpc) in tpcs.iter().enumerate() {
        tpc_geos.push(build_tpc(id.tpc(index("tpc", t)?), tpc, sorter)?);
    }

    let mut op_dets = find(cryostat.node, &cryostat.world, NodeKind::OpDet);
    op_dets.sort_by(|a, b| sorter.compare_op_dets(&a.candidate(), &b.candidate()));
    let mut op_det_geos = Vec::with_capacity(op_dets.len());
    for op_det in &op_dets {
        op_det_geos.push(OpDetGeo {
            index: index("optical detector", *op_det_count)?,
            name: op_det.node.name.clone(),
            center: op_det.center,
        });
        *op_det_count += 1;
    }

    Ok(CryostatGeo {
        id,
        name: cryostat.node.name.clone(),
        center: cryostat.center,
        tpcs: tpc_geos,
        op_dets: op_det_geos,
    })
}

fn build_tpc(
    id: TpcId,
    tpc: &Placed<'_>,
    sorter: &dyn ObjectSorter,
) -> Result<TpcGeo, GeometryError> {
    let mut planes = find(tpc.node, &tpc.world, NodeKind::Plane);
    let first_plane_x = match planes.first() {
        Some(plane) => plane.center.x,
        None => return Err(HierarchyError::NoPlanes { tpc: id }.into()),
    };

    let drift = drift_direction(tpc.center.x, first_plane_x);
    if drift == DriftDirection::Unknown {
        return Err(HierarchyError::UnknownDrift {
            tpc: id,
            tpc_x: tpc.center.x,
            plane_x: first_plane_x,
        }
        .into());
    }

    try_sort_by(&mut planes, |a, b| {
        sorter.compare_planes(&a.candidate(), &b.candidate(), id, drift)
    })?;

    let n_planes = planes.len();
    let mut plane_geos = Vec::with_capacity(n_planes);
    for (p, plane) in planes.iter().enumerate() {
        let plane_id = id.plane(index("plane", p)?);
        let signal_type = if p + 1 == n_planes {
            SignalType::Collection
        } else {
            SignalType::Induction
        };
        plane_geos.push(build_plane(
            plane_id,
            plane,
            View::from_plane_index(p),
            signal_type,
            sorter,
        )?);
    }

    Ok(TpcGeo {
        id,
        name: tpc.node.name.clone(),
        center: tpc.center,
        drift,
        planes: plane_geos,
    })
}

fn build_plane(
    id: PlaneId,
    plane: &Placed<'_>,
    view: View,
    signal_type: SignalType,
    sorter: &dyn ObjectSorter,
) -> Result<PlaneGeo, GeometryError> {
    let mut wires = find(plane.node, &plane.world, NodeKind::Wire);
    if wires.is_empty() {
        return Err(HierarchyError::NoWires { plane: id }.into());
    }
    wires.sort_by(|a, b| sorter.compare_wires(&a.candidate(), &b.candidate()));

    let mut wire_geos = Vec::with_capacity(wires.len());
    for (w, wire) in wires.iter().enumerate() {
        let direction = wire.world.apply_vector(&Vector3::z());
        wire_geos.push(WireGeo {
            id: id.wire(index("wire", w)?),
            name: wire.node.name.clone(),
            center: wire.center,
            direction: direction.normalize(),
            half_length: wire.node.half_length,
        });
    }

    let frame = wire_frame(id, &wire_geos)?;

    Ok(PlaneGeo {
        id,
        name: plane.node.name.clone(),
        center: plane.center,
        view,
        signal_type,
        frame,
        wires: wire_geos,
    })
}
