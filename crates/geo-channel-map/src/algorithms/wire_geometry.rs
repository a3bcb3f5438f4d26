//! Wire-plane measurement frame
//!
//! Derives pitch and the increasing-wire direction from sorted wires.

use crate::domain::entities::WireGeo;
use crate::domain::errors::HierarchyError;
use crate::domain::value_objects::WireFrame;
use geo_types::PlaneId;
use nalgebra::{Point3, Vector3};

/// Components smaller than this are snapped to zero.
const DIRECTION_EPSILON: f64 = 1e-4;

/// Frame of a plane whose wires are already in canonical order.
///
/// The increasing-wire direction lies in the plane, perpendicular to the
/// wires, and points from a middle wire toward its successor. The pitch is
/// the perpendicular distance between wires 0 and 1.
pub fn wire_frame(plane: PlaneId, wires: &[WireGeo]) -> Result<WireFrame, HierarchyError> {
    let first = wires.first().ok_or(HierarchyError::NoWires { plane })?;

    if wires.len() < 2 {
        return Ok(WireFrame {
            origin: first.center,
            increasing: Vector3::zeros(),
            pitch: 0.0,
            wire_count: 1,
        });
    }

    let mid = (wires.len() - 1) / 2;
    let wire_dir = wires[mid].direction;
    let to_next = wires[mid + 1].center - wires[mid].center;

    let normal = wire_dir.cross(&to_next);
    let norm = normal.norm();
    if norm <= f64::EPSILON {
        return Err(HierarchyError::DegeneratePlane { plane });
    }
    let increasing = snap(normal.unscale(norm).cross(&wire_dir).normalize());

    let pitch = (wires[1].center - wires[0].center).dot(&increasing).abs();

    Ok(WireFrame {
        origin: first.center,
        increasing,
        pitch,
        wire_count: wires.len() as u32,
    })
}

/// Midpoint of the plane, averaged over wire centers.
pub fn plane_center(wires: &[WireGeo]) -> Option<Point3<f64>> {
    if wires.is_empty() {
        return None;
    }
    let sum = wires
        .iter()
        .fold(Vector3::zeros(), |acc, w| acc + w.center.coords);
    Some(Point3::from(sum / wires.len() as f64))
}

fn snap(v: Vector3<f64>) -> Vector3<f64> {
    v.map(|c| if c.abs() < DIRECTION_EPSILON { 0.0 } else { c })
}
