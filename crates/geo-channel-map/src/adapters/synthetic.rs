//! Synthetic detector descriptions
//!
//! Generates regular wire-plane detectors for tests, benchmarks and the dump
//! tool. Element `k` as generated is the element with index `k` after
//! canonical sorting, so expected IDs are known up front; `with_shuffle_seed`
//! scrambles sibling order in the description without changing that.

use crate::domain::entities::{GeometryHierarchy, GeometryNode};
use crate::domain::value_objects::{NodeKind, NodeTransform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::f64::consts::FRAC_PI_2;

/// Gap between neighbouring TPCs along x.
const TPC_GAP: f64 = 50.0;

/// Gap between neighbouring cryostats along x.
const CRYOSTAT_GAP: f64 = 200.0;

/// Spacing of optical detectors along z.
const OP_DET_SPACING: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct SyntheticDetector {
    cryostats: usize,
    tpcs_per_cryostat: usize,
    planes_per_tpc: usize,
    wires_per_plane: usize,
    op_dets_per_cryostat: usize,
    wire_pitch: f64,
    plane_spacing: f64,
    tpc_half_width: f64,
    wire_half_length: f64,
    /// Wire angle from vertical per plane, degrees
    wire_angles: Option<Vec<f64>>,
    shuffle_seed: Option<u64>,
}

impl Default for SyntheticDetector {
    fn default() -> Self {
        Self {
            cryostats: 1,
            tpcs_per_cryostat: 1,
            planes_per_tpc: 3,
            wires_per_plane: 20,
            op_dets_per_cryostat: 0,
            wire_pitch: 0.3,
            plane_spacing: 0.3,
            tpc_half_width: 100.0,
            wire_half_length: 50.0,
            wire_angles: None,
            shuffle_seed: None,
        }
    }
}

impl SyntheticDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cryostats(mut self, n: usize) -> Self {
        self.cryostats = n;
        self
    }

    pub fn with_tpcs_per_cryostat(mut self, n: usize) -> Self {
        self.tpcs_per_cryostat = n;
        self
    }

    pub fn with_planes_per_tpc(mut self, n: usize) -> Self {
        self.planes_per_tpc = n;
        self
    }

    pub fn with_wires_per_plane(mut self, n: usize) -> Self {
        self.wires_per_plane = n;
        self
    }

    pub fn with_op_dets_per_cryostat(mut self, n: usize) -> Self {
        self.op_dets_per_cryostat = n;
        self
    }

    pub fn with_wire_pitch(mut self, pitch: f64) -> Self {
        self.wire_pitch = pitch;
        self
    }

    /// Wire angles from vertical, in degrees, one per plane. Angles must lie
    /// strictly between -90 and 90.
    pub fn with_wire_angles(mut self, angles: Vec<f64>) -> Self {
        self.wire_angles = Some(angles);
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Parse a `CxTxPxW` shape such as `2x2x3x100`.
    pub fn from_shape(shape: &str) -> Option<Self> {
        let dims: Vec<usize> = shape
            .split('x')
            .map(|d| d.trim().parse().ok())
            .collect::<Option<_>>()?;
        match dims.as_slice() {
            &[c, t, p, w] if c > 0 && t > 0 && p > 0 && w > 0 => Some(
                Self::new()
                    .with_cryostats(c)
                    .with_tpcs_per_cryostat(t)
                    .with_planes_per_tpc(p)
                    .with_wires_per_plane(w),
            ),
            _ => None,
        }
    }

    pub fn wire_count(&self) -> usize {
        self.cryostats * self.tpcs_per_cryostat * self.planes_per_tpc * self.wires_per_plane
    }

    pub fn plane_count(&self) -> usize {
        self.cryostats * self.tpcs_per_cryostat * self.planes_per_tpc
    }

    pub fn op_det_count(&self) -> usize {
        self.cryostats * self.op_dets_per_cryostat
    }

    fn wire_angle(&self, plane: usize) -> f64 {
        if let Some(angle) = self.wire_angles.as_ref().and_then(|a| a.get(plane)) {
            return angle.to_radians();
        }
        if plane + 1 == self.planes_per_tpc {
            0.0
        } else if plane % 2 == 0 {
            60f64.to_radians()
        } else {
            (-60f64).to_radians()
        }
    }

    fn tpc_slot(&self) -> f64 {
        2.0 * (self.tpc_half_width + self.planes_per_tpc as f64 * self.plane_spacing) + TPC_GAP
    }

    /// Build the description for `detector_name`.
    pub fn hierarchy(&self, detector_name: &str) -> GeometryHierarchy {
        let mut rng = self.shuffle_seed.map(StdRng::seed_from_u64);
        let cryostat_slot = self.tpcs_per_cryostat as f64 * self.tpc_slot() + CRYOSTAT_GAP;

        let mut cryostats: Vec<GeometryNode> = (0..self.cryostats)
            .map(|c| self.cryostat(c, cryostat_slot * c as f64, &mut rng))
            .collect();
        shuffle(&mut cryostats, &mut rng);

        let enclosure =
            GeometryNode::new("volDetEnclosure", NodeKind::Volume).with_children(cryostats);
        GeometryHierarchy::new(
            detector_name,
            GeometryNode::new("volWorld", NodeKind::Volume).with_child(enclosure),
        )
    }

    fn cryostat(&self, c: usize, x: f64, rng: &mut Option<StdRng>) -> GeometryNode {
        let mut children: Vec<GeometryNode> = (0..self.tpcs_per_cryostat)
            .map(|t| self.tpc(c, t, rng))
            .collect();
        children.extend((0..self.op_dets_per_cryostat).map(|k| {
            GeometryNode::new(format!("volOpDetSensitive_{}_{}", c, k), NodeKind::OpDet)
                .with_transform(NodeTransform::translation(
                    -TPC_GAP,
                    0.0,
                    k as f64 * OP_DET_SPACING,
                ))
        }));
        shuffle(&mut children, rng);

        GeometryNode::new(format!("volCryostat{}", c), NodeKind::Cryostat)
            .with_transform(NodeTransform::translation(x, 0.0, 0.0))
            .with_children(children)
    }

    fn tpc(&self, c: usize, t: usize, rng: &mut Option<StdRng>) -> GeometryNode {
        // Even TPCs read out on their -x face, odd TPCs on their +x face
        let side = if t % 2 == 0 { -1.0 } else { 1.0 };
        let mut planes: Vec<GeometryNode> = (0..self.planes_per_tpc)
            .map(|p| {
                let x = side * (self.tpc_half_width + p as f64 * self.plane_spacing);
                self.plane(c, t, p, x, rng)
            })
            .collect();
        shuffle(&mut planes, rng);

        GeometryNode::new(format!("volTPC_{}_{}", c, t), NodeKind::Tpc)
            .with_transform(NodeTransform::translation(
                t as f64 * self.tpc_slot(),
                0.0,
                0.0,
            ))
            .with_children(planes)
    }

    fn plane(&self, c: usize, t: usize, p: usize, x: f64, rng: &mut Option<StdRng>) -> GeometryNode {
        let angle = self.wire_angle(p);
        let (sin, cos) = angle.sin_cos();
        let middle = (self.wires_per_plane as f64 - 1.0) / 2.0;

        let mut wires: Vec<GeometryNode> = (0..self.wires_per_plane)
            .map(|w| {
                // Wires step along (0, -sin, cos), perpendicular to their axis
                let offset = (w as f64 - middle) * self.wire_pitch;
                GeometryNode::new(format!("volTPCWire_{}_{}_{}_{}", c, t, p, w), NodeKind::Wire)
                    .with_transform(NodeTransform::translation_rotated_x(
                        0.0,
                        -sin * offset,
                        cos * offset,
                        angle - FRAC_PI_2,
                    ))
                    .with_half_length(self.wire_half_length)
            })
            .collect();
        shuffle(&mut wires, rng);

        GeometryNode::new(format!("volTPCPlane_{}_{}_{}", c, t, p), NodeKind::Plane)
            .with_transform(NodeTransform::translation(x, 0.0, 0.0))
            .with_children(wires)
    }
}

fn shuffle(nodes: &mut [GeometryNode], rng: &mut Option<StdRng>) {
    if let Some(rng) = rng.as_mut() {
        nodes.shuffle(rng);
    }
}
