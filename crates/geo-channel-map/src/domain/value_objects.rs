//! Value objects for the channel map engine

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Detector name meaning "no identity known"; never triggers a reload.
pub const NO_DETECTOR_NAME: &str = "nodetectorname";

/// Role of a node in the description hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Passive container (world, enclosure, ...)
    Volume,
    Cryostat,
    Tpc,
    Plane,
    Wire,
    /// Optical detector
    OpDet,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Volume => "volume",
            NodeKind::Cryostat => "cryostat",
            NodeKind::Tpc => "tpc",
            NodeKind::Plane => "plane",
            NodeKind::Wire => "wire",
            NodeKind::OpDet => "opdet",
        }
    }
}

/// Placement of a node relative to its parent.
///
/// Serialized as a translation and a rotation vector (axis scaled by the
/// angle in radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TransformRepr", into = "TransformRepr")]
pub struct NodeTransform(pub Isometry3<f64>);

#[derive(Serialize, Deserialize)]
struct TransformRepr {
    #[serde(default)]
    translation: [f64; 3],
    #[serde(default)]
    rotation: [f64; 3],
}

impl From<TransformRepr> for NodeTransform {
    fn from(repr: TransformRepr) -> Self {
        Self(Isometry3::new(
            Vector3::from(repr.translation),
            Vector3::from(repr.rotation),
        ))
    }
}

impl From<NodeTransform> for TransformRepr {
    fn from(transform: NodeTransform) -> Self {
        let t = transform.0.translation.vector;
        let r = transform.0.rotation.scaled_axis();
        Self {
            translation: [t.x, t.y, t.z],
            rotation: [r.x, r.y, r.z],
        }
    }
}

impl NodeTransform {
    pub fn identity() -> Self {
        Self(Isometry3::identity())
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self(Isometry3::translation(x, y, z))
    }

    /// Translation followed by a rotation about the x axis.
    pub fn translation_rotated_x(x: f64, y: f64, z: f64, angle: f64) -> Self {
        Self(Isometry3::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angle),
        ))
    }

    /// Transform of a child expressed in this node's parent frame.
    pub fn then(&self, child: &NodeTransform) -> NodeTransform {
        NodeTransform(self.0 * child.0)
    }

    pub fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.0.transform_point(point)
    }

    pub fn apply_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.0.transform_vector(vector)
    }

    /// Node origin in the parent frame.
    pub fn origin(&self) -> Point3<f64> {
        self.apply_point(&Point3::origin())
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// One sibling as seen by an object sorter.
#[derive(Debug, Clone, Copy)]
pub struct SortCandidate<'a> {
    /// Node name in the description
    pub name: &'a str,
    /// Center in world coordinates
    pub center: Point3<f64>,
    /// Position among siblings as loaded
    pub position: usize,
}

/// Measurement frame of a wire plane.
///
/// The wire coordinate of a point is its distance from wire 0 along the
/// increasing-wire direction, in units of the pitch; wire `k` sits at `k`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WireFrame {
    /// Center of wire 0
    pub origin: Point3<f64>,
    /// Unit vector perpendicular to the wires, toward higher wire numbers
    pub increasing: Vector3<f64>,
    /// Distance between adjacent wires; zero for single-wire planes
    pub pitch: f64,
    pub wire_count: u32,
}

impl WireFrame {
    /// Continuous wire coordinate of `point`.
    pub fn coordinate(&self, point: &Point3<f64>) -> f64 {
        if self.pitch <= 0.0 {
            return 0.0;
        }
        (point - self.origin).dot(&self.increasing) / self.pitch
    }

    /// Index of the closest wire, or `Err((nearest, clamped))` when the
    /// closest wire number is outside `[0, wire_count)`. `None` when `point`
    /// has a non-finite coordinate.
    pub fn nearest_wire(&self, point: &Point3<f64>) -> Option<Result<u32, (i64, u32)>> {
        if !point.coords.iter().all(|c| c.is_finite()) {
            return None;
        }
        let nearest = self.coordinate(point).round();
        if !nearest.is_finite() {
            return None;
        }
        let last = self.wire_count.saturating_sub(1);
        Some(if nearest < 0.0 {
            Err((nearest as i64, 0))
        } else if nearest > last as f64 {
            Err((nearest as i64, last))
        } else {
            Ok(nearest as u32)
        })
    }
}

/// Which description to load and for which detector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeometryDescription {
    /// Detector identity, lowercased
    pub detector_name: String,
    /// Description file name, resolved through the search path
    pub file: String,
}

impl GeometryDescription {
    pub fn new(detector_name: impl AsRef<str>, file: impl Into<String>) -> Self {
        Self {
            detector_name: detector_name.as_ref().to_lowercase(),
            file: file.into(),
        }
    }

    /// Conventional description of a detector: `<name>.<extension>`.
    pub fn for_detector(detector_name: &str, extension: &str) -> Self {
        let name = detector_name.to_lowercase();
        let file = format!("{}.{}", name, extension);
        Self {
            detector_name: name,
            file,
        }
    }
}

/// Notification that the detector identity of the incoming data changed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DetectorIdentityChanged {
    /// `None` when the boundary carries no detector information
    pub detector_name: Option<String>,
}

impl DetectorIdentityChanged {
    pub fn new(detector_name: impl Into<String>) -> Self {
        Self {
            detector_name: Some(detector_name.into()),
        }
    }
}

/// Result of handling a `DetectorIdentityChanged` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReloadOutcome {
    /// Notification ignored (configuration forces the configured detector,
    /// or the event carries no identity)
    Skipped,
    /// Identity matches the loaded detector
    Unchanged,
    /// New geometry published with this generation
    Reloaded { generation: u64 },
}
