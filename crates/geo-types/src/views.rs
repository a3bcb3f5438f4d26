//! Plane views, signal types and drift directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation class of the wires in a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum View {
    U,
    V,
    Z,
    Unknown,
}

impl View {
    /// View conventionally assigned to the plane at `index` in drift order.
    pub const fn from_plane_index(index: usize) -> Self {
        match index {
            0 => View::U,
            1 => View::V,
            2 => View::Z,
            _ => View::Unknown,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::U => "U",
            View::V => "V",
            View::Z => "Z",
            View::Unknown => "?",
        };
        f.write_str(name)
    }
}

/// Whether a plane induces a bipolar signal or collects the drifting charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    Induction,
    Collection,
    Unknown,
}

/// Direction along x in which ionization electrons drift toward the planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriftDirection {
    PosX,
    NegX,
    Unknown,
}
