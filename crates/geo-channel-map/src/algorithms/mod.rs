//! Algorithms for the channel map engine

pub mod channel_map;
pub mod geometry_builder;
pub mod sorter;
pub mod wire_geometry;

pub use channel_map::{PlaneLayout, StandardChannelMap, WireIdIter};
pub use geometry_builder::{build_geometry, drift_direction};
pub use sorter::{tie_break, ObjectSorter, StandardSorter};
pub use wire_geometry::{plane_center, wire_frame};
