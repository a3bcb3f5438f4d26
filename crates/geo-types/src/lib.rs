//! # Geometry Types Crate
//!
//! Identifier value types for addressing detector elements and readout
//! channels.
//!
//! ## Design Principles
//!
//! - **Hierarchical IDs**: every ID embeds the IDs of its containers, so a
//!   `WireId` knows its plane, TPC and cryostat.
//! - **Canonical ordering**: the derived `Ord` is lexicographic over the
//!   fields from outermost to innermost; this is the order used for indexing.
//! - **Sentinels, not panics**: each ID type has an `INVALID` value that
//!   queries return for malformed or out-of-range input.

pub mod channel;
pub mod ids;
pub mod views;

pub use channel::{ChannelId, OpChannel, OpDetIndex};
pub use ids::{CryostatId, PlaneId, TpcId, WireId, INVALID_INDEX};
pub use views::{DriftDirection, SignalType, View};
