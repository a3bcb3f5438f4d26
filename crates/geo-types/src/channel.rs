//! # Readout Channels
//!
//! A channel is one readout electronics line. Several wires may share a
//! channel; one channel may therefore map back to many wires.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of an optical detector across the whole detector.
pub type OpDetIndex = u32;

/// Optical readout channel number.
pub type OpChannel = u32;

/// Identifier of a TPC readout channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChannelId(pub u32);

impl ChannelId {
    /// Sentinel returned for wires that resolve to no channel.
    pub const INVALID: Self = Self(u32::MAX);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Raw channel number.
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Channel number usable as a table index.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Default for ChannelId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<u32> for ChannelId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "invalid")
        }
    }
}
