//! # Element Identifiers
//!
//! `CryostatId` ⊂ `TpcId` ⊂ `PlaneId` ⊂ `WireId`: each level adds one index
//! to its parent. Indices are the positions assigned by the canonical sorter,
//! not the order in which elements appear in the description file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index value marking an invalid ID field.
pub const INVALID_INDEX: u32 = u32::MAX;

/// Identifies one cryostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CryostatId {
    pub cryostat: u32,
}

/// Identifies one TPC within a cryostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TpcId {
    pub cryostat: u32,
    pub tpc: u32,
}

/// Identifies one wire plane within a TPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaneId {
    pub cryostat: u32,
    pub tpc: u32,
    pub plane: u32,
}

/// Identifies one sense wire.
///
/// Field order matters: the derived ordering is the canonical wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireId {
    pub cryostat: u32,
    pub tpc: u32,
    pub plane: u32,
    pub wire: u32,
}

impl CryostatId {
    pub const INVALID: Self = Self {
        cryostat: INVALID_INDEX,
    };

    pub const fn new(cryostat: u32) -> Self {
        Self { cryostat }
    }

    pub const fn is_valid(&self) -> bool {
        self.cryostat != INVALID_INDEX
    }

    /// ID of the TPC with the given index in this cryostat.
    pub const fn tpc(&self, tpc: u32) -> TpcId {
        TpcId::new(self.cryostat, tpc)
    }
}

impl TpcId {
    pub const INVALID: Self = Self {
        cryostat: INVALID_INDEX,
        tpc: INVALID_INDEX,
    };

    pub const fn new(cryostat: u32, tpc: u32) -> Self {
        Self { cryostat, tpc }
    }

    pub const fn is_valid(&self) -> bool {
        self.cryostat != INVALID_INDEX && self.tpc != INVALID_INDEX
    }

    pub const fn cryostat_id(&self) -> CryostatId {
        CryostatId::new(self.cryostat)
    }

    pub const fn plane(&self, plane: u32) -> PlaneId {
        PlaneId::new(self.cryostat, self.tpc, plane)
    }
}

impl PlaneId {
    pub const INVALID: Self = Self {
        cryostat: INVALID_INDEX,
        tpc: INVALID_INDEX,
        plane: INVALID_INDEX,
    };

    pub const fn new(cryostat: u32, tpc: u32, plane: u32) -> Self {
        Self {
            cryostat,
            tpc,
            plane,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.cryostat != INVALID_INDEX && self.tpc != INVALID_INDEX && self.plane != INVALID_INDEX
    }

    pub const fn tpc_id(&self) -> TpcId {
        TpcId::new(self.cryostat, self.tpc)
    }

    pub const fn cryostat_id(&self) -> CryostatId {
        CryostatId::new(self.cryostat)
    }

    pub const fn wire(&self, wire: u32) -> WireId {
        WireId::new(self.cryostat, self.tpc, self.plane, wire)
    }
}

impl WireId {
    pub const INVALID: Self = Self {
        cryostat: INVALID_INDEX,
        tpc: INVALID_INDEX,
        plane: INVALID_INDEX,
        wire: INVALID_INDEX,
    };

    pub const fn new(cryostat: u32, tpc: u32, plane: u32, wire: u32) -> Self {
        Self {
            cryostat,
            tpc,
            plane,
            wire,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.plane_id().is_valid() && self.wire != INVALID_INDEX
    }

    pub const fn plane_id(&self) -> PlaneId {
        PlaneId::new(self.cryostat, self.tpc, self.plane)
    }

    pub const fn tpc_id(&self) -> TpcId {
        TpcId::new(self.cryostat, self.tpc)
    }
}

impl From<PlaneId> for TpcId {
    fn from(id: PlaneId) -> Self {
        id.tpc_id()
    }
}

impl From<WireId> for PlaneId {
    fn from(id: WireId) -> Self {
        id.plane_id()
    }
}

impl fmt::Display for CryostatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C:{}", self.cryostat)
    }
}

impl fmt::Display for TpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C:{} T:{}", self.cryostat, self.tpc)
    }
}

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C:{} T:{} P:{}", self.cryostat, self.tpc, self.plane)
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C:{} T:{} P:{} W:{}",
            self.cryostat, self.tpc, self.plane, self.wire
        )
    }
}
