//! Run-boundary payloads

use crate::domain::value_objects::{DetectorIdentityChanged, ReloadOutcome};
use serde::{Deserialize, Serialize};

// ============================================================
// INCOMING
// ============================================================

/// Start of a new run in the incoming data stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunBoundary {
    pub run: u32,
    /// Detector identity recorded with the run, if any
    pub detector_name: Option<String>,
}

impl RunBoundary {
    pub fn new(run: u32, detector_name: impl Into<String>) -> Self {
        Self {
            run,
            detector_name: Some(detector_name.into()),
        }
    }

    /// Boundary without detector information.
    pub fn anonymous(run: u32) -> Self {
        Self {
            run,
            detector_name: None,
        }
    }
}

impl From<&RunBoundary> for DetectorIdentityChanged {
    fn from(boundary: &RunBoundary) -> Self {
        Self {
            detector_name: boundary.detector_name.clone(),
        }
    }
}

// ============================================================
// OUTGOING
// ============================================================

/// Result of handling one run boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunBoundaryResponse {
    pub run: u32,
    pub success: bool,
    pub outcome: Option<ReloadOutcome>,
    /// Detector active after the boundary
    pub detector_name: Option<String>,
    /// Error message (if failed)
    pub error: Option<String>,
}
