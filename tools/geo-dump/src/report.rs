//! Text reports over a published geometry.

use geo_channel_map::domain::invariants::{invariant_dense_channels, invariant_round_trip};
use geo_channel_map::{ChannelMapAlg, GeometryError, LoadedGeometry};
use geo_types::ChannelId;
use std::fmt::Write;
use tracing::{error, warn};

/// One-paragraph summary of the detector.
pub fn summary(loaded: &LoadedGeometry) -> Result<String, GeometryError> {
    let mut out = String::new();
    let name = loaded.detector_name();
    let _ = writeln!(out, "Detector '{}' (generation {})", name, loaded.generation);
    let _ = writeln!(out, "  description: {}", loaded.description.file);
    let _ = writeln!(out, "  simulation:  {}", loaded.simulation_file);

    let Some(geometry) = loaded.geometry.as_ref() else {
        let _ = writeln!(out, "  no channel map selected");
        return Ok(out);
    };
    let _ = writeln!(
        out,
        "  {} cryostats, {} TPCs, {} planes, {} wires, {} optical detectors",
        geometry.cryostats.len(),
        geometry.n_tpcs(),
        geometry.n_planes(),
        geometry.n_wires(),
        geometry.n_op_dets()
    );

    if let Some(map) = loaded.channel_map.as_ref() {
        let views: Vec<String> = map.views()?.iter().map(|v| v.to_string()).collect();
        let _ = writeln!(
            out,
            "  {} channels, views [{}], {} optical channels",
            map.channel_count()?,
            views.join(" "),
            map.op_channel_count(geometry.n_op_dets())
        );
    }
    for tpc in geometry.tpcs() {
        let _ = writeln!(out, "  {} drift {:?}", tpc.id, tpc.drift);
        for plane in &tpc.planes {
            let _ = writeln!(
                out,
                "    {} view {} {:?}: {} wires, pitch {:.4}",
                plane.id,
                plane.view,
                plane.signal_type,
                plane.wire_count(),
                plane.pitch()
            );
        }
    }
    Ok(out)
}

/// Channel → wires listing for channels `first..=last`. `last` defaults to
/// the detector's last channel; channels past it are listed with no wires.
pub fn channel_to_wires(
    map: &dyn ChannelMapAlg,
    detector: &str,
    first: Option<u32>,
    last: Option<u32>,
) -> Result<String, GeometryError> {
    let count = map.channel_count()?;
    let mut out = String::new();
    if count == 0 {
        error!(detector, "[geo] Detector has no channels, nothing to report");
        return Ok(out);
    }

    let first = first.unwrap_or(0);
    let last = last.unwrap_or(count - 1);
    if first > last {
        warn!(first, last, "[geo] Empty channel range, nothing to list");
        let _ = writeln!(
            out,
            "Detector {} has {} channels; no channels in range {} to {}",
            detector, count, first, last
        );
        return Ok(out);
    }
    let _ = writeln!(
        out,
        "Detector {} has {} channels; listing channels {} to {}:",
        detector, count, first, last
    );

    for channel in first..=last {
        let wires = map.channel_to_wires(ChannelId::new(channel))?;
        let _ = write!(out, " {} ->", channel);
        match wires.len() {
            0 => {
                let _ = write!(out, " no wires");
            }
            1 => {}
            n => {
                let _ = write!(out, " [{} wires]", n);
            }
        }
        for wire in &wires {
            let _ = write!(out, " {{ {} }};", wire);
        }
        let _ = writeln!(out);
    }
    Ok(out)
}

/// Wire → channel listing, one plane at a time.
pub fn wire_to_channel(map: &dyn ChannelMapAlg, detector: &str) -> Result<String, GeometryError> {
    let mut out = String::new();
    let _ = writeln!(out, "Detector {} wire to channel map:", detector);
    for layout in map.plane_layouts()? {
        let _ = writeln!(out, "{} [{} wires]:", layout.id, layout.wire_count);
        for wire in 0..layout.wire_count {
            let id = layout.id.wire(wire);
            let _ = writeln!(out, " {{ {} }} -> {}", id, map.wire_to_channel(id)?);
        }
    }
    Ok(out)
}

/// Outcome of the channel map self-checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub round_trip: bool,
    pub dense: bool,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.round_trip && self.dense
    }
}

pub fn verify(map: &dyn ChannelMapAlg) -> Verification {
    Verification {
        round_trip: invariant_round_trip(map),
        dense: invariant_dense_channels(map),
    }
}
