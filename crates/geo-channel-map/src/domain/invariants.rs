//! Domain invariants for the channel map
//!
//! Checks over a built map; used by tests and the dump tool's `--verify`.

use super::entities::GeometryData;
use crate::ports::inbound::ChannelMapAlg;
use geo_types::ChannelId;

/// Every wire maps to a valid channel, and that channel maps back to a wire
/// list containing the wire.
pub fn invariant_round_trip<M: ChannelMapAlg + ?Sized>(map: &M) -> bool {
    let Ok(wires) = map.wire_ids() else {
        return false;
    };
    for wire in wires {
        let Ok(channel) = map.wire_to_channel(wire) else {
            return false;
        };
        if !channel.is_valid() {
            return false;
        }
        match map.channel_to_wires(channel) {
            Ok(list) if list.contains(&wire) => {}
            _ => return false,
        }
    }
    true
}

/// Channels are exactly `0..channel_count`: every channel reads at least one
/// wire and `channel_count` itself reads none.
pub fn invariant_dense_channels<M: ChannelMapAlg + ?Sized>(map: &M) -> bool {
    let Ok(count) = map.channel_count() else {
        return false;
    };
    let populated = (0..count).all(|c| {
        map.channel_to_wires(ChannelId::new(c))
            .map_or(false, |wires| !wires.is_empty())
    });
    let beyond_empty = map
        .channel_to_wires(ChannelId::new(count))
        .map_or(false, |wires| wires.is_empty());
    populated && beyond_empty
}

/// Two maps produce identical tables.
pub fn invariant_same_tables<A, B>(a: &A, b: &B) -> bool
where
    A: ChannelMapAlg + ?Sized,
    B: ChannelMapAlg + ?Sized,
{
    match (a.plane_layouts(), b.plane_layouts()) {
        (Ok(la), Ok(lb)) => la == lb && a.channel_count().ok() == b.channel_count().ok(),
        _ => false,
    }
}

/// Every element ID equals its position in its parent.
pub fn invariant_ids_match_positions(geometry: &GeometryData) -> bool {
    geometry.cryostats.iter().enumerate().all(|(c, cryostat)| {
        cryostat.id.cryostat as usize == c
            && cryostat.tpcs.iter().enumerate().all(|(t, tpc)| {
                tpc.id == cryostat.id.tpc(t as u32)
                    && tpc.planes.iter().enumerate().all(|(p, plane)| {
                        plane.id == tpc.id.plane(p as u32)
                            && plane
                                .wires
                                .iter()
                                .enumerate()
                                .all(|(w, wire)| wire.id == plane.id.wire(w as u32))
                    })
            })
    })
}
