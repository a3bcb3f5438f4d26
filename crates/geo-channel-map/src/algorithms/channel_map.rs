//! Standard channel map
//!
//! Channels are numbered plane by plane in wire-ID order: each plane's
//! first channel is the number of channels in all planes before it. Forward
//! lookup goes through a cryostat → TPC → plane index; inverse lookup is a
//! binary search over the planes' first channels.

use crate::config::{ChannelRule, GeometryConfig};
use crate::domain::entities::GeometryData;
use crate::domain::errors::{GeometryError, MapBuildError};
use crate::domain::value_objects::WireFrame;
use crate::ports::inbound::ChannelMapAlg;
use geo_types::{ChannelId, PlaneId, SignalType, View, WireId};
use nalgebra::Point3;
use std::collections::BTreeSet;
use std::iter::FusedIterator;
use tracing::{debug, info};

/// Channel layout of one plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneLayout {
    pub id: PlaneId,
    pub wire_count: u32,
    pub first_channel: u32,
    pub channel_count: u32,
    /// Wire `w` reads out on channel offset `w % period`
    pub wrap_period: Option<u32>,
    pub view: View,
    pub signal_type: SignalType,
    pub frame: WireFrame,
}

impl PlaneLayout {
    /// Channel of wire `wire`, if the wire exists.
    pub fn channel_of(&self, wire: u32) -> Option<u32> {
        if wire >= self.wire_count {
            return None;
        }
        let offset = match self.wrap_period {
            Some(period) => wire % period,
            None => wire,
        };
        Some(self.first_channel + offset)
    }

    pub fn contains_channel(&self, channel: u32) -> bool {
        channel >= self.first_channel && channel - self.first_channel < self.channel_count
    }

    /// Wires read by `channel`, ascending. `channel` must belong to this plane.
    pub fn wires_of(&self, channel: u32) -> Vec<WireId> {
        let offset = channel - self.first_channel;
        match self.wrap_period {
            Some(period) => (offset..self.wire_count)
                .step_by(period as usize)
                .map(|w| self.id.wire(w))
                .collect(),
            None => vec![self.id.wire(offset)],
        }
    }
}

/// Iterator over every wire ID in canonical order.
#[derive(Debug, Clone)]
pub struct WireIdIter<'a> {
    planes: &'a [PlaneLayout],
    plane: usize,
    wire: u32,
}

impl<'a> WireIdIter<'a> {
    pub fn new(planes: &'a [PlaneLayout]) -> Self {
        Self {
            planes,
            plane: 0,
            wire: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.planes
            .iter()
            .skip(self.plane)
            .map(|p| p.wire_count as usize)
            .sum::<usize>()
            .saturating_sub(self.wire as usize)
    }
}

impl Iterator for WireIdIter<'_> {
    type Item = WireId;

    fn next(&mut self) -> Option<WireId> {
        while let Some(layout) = self.planes.get(self.plane) {
            if self.wire < layout.wire_count {
                let id = layout.id.wire(self.wire);
                self.wire += 1;
                return Some(id);
            }
            self.plane += 1;
            self.wire = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for WireIdIter<'_> {}

impl FusedIterator for WireIdIter<'_> {}

/// Tables built by `initialize`.
#[derive(Debug, Clone, PartialEq)]
struct ChannelTables {
    planes: Vec<PlaneLayout>,
    /// `index[cryostat][tpc][plane]` → position in `planes`
    index: Vec<Vec<Vec<usize>>>,
    channel_count: u32,
    plane_ids: BTreeSet<PlaneId>,
    views: BTreeSet<View>,
}

impl ChannelTables {
    fn layout(&self, plane: PlaneId) -> Option<&PlaneLayout> {
        let i = *self
            .index
            .get(plane.cryostat as usize)?
            .get(plane.tpc as usize)?
            .get(plane.plane as usize)?;
        self.planes.get(i)
    }

    fn layout_of_channel(&self, channel: ChannelId) -> Option<&PlaneLayout> {
        if !channel.is_valid() || channel.raw() >= self.channel_count {
            return None;
        }
        let i = self
            .planes
            .partition_point(|p| p.first_channel + p.channel_count <= channel.raw());
        self.planes.get(i).filter(|p| p.contains_channel(channel.raw()))
    }
}

/// Default channel map: one-to-one, or wrapped induction planes.
#[derive(Debug, Clone, Default)]
pub struct StandardChannelMap {
    rule: ChannelRule,
    max_channels: Option<u32>,
    tables: Option<ChannelTables>,
}

impl StandardChannelMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(rule: ChannelRule, max_channels: Option<u32>) -> Self {
        Self {
            rule,
            max_channels,
            tables: None,
        }
    }

    pub fn with_config(config: &GeometryConfig) -> Self {
        Self::with_rule(config.channel_rule, config.max_channels)
    }

    pub fn rule(&self) -> ChannelRule {
        self.rule
    }

    fn tables(&self) -> Result<&ChannelTables, GeometryError> {
        self.tables.as_ref().ok_or(GeometryError::NotReady)
    }

    fn wrap_period(&self, plane: PlaneId, signal_type: SignalType) -> Result<Option<u32>, MapBuildError> {
        match self.rule {
            ChannelRule::OneToOne => Ok(None),
            ChannelRule::WrappedInduction { .. } if signal_type == SignalType::Collection => Ok(None),
            ChannelRule::WrappedInduction { period: 0 } => {
                Err(MapBuildError::ZeroWrapPeriod { plane })
            }
            ChannelRule::WrappedInduction { period } => Ok(Some(period)),
        }
    }

    fn build_tables(&self, geometry: &GeometryData) -> Result<ChannelTables, MapBuildError> {
        // u32::MAX is the invalid channel, so the limit is exclusive of it
        let representable = u64::from(u32::MAX);
        let limit = self
            .max_channels
            .map_or(representable, |m| u64::from(m).min(representable));

        let mut planes = Vec::new();
        let mut index = Vec::with_capacity(geometry.cryostats.len());
        let mut next_channel: u64 = 0;

        for cryostat in &geometry.cryostats {
            let mut tpc_index = Vec::with_capacity(cryostat.tpcs.len());
            for tpc in &cryostat.tpcs {
                let mut plane_index = Vec::with_capacity(tpc.planes.len());
                for plane in &tpc.planes {
                    let wire_count = plane.wire_count();
                    let wrap_period = self.wrap_period(plane.id, plane.signal_type)?;
                    let channel_count = wrap_period.map_or(wire_count, |p| p.min(wire_count));

                    let needed = next_channel + u64::from(channel_count);
                    if needed > limit {
                        return Err(MapBuildError::ChannelSpaceExhausted { needed, limit });
                    }

                    plane_index.push(planes.len());
                    planes.push(PlaneLayout {
                        id: plane.id,
                        wire_count,
                        first_channel: next_channel as u32,
                        channel_count,
                        wrap_period,
                        view: plane.view,
                        signal_type: plane.signal_type,
                        frame: plane.frame,
                    });
                    next_channel = needed;
                }
                tpc_index.push(plane_index);
            }
            index.push(tpc_index);
        }

        Ok(ChannelTables {
            plane_ids: planes.iter().map(|p| p.id).collect(),
            views: planes.iter().map(|p| p.view).collect(),
            channel_count: next_channel as u32,
            planes,
            index,
        })
    }
}

impl ChannelMapAlg for StandardChannelMap {
    fn initialize(&mut self, geometry: &GeometryData) -> Result<(), GeometryError> {
        self.tables = None;
        let tables = self.build_tables(geometry)?;
        info!(
            detector = %geometry.detector_name,
            channels = tables.channel_count,
            planes = tables.planes.len(),
            rule = ?self.rule,
            "[geo] Channel map initialized"
        );
        self.tables = Some(tables);
        Ok(())
    }

    fn uninitialize(&mut self) {
        if self.tables.take().is_some() {
            debug!("[geo] Channel map uninitialized");
        }
    }

    fn is_ready(&self) -> bool {
        self.tables.is_some()
    }

    fn plane_layouts(&self) -> Result<&[PlaneLayout], GeometryError> {
        Ok(&self.tables()?.planes)
    }

    fn channel_count(&self) -> Result<u32, GeometryError> {
        Ok(self.tables()?.channel_count)
    }

    fn wire_to_channel(&self, wire: WireId) -> Result<ChannelId, GeometryError> {
        let tables = self.tables()?;
        Ok(tables
            .layout(wire.plane_id())
            .and_then(|layout| layout.channel_of(wire.wire))
            .map_or(ChannelId::INVALID, ChannelId::new))
    }

    fn channel_to_wires(&self, channel: ChannelId) -> Result<Vec<WireId>, GeometryError> {
        let tables = self.tables()?;
        Ok(tables
            .layout_of_channel(channel)
            .map(|layout| layout.wires_of(channel.raw()))
            .unwrap_or_default())
    }

    fn wire_coordinate(&self, position: &Point3<f64>, plane: PlaneId) -> Result<f64, GeometryError> {
        let tables = self.tables()?;
        // Unknown planes have no frame; NaN marks "no coordinate"
        Ok(tables
            .layout(plane)
            .map_or(f64::NAN, |layout| layout.frame.coordinate(position)))
    }

    fn nearest_wire_id(
        &self,
        position: &Point3<f64>,
        plane: PlaneId,
    ) -> Result<WireId, GeometryError> {
        let tables = self.tables()?;
        let Some(layout) = tables.layout(plane) else {
            return Ok(WireId::INVALID);
        };
        match layout.frame.nearest_wire(position) {
            Some(Ok(wire)) => Ok(plane.wire(wire)),
            Some(Err((wire, nearest_valid))) => Err(GeometryError::WireOutOfRange {
                plane,
                wire,
                nearest_valid,
            }),
            None => {
                debug!(%plane, ?position, "[geo] Non-finite position has no nearest wire");
                Ok(WireId::INVALID)
            }
        }
    }

    fn plane_ids(&self) -> Result<&BTreeSet<PlaneId>, GeometryError> {
        Ok(&self.tables()?.plane_ids)
    }

    fn views(&self) -> Result<&BTreeSet<View>, GeometryError> {
        Ok(&self.tables()?.views)
    }

    fn view(&self, channel: ChannelId) -> Result<View, GeometryError> {
        Ok(self
            .tables()?
            .layout_of_channel(channel)
            .map_or(View::Unknown, |layout| layout.view))
    }

    fn signal_type(&self, channel: ChannelId) -> Result<SignalType, GeometryError> {
        Ok(self
            .tables()?
            .layout_of_channel(channel)
            .map_or(SignalType::Unknown, |layout| layout.signal_type))
    }
}
