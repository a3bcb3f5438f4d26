//! Detector selector
//!
//! Maps a detector identity to a channel map variant by case-insensitive
//! substring match, then builds the sorted geometry and the channel map.

use crate::algorithms::{build_geometry, StandardChannelMap, StandardSorter};
use crate::config::GeometryConfig;
use crate::domain::entities::GeometryHierarchy;
use crate::domain::errors::GeometryError;
use crate::ports::inbound::ChannelMapAlg;
use crate::ports::outbound::{ChannelMapSelection, ExperimentHelper};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Identity fragments served by the standard channel map.
pub const STANDARD_DETECTORS: &[&str] = &[
    "argoneut",
    "microboone",
    "bo",
    "jp250l",
    "csu40l",
    "lariat",
    "icarus",
    "lartpcdetector",
];

/// Channel map implementations known to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelMapVariant {
    /// Standard sorter and standard channel map
    Standard,
}

impl ChannelMapVariant {
    pub fn name(&self) -> &'static str {
        match self {
            ChannelMapVariant::Standard => "standard",
        }
    }

    /// Sort `hierarchy` and build this variant's channel map.
    pub fn build(
        &self,
        config: &GeometryConfig,
        hierarchy: &GeometryHierarchy,
    ) -> Result<ChannelMapSelection, GeometryError> {
        match self {
            ChannelMapVariant::Standard => {
                let sorter = StandardSorter::with_params(config.sorting.clone());
                let geometry = build_geometry(hierarchy, &sorter)?;
                let mut map = StandardChannelMap::with_config(config);
                map.initialize(&geometry)?;
                Ok(ChannelMapSelection {
                    variant: self.name().to_string(),
                    geometry: Arc::new(geometry),
                    channel_map: Arc::new(map),
                })
            }
        }
    }
}

impl fmt::Display for ChannelMapVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selector over a registry of `(identity fragment, variant)` entries.
/// Entries are tried in order; the first fragment contained in the
/// lowercased identity wins.
#[derive(Debug, Clone)]
pub struct StandardGeometryHelper {
    registry: Vec<(String, ChannelMapVariant)>,
}

impl StandardGeometryHelper {
    pub fn new() -> Self {
        Self::with_registry(
            STANDARD_DETECTORS
                .iter()
                .map(|name| (name.to_string(), ChannelMapVariant::Standard)),
        )
    }

    pub fn with_registry(entries: impl IntoIterator<Item = (String, ChannelMapVariant)>) -> Self {
        Self {
            registry: entries
                .into_iter()
                .map(|(fragment, variant)| (fragment.to_lowercase(), variant))
                .collect(),
        }
    }

    /// Variant serving `identity`, if any.
    pub fn select(&self, identity: &str) -> Option<ChannelMapVariant> {
        let identity = identity.to_lowercase();
        self.registry
            .iter()
            .find(|(fragment, _)| identity.contains(fragment.as_str()))
            .map(|(_, variant)| *variant)
    }
}

impl Default for StandardGeometryHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentHelper for StandardGeometryHelper {
    fn configure(
        &self,
        identity: &str,
        config: &GeometryConfig,
        hierarchy: &GeometryHierarchy,
    ) -> Result<Option<ChannelMapSelection>, GeometryError> {
        let Some(variant) = self.select(identity) else {
            debug!(detector = identity, "[geo] No channel map registered for detector");
            return Ok(None);
        };

        let selection = variant.build(config, hierarchy)?;
        info!(
            detector = identity,
            variant = %variant,
            channels = selection.channel_map.channel_count()?,
            "[geo] Channel map selected"
        );
        Ok(Some(selection))
    }
}
