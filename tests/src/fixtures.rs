//! Shared builders for detectors, sources and providers.

use geo_channel_map::{
    build_geometry, ChannelMapAlg, ChannelRule, GeometryConfig, GeometryData, GeometryError,
    GeometryProvider, InMemoryGeometrySource, StandardChannelMap, StandardSorter,
    SyntheticDetector,
};
use std::sync::Arc;

/// One cryostat, two TPCs, three planes of ten wires: 60 channels.
pub fn reference_detector() -> SyntheticDetector {
    SyntheticDetector::new()
        .with_tpcs_per_cryostat(2)
        .with_planes_per_tpc(3)
        .with_wires_per_plane(10)
}

/// In-memory source holding `<name>.json` for every `(name, detector)`.
pub fn source_with<'a>(
    detectors: impl IntoIterator<Item = (&'a str, SyntheticDetector)>,
) -> Arc<InMemoryGeometrySource> {
    let source = InMemoryGeometrySource::new();
    for (name, detector) in detectors {
        source.insert(format!("{}.json", name), detector.hierarchy(name));
    }
    Arc::new(source)
}

pub fn config_for(detector: &str) -> GeometryConfig {
    GeometryConfig {
        detector_name: detector.to_string(),
        ..Default::default()
    }
}

/// Provider started on `detector`, whose description must be in `source`.
pub fn started_provider(
    detector: &str,
    source: Arc<InMemoryGeometrySource>,
) -> Result<GeometryProvider, GeometryError> {
    GeometryProvider::start(config_for(detector), source)
}

/// Sort `detector` and build a channel map with `rule`, bypassing the provider.
pub fn build_map(
    detector: &SyntheticDetector,
    rule: ChannelRule,
) -> Result<(GeometryData, StandardChannelMap), GeometryError> {
    let geometry = build_geometry(&detector.hierarchy("lartpcdetector"), &StandardSorter::new())?;
    let mut map = StandardChannelMap::with_rule(rule, None);
    map.initialize(&geometry)?;
    Ok((geometry, map))
}
