//! # End-to-End Channel Mapping
//!
//! Reference detector: 1 cryostat × 2 TPCs × 3 planes × 10 wires.
//!
//! 1. Provider loads `lartpcdetector.json` and selects the standard map
//! 2. Channels are dense: 60 channels, one per wire
//! 3. Wire ↔ channel lookups agree in both directions
//! 4. Out-of-range queries resolve to sentinels, never panics

#[cfg(test)]
mod tests {
    use crate::fixtures::{reference_detector, source_with, started_provider};
    use geo_channel_map::domain::invariants::{
        invariant_dense_channels, invariant_ids_match_positions, invariant_round_trip,
    };
    use geo_channel_map::{
        ChannelMapAlg, DriftDirection, GeometryApi, GeometryError, GeometryProvider,
    };
    use geo_types::{ChannelId, PlaneId, SignalType, TpcId, View, WireId};
    use std::collections::HashSet;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn provider() -> GeometryProvider {
        started_provider(
            "lartpcdetector",
            source_with([("lartpcdetector", reference_detector())]),
        )
        .unwrap()
    }

    // =============================================================================
    // FORWARD AND INVERSE LOOKUPS
    // =============================================================================

    #[test]
    fn test_reference_detector_channel_count() {
        let provider = provider();
        let map = provider.channel_map().unwrap();

        assert_eq!(map.channel_count().unwrap(), 60);
        assert_eq!(map.plane_ids().unwrap().len(), 6);
    }

    #[test]
    fn test_wire_channel_round_trip() {
        let provider = provider();
        let map = provider.channel_map().unwrap();
        let wire = WireId::new(0, 0, 0, 5);

        let channel = map.wire_to_channel(wire).unwrap();
        assert!(channel.is_valid());
        assert!(map.channel_to_wires(channel).unwrap().contains(&wire));
    }

    #[test]
    fn test_channel_layout_follows_canonical_order() {
        let provider = provider();
        let map = provider.channel_map().unwrap();

        assert_eq!(map.wire_to_channel(WireId::new(0, 0, 0, 0)).unwrap(), ChannelId::new(0));
        assert_eq!(map.wire_to_channel(WireId::new(0, 0, 2, 9)).unwrap(), ChannelId::new(29));
        assert_eq!(map.wire_to_channel(WireId::new(0, 1, 0, 0)).unwrap(), ChannelId::new(30));
        assert_eq!(map.wire_to_channel(WireId::new(0, 1, 2, 9)).unwrap(), ChannelId::new(59));
    }

    #[test]
    fn test_every_wire_round_trips() {
        let provider = provider();
        let map = provider.channel_map().unwrap();

        assert!(invariant_round_trip(&*map));
        for wire in map.wire_ids().unwrap() {
            let channel = map.wire_to_channel(wire).unwrap();
            assert_eq!(map.channel_to_wires(channel).unwrap(), vec![wire]);
        }
    }

    #[test]
    fn test_channels_are_dense() {
        let provider = provider();
        let map = provider.channel_map().unwrap();

        assert!(invariant_dense_channels(&*map));
        for channel in 0..60 {
            assert!(!map.channel_to_wires(ChannelId::new(channel)).unwrap().is_empty());
        }
    }

    // =============================================================================
    // OUT-OF-RANGE QUERIES
    // =============================================================================

    #[test]
    fn test_out_of_range_ids_yield_sentinels() {
        let provider = provider();
        let map = provider.channel_map().unwrap();

        assert_eq!(
            map.wire_to_channel(WireId::new(0, 0, 0, 10)).unwrap(),
            ChannelId::INVALID
        );
        assert_eq!(
            map.wire_to_channel(WireId::new(3, 0, 0, 0)).unwrap(),
            ChannelId::INVALID
        );
        assert_eq!(map.wire_to_channel(WireId::INVALID).unwrap(), ChannelId::INVALID);
        assert!(map.channel_to_wires(ChannelId::new(60)).unwrap().is_empty());
        assert!(map.channel_to_wires(ChannelId::INVALID).unwrap().is_empty());
        assert_eq!(map.view(ChannelId::new(60)).unwrap(), View::Unknown);
        assert_eq!(map.signal_type(ChannelId::new(60)).unwrap(), SignalType::Unknown);
    }

    // =============================================================================
    // ITERATION
    // =============================================================================

    #[test]
    fn test_wire_iteration_is_complete_and_restartable() {
        let provider = provider();
        let map = provider.channel_map().unwrap();

        let iter = map.wire_ids().unwrap();
        assert_eq!(iter.len(), 60);
        let first: Vec<WireId> = iter.clone().collect();
        let second: Vec<WireId> = iter.collect();

        assert_eq!(first, second);
        assert_eq!(first.iter().collect::<HashSet<_>>().len(), 60);
        assert!(first.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_iteration_resumes_from_saved_position() {
        let provider = provider();
        let map = provider.channel_map().unwrap();

        let mut iter = map.wire_ids().unwrap();
        let head: Vec<WireId> = iter.by_ref().take(25).collect();
        let saved = iter.clone();
        let rest: Vec<WireId> = iter.collect();

        assert_eq!(head.len() + rest.len(), 60);
        assert_eq!(saved.collect::<Vec<_>>(), rest);
        assert_eq!(rest[0], WireId::new(0, 0, 2, 5));
    }

    // =============================================================================
    // GEOMETRY QUERIES
    // =============================================================================

    #[test]
    fn test_nearest_wire_at_wire_centers() {
        let provider = provider();
        let loaded = provider.current().unwrap();
        let geometry = loaded.geometry.as_ref().unwrap();
        let map = provider.channel_map().unwrap();

        assert!(invariant_ids_match_positions(geometry));
        for plane in geometry.planes() {
            for wire in &plane.wires {
                assert_eq!(map.nearest_wire_id(&wire.center, plane.id).unwrap(), wire.id);
                assert_eq!(
                    map.nearest_channel(&wire.center, plane.id).unwrap(),
                    map.wire_to_channel(wire.id).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_nearest_wire_beyond_plane_edge() {
        let provider = provider();
        let loaded = provider.current().unwrap();
        let geometry = loaded.geometry.as_ref().unwrap();
        let map = provider.channel_map().unwrap();

        let plane_id = PlaneId::new(0, 0, 1);
        let frame = &geometry.plane(plane_id).unwrap().frame;
        let far = frame.origin + frame.increasing * frame.pitch * 100.0;

        match map.nearest_wire_id(&far, plane_id) {
            Err(err @ GeometryError::WireOutOfRange { .. }) => {
                assert_eq!(err.nearest_valid_wire(), Some(plane_id.wire(9)));
            }
            other => panic!("expected WireOutOfRange, got {:?}", other),
        }
        assert_eq!(
            map.nearest_channel(&far, plane_id).unwrap(),
            map.wire_to_channel(plane_id.wire(9)).unwrap()
        );
    }

    #[test]
    fn test_unknown_plane_has_no_coordinate() {
        let provider = provider();
        let map = provider.channel_map().unwrap();
        let origin = nalgebra::Point3::origin();

        assert!(map.wire_coordinate(&origin, PlaneId::new(0, 5, 0)).unwrap().is_nan());
        assert_eq!(
            map.nearest_wire_id(&origin, PlaneId::new(0, 5, 0)).unwrap(),
            WireId::INVALID
        );
    }

    #[test]
    fn test_nan_position_has_no_nearest_wire() {
        let provider = provider();
        let map = provider.channel_map().unwrap();
        let nowhere = nalgebra::Point3::new(f64::NAN, 0.0, 0.0);

        for plane in [PlaneId::new(0, 0, 0), PlaneId::new(0, 1, 2)] {
            assert_eq!(map.nearest_wire_id(&nowhere, plane).unwrap(), WireId::INVALID);
            assert_eq!(map.nearest_channel(&nowhere, plane).unwrap(), ChannelId::INVALID);
        }
    }

    #[test]
    fn test_views_signal_types_and_drift() {
        let provider = provider();
        let map = provider.channel_map().unwrap();
        let loaded = provider.current().unwrap();
        let geometry = loaded.geometry.as_ref().unwrap();

        let views: Vec<View> = map.views().unwrap().iter().copied().collect();
        assert_eq!(views, vec![View::U, View::V, View::Z]);
        assert_eq!(map.view(ChannelId::new(0)).unwrap(), View::U);
        assert_eq!(map.view(ChannelId::new(15)).unwrap(), View::V);
        assert_eq!(map.signal_type(ChannelId::new(15)).unwrap(), SignalType::Induction);
        assert_eq!(map.signal_type(ChannelId::new(25)).unwrap(), SignalType::Collection);

        assert_eq!(geometry.tpc(TpcId::new(0, 0)).unwrap().drift, DriftDirection::NegX);
        assert_eq!(geometry.tpc(TpcId::new(0, 1)).unwrap().drift, DriftDirection::PosX);
    }
}
