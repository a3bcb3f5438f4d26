//! # Determinism
//!
//! The sorted geometry and the channel tables depend only on element
//! positions, never on the order in which siblings appear in the
//! description.

#[cfg(test)]
mod tests {
    use crate::fixtures::build_map;
    use geo_channel_map::domain::invariants::{invariant_ids_match_positions, invariant_same_tables};
    use geo_channel_map::{
        build_geometry, AxisOrder, ChannelMapAlg, ChannelRule, GeometryApi, GeometryConfig,
        GeometryProvider, InMemoryGeometrySource, SortAxis, SortingParameters, StandardSorter,
        SyntheticDetector,
    };
    use std::sync::Arc;

    fn detector() -> SyntheticDetector {
        SyntheticDetector::new()
            .with_cryostats(2)
            .with_tpcs_per_cryostat(2)
            .with_planes_per_tpc(3)
            .with_wires_per_plane(7)
            .with_op_dets_per_cryostat(3)
    }

    #[test]
    fn test_shuffled_siblings_sort_identically() {
        let (ordered_geometry, ordered_map) = build_map(&detector(), ChannelRule::OneToOne).unwrap();
        assert!(invariant_ids_match_positions(&ordered_geometry));

        for seed in 0..8 {
            let shuffled = detector().with_shuffle_seed(seed);
            let (geometry, map) = build_map(&shuffled, ChannelRule::OneToOne).unwrap();

            assert_eq!(geometry, ordered_geometry, "seed {}", seed);
            assert!(invariant_same_tables(&map, &ordered_map), "seed {}", seed);
        }
    }

    #[test]
    fn test_shuffled_siblings_wrapped_rule() {
        let rule = ChannelRule::WrappedInduction { period: 3 };
        let (_, ordered) = build_map(&detector(), rule).unwrap();
        let (_, shuffled) = build_map(&detector().with_shuffle_seed(42), rule).unwrap();

        assert!(invariant_same_tables(&shuffled, &ordered));
        assert_eq!(ordered.channel_count().unwrap(), shuffled.channel_count().unwrap());
    }

    #[test]
    fn test_repeated_builds_are_identical() {
        let (first_geometry, first) = build_map(&detector(), ChannelRule::OneToOne).unwrap();
        let (second_geometry, second) = build_map(&detector(), ChannelRule::OneToOne).unwrap();

        assert_eq!(first_geometry, second_geometry);
        assert!(invariant_same_tables(&first, &second));
        assert_eq!(first.channel_count().unwrap(), 2 * 2 * 3 * 7);
    }

    #[test]
    fn test_optical_detectors_numbered_globally() {
        let (ordered, _) = build_map(&detector(), ChannelRule::OneToOne).unwrap();
        let (shuffled, _) = build_map(&detector().with_shuffle_seed(7), ChannelRule::OneToOne).unwrap();

        let indices: Vec<u32> = ordered.op_dets().map(|d| d.index).collect();
        assert_eq!(indices, (0..6).collect::<Vec<_>>());
        let names = |g: &geo_channel_map::GeometryData| {
            g.op_dets().map(|d| d.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&ordered), names(&shuffled));
    }

    #[test]
    fn test_descending_wire_order_reverses_planes() {
        let hierarchy = detector().hierarchy("lartpcdetector");
        let ascending = build_geometry(&hierarchy, &StandardSorter::new()).unwrap();
        let descending = build_geometry(
            &hierarchy,
            &StandardSorter::with_params(SortingParameters {
                wires: AxisOrder {
                    axis: SortAxis::Z,
                    descending: true,
                },
                ..Default::default()
            }),
        )
        .unwrap();

        for (asc, desc) in ascending.planes().zip(descending.planes()) {
            assert_eq!(asc.id, desc.id);
            let last = asc.wires.len() - 1;
            assert_eq!(asc.wires[0].center, desc.wires[last].center);
            assert_eq!(asc.wires[last].center, desc.wires[0].center);
        }
    }

    #[test]
    fn test_provider_reload_of_same_description_is_identical() {
        let source = Arc::new(
            InMemoryGeometrySource::new()
                .with_file("argoneut.json", detector().hierarchy("argoneut"))
                .with_file("icarus.json", detector().with_shuffle_seed(3).hierarchy("icarus")),
        );
        let config = GeometryConfig {
            detector_name: "argoneut".into(),
            ..Default::default()
        };
        let provider = GeometryProvider::start(config, source).unwrap();
        let first = provider.channel_map().unwrap();

        provider
            .notify(geo_channel_map::DetectorIdentityChanged::new("icarus"))
            .unwrap();
        let second = provider.channel_map().unwrap();

        assert!(!first.is_current());
        assert!(invariant_same_tables(&*first, &*second));
    }
}
