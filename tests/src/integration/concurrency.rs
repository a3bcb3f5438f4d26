//! # Concurrent Readers
//!
//! Readers never observe a half-built state: every snapshot they take is
//! internally consistent, whatever reloads run at the same time.

#[cfg(test)]
mod tests {
    use crate::fixtures::{config_for, reference_detector, source_with};
    use geo_channel_map::{
        ChannelMapAlg, DetectorIdentityChanged, GeometryApi, GeometryProvider,
        InMemoryGeometrySource, ReloadOutcome, SyntheticDetector,
    };
    use geo_types::{ChannelId, WireId};
    use parking_lot::Mutex;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    const RELOADS: u64 = 20;

    fn source() -> Arc<InMemoryGeometrySource> {
        source_with([
            ("bo", reference_detector()),
            (
                "lariat",
                SyntheticDetector::new()
                    .with_tpcs_per_cryostat(2)
                    .with_wires_per_plane(20),
            ),
        ])
    }

    fn expected_channels(detector: &str) -> u32 {
        match detector {
            "bo" => 60,
            "lariat" => 120,
            other => panic!("unexpected detector {}", other),
        }
    }

    #[test]
    fn test_readers_see_consistent_snapshots_during_reloads() {
        let provider = Arc::new(GeometryProvider::start(config_for("bo"), source()).unwrap());
        let done = AtomicBool::new(false);
        let seen = Mutex::new(BTreeSet::new());

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let mut observed = 0usize;
                    while !done.load(Ordering::Acquire) || observed == 0 {
                        let loaded = provider.current().unwrap();
                        let map = loaded.channel_map.as_ref().unwrap();
                        let geometry = loaded.geometry.as_ref().unwrap();

                        let channels = map.channel_count().unwrap();
                        assert_eq!(channels, expected_channels(loaded.detector_name()));
                        assert_eq!(channels as usize, geometry.n_wires());

                        let last = map.channel_to_wires(ChannelId::new(channels - 1)).unwrap();
                        assert_eq!(last.len(), 1);
                        assert_eq!(map.wire_to_channel(last[0]).unwrap().raw(), channels - 1);
                        seen.lock().insert((loaded.generation, loaded.detector_name().to_string()));
                        observed += 1;
                    }
                });
            }

            scope.spawn(|| {
                for i in 0..RELOADS {
                    let name = if i % 2 == 0 { "lariat" } else { "bo" };
                    let outcome = provider.notify(DetectorIdentityChanged::new(name)).unwrap();
                    assert_eq!(outcome, ReloadOutcome::Reloaded { generation: i + 2 });
                }
                done.store(true, Ordering::Release);
            });
        });

        assert_eq!(provider.generation(), RELOADS + 1);
        assert_eq!(provider.detector_name().as_deref(), Some("bo"));

        // Generation and detector always travel together: odd generations
        // are "bo", even ones "lariat"
        let seen = seen.into_inner();
        assert!(!seen.is_empty());
        for (generation, detector) in seen {
            let expected = if generation % 2 == 1 { "bo" } else { "lariat" };
            assert_eq!(detector, expected, "generation {}", generation);
        }
    }

    #[test]
    fn test_handles_survive_concurrent_reloads() {
        let provider = Arc::new(GeometryProvider::start(config_for("bo"), source()).unwrap());
        let held = provider.channel_map().unwrap();
        let wire = WireId::new(0, 0, 2, 9);

        thread::scope(|scope| {
            scope.spawn(|| {
                for name in ["lariat", "bo", "lariat"] {
                    provider.notify(DetectorIdentityChanged::new(name)).unwrap();
                }
            });
            scope.spawn(|| {
                for _ in 0..1_000 {
                    assert_eq!(held.wire_to_channel(wire).unwrap(), ChannelId::new(29));
                }
            });
        });

        assert!(!held.is_current());
        assert_eq!(held.generation(), 1);
        assert_eq!(held.channel_count().unwrap(), 60);
    }

    #[test]
    fn test_parallel_loads_are_serialized() {
        let provider = Arc::new(GeometryProvider::start(config_for("bo"), source()).unwrap());
        let description = provider.config().initial_description();

        let mut generations: Vec<u64> = thread::scope(|scope| {
            let workers: Vec<_> = (0..4)
                .map(|_| {
                    let description = description.clone();
                    let provider = &provider;
                    scope.spawn(move || {
                        (0..5)
                            .map(|_| provider.load_geometry(description.clone()).unwrap().generation)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            workers
                .into_iter()
                .flat_map(|w| w.join().unwrap())
                .collect()
        });

        generations.sort_unstable();
        assert_eq!(generations, (2..=21).collect::<Vec<_>>());
        assert_eq!(provider.generation(), 21);
    }
}
