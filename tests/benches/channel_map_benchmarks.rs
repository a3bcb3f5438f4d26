//! # Channel Map Benchmarks
//!
//! Hot query paths of the channel map:
//!
//! | Query | Lookup | Target |
//! |-------|--------|--------|
//! | `wire_to_channel` | cryostat → TPC → plane index | O(1) |
//! | `channel_to_wires` | binary search over plane first channels | O(log planes) |
//! | `nearest_wire_id` | projection on the plane frame | O(1) |
//! | geometry build | sort + table build | O(n log n) |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geo_channel_map::{
    build_geometry, ChannelMapAlg, ChannelRule, GeometryData, StandardChannelMap, StandardSorter,
    SyntheticDetector,
};
use geo_types::ChannelId;
use nalgebra::Point3;
use rand::Rng;
use std::time::Duration;

/// Detector shapes `(cryostats, tpcs, planes, wires)`.
const SHAPES: [(usize, usize, usize, usize); 3] = [(1, 2, 3, 240), (2, 4, 3, 960), (4, 8, 3, 1200)];

fn detector((c, t, p, w): (usize, usize, usize, usize)) -> SyntheticDetector {
    SyntheticDetector::new()
        .with_cryostats(c)
        .with_tpcs_per_cryostat(t)
        .with_planes_per_tpc(p)
        .with_wires_per_plane(w)
}

fn build(shape: (usize, usize, usize, usize), rule: ChannelRule) -> (GeometryData, StandardChannelMap) {
    let geometry = build_geometry(&detector(shape).hierarchy("bench"), &StandardSorter::new())
        .expect("synthetic detector sorts");
    let mut map = StandardChannelMap::with_rule(rule, None);
    map.initialize(&geometry).expect("channel map builds");
    (geometry, map)
}

// ============================================================================
// Forward and inverse lookups
// ============================================================================

fn bench_wire_to_channel(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire_to_channel");

    for shape in SHAPES {
        let (_, map) = build(shape, ChannelRule::OneToOne);
        let wires: Vec<_> = map.wire_ids().unwrap().collect();

        group.throughput(Throughput::Elements(wires.len() as u64));
        group.bench_with_input(BenchmarkId::new("all_wires", wires.len()), &wires, |b, wires| {
            b.iter(|| {
                let mut sum = 0u64;
                for wire in wires {
                    sum += u64::from(map.wire_to_channel(*wire).unwrap().raw());
                }
                black_box(sum)
            })
        });
    }
    group.finish();
}

fn bench_channel_to_wires(c: &mut Criterion) {
    let mut group = c.benchmark_group("channel_to_wires");

    for (rule, label) in [
        (ChannelRule::OneToOne, "one_to_one"),
        (ChannelRule::WrappedInduction { period: 200 }, "wrapped"),
    ] {
        let (_, map) = build(SHAPES[1], rule);
        let count = map.channel_count().unwrap();
        let mut rng = rand::thread_rng();
        let channels: Vec<ChannelId> = (0..1_000).map(|_| ChannelId::new(rng.gen_range(0..count))).collect();

        group.throughput(Throughput::Elements(channels.len() as u64));
        group.bench_function(BenchmarkId::new(label, count), |b| {
            b.iter(|| {
                let mut wires = 0usize;
                for channel in &channels {
                    wires += map.channel_to_wires(*channel).unwrap().len();
                }
                black_box(wires)
            })
        });
    }
    group.finish();
}

// ============================================================================
// Geometry queries
// ============================================================================

fn bench_nearest_wire(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_wire_id");

    let (geometry, map) = build(SHAPES[1], ChannelRule::OneToOne);
    let mut rng = rand::thread_rng();
    let positions: Vec<_> = geometry
        .planes()
        .flat_map(|plane| {
            let span = plane.pitch() * f64::from(plane.wire_count());
            let frame = plane.frame;
            (0..100)
                .map(|_| {
                    let offset = rng.gen_range(0.0..span);
                    (frame.origin + frame.increasing * offset, plane.id)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    group.throughput(Throughput::Elements(positions.len() as u64));
    group.bench_function("random_positions", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for (position, plane) in &positions {
                if map.nearest_wire_id(position, *plane).is_ok() {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });

    let origin = Point3::origin();
    let plane = geometry.planes().next().map(|p| p.id).unwrap();
    group.bench_function("wire_coordinate", |b| {
        b.iter(|| black_box(map.wire_coordinate(black_box(&origin), plane).unwrap()))
    });
    group.finish();
}

fn bench_geometry_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry_build");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for shape in SHAPES {
        let shuffled = detector(shape).with_shuffle_seed(11);
        let hierarchy = shuffled.hierarchy("bench");
        let wires = shuffled.wire_count();

        group.throughput(Throughput::Elements(wires as u64));
        group.bench_with_input(BenchmarkId::new("sort_and_map", wires), &hierarchy, |b, h| {
            b.iter(|| {
                let geometry = build_geometry(h, &StandardSorter::new()).unwrap();
                let mut map = StandardChannelMap::new();
                map.initialize(&geometry).unwrap();
                black_box(map.channel_count().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_wire_to_channel,
    bench_channel_to_wires,
    bench_nearest_wire,
    bench_geometry_build
);
criterion_main!(benches);
