//! Benchmarks for filter performance

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_mouse_control::{
    filters::{one_euro::OneEuroPointFilter, NoFilter, PointFilter},
    geometry::Point2,
};

fn noisy_track(len: usize) -> Vec<Point2> {
    // Simulating a hand circling with detector jitter
    (0..len)
        .map(|i| {
            let t = i as f64 * 0.05;
            let x = 0.5 + 0.3 * t.cos() + 0.01 * rand::random::<f64>();
            let y = 0.5 + 0.3 * t.sin() + 0.01 * rand::random::<f64>();
            Point2::new(x, y)
        })
        .collect()
}

fn benchmark_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");
    let test_data = noisy_track(100);

    let filter_configs = vec![
        ("no_filter", Box::new(NoFilter) as Box<dyn PointFilter>),
        ("one_euro_default", Box::new(OneEuroPointFilter::default())),
        (
            "one_euro_responsive",
            Box::new(OneEuroPointFilter::new(1.0, 0.5, 1.0).expect("valid tuning")),
        ),
    ];

    for (name, mut filter) in filter_configs {
        let mut frame = 0_u64;
        group.bench_with_input(BenchmarkId::new("single_update", name), &test_data[0], |b, &point| {
            b.iter(|| {
                frame += 1;
                black_box(filter.apply(black_box(frame), black_box(point)))
            });
        });

        group.bench_with_input(BenchmarkId::new("sequence_100", name), &test_data, |b, data| {
            b.iter(|| {
                filter.reset();
                for (frame, &point) in (1_u64..).zip(data) {
                    black_box(filter.apply(black_box(frame), black_box(point)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_frame_gaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_euro_frame_gaps");
    let test_data = noisy_track(100);

    for gap in [1_u64, 2, 5] {
        let mut filter = OneEuroPointFilter::default();
        group.bench_with_input(BenchmarkId::new("gap", gap), &gap, |b, &gap| {
            b.iter(|| {
                filter.reset();
                for (i, &point) in test_data.iter().enumerate() {
                    let frame = (i as u64 + 1) * gap;
                    black_box(filter.apply(frame, point));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_filters, benchmark_frame_gaps);
criterion_main!(benches);
