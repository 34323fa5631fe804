use criterion::{black_box, criterion_group, criterion_main, Criterion};
use haunts::{cluster, select_location, Kmeans, Point};
use rand::prelude::*;

fn trail(n: usize, rng: &mut StdRng) -> Vec<Point> {
    // Three hotspots of unequal weight, as in a real week of fixes.
    let spots = [(-122.30, 47.60), (-122.20, 47.65), (-122.25, 47.62)];
    (0..n)
        .map(|i| {
            let (x, y) = spots[if i % 10 < 7 { 0 } else { i % 2 + 1 }];
            Point::new(
                x + rng.random_range(-0.001..0.001),
                y + rng.random_range(-0.001..0.001),
            )
        })
        .collect()
}

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");

    let mut rng = StdRng::seed_from_u64(42);
    let data = trail(1000, &mut rng);

    group.bench_function("fit_n1000_k6", |b| {
        b.iter(|| {
            let model = Kmeans::new(6).with_seed(42);
            model.fit(black_box(&data)).ok();
        })
    });

    group.bench_function("cluster_and_select_n1000_k6", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            if let Ok(fit) = cluster(black_box(&data), 6, &mut rng) {
                select_location(&data, &fit).ok();
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_kmeans);
criterion_main!(benches);
