use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use nautilus::{Dependency, ExtendedPolygon, PlaceOptions, Polygon, QuadTree, Rect, Size};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Scenario {
    polygons: Vec<Polygon>,
    dependencies: Vec<Dependency>,
    tolerances: Vec<f64>,
    board: Size,
}

/// Deterministic staircase footprints: `groups` large clusters, `per_group` small dependents each.
fn build_scenario(groups: usize, per_group: usize) -> Scenario {
    let footprint = |width: usize, steps: usize| {
        let mut rects = Vec::with_capacity(steps);
        for s in 0..steps {
            let left = (s * width) as f64;
            let top = ((s * 7) % 5) as f64;
            rects.push(Rect::new(left, top, left + width as f64, 20.0 + (s % 3) as f64));
        }
        Polygon::new(rects)
    };

    let mut polygons = Vec::new();
    for g in 0..groups {
        polygons.push(footprint(12, 3 + g % 4));
    }
    let mut dependencies = Vec::new();
    for g in 0..groups {
        for k in 0..per_group {
            dependencies.push(Dependency::new(g, polygons.len()));
            polygons.push(footprint(3 + k % 5, 1 + k % 3));
        }
    }
    let tolerances = vec![1.0; polygons.len()];

    Scenario {
        polygons,
        dependencies,
        tolerances,
        board: Size::new(4000.0, 4000.0),
    }
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("place");
    group.measurement_time(Duration::from_secs(10));

    let cases = [("g4_d8", 4usize, 8usize), ("g16_d16", 16, 16), ("g32_d32", 32, 32)];

    for (name, groups, per_group) in cases {
        let scenario = build_scenario(groups, per_group);
        group.bench_with_input(
            BenchmarkId::new("place_with_options", name),
            &scenario,
            |b, s| {
                b.iter(|| {
                    let placement = nautilus::place_with_options(
                        black_box(&s.polygons),
                        black_box(&s.dependencies),
                        &s.tolerances,
                        s.board,
                        &PlaceOptions::default(),
                    );
                    black_box(placement.map(|p| p.placed_count).unwrap_or_default());
                })
            },
        );
    }

    group.finish();
}

fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");

    let scenario = build_scenario(16, 16);
    let shapes: Vec<ExtendedPolygon> = scenario
        .polygons
        .iter()
        .map(|p| ExtendedPolygon::new(p.clone()).unwrap())
        .collect();
    group.bench_function("g16_d16", |b| {
        b.iter_batched(
            || shapes.clone(),
            |mut shapes| {
                let cluster = nautilus::pack(
                    &mut shapes,
                    &scenario.dependencies,
                    scenario.board,
                    &PlaceOptions::default(),
                );
                black_box(cluster.map(|c| c.placed_count).unwrap_or_default());
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");

    let rects: Vec<Rect> = (0..2000)
        .map(|i| {
            let x = ((i * 37) % 997) as f64;
            let y = ((i * 91) % 991) as f64;
            Rect::new(x, y, x + 4.0 + (i % 7) as f64, y + 3.0 + (i % 5) as f64)
        })
        .collect();
    let bound = Rect::new(0.0, 0.0, 1024.0, 1024.0);

    group.bench_function("insert_2000", |b| {
        b.iter(|| {
            let mut tree = QuadTree::new(bound);
            for r in &rects {
                tree.insert(*r);
            }
            black_box(tree.is_empty());
        })
    });

    let mut tree = QuadTree::new(bound);
    for r in &rects {
        tree.insert(*r);
    }
    group.bench_function("rect_intersects_2000", |b| {
        b.iter(|| {
            let hits = rects
                .iter()
                .filter(|r| tree.rect_intersects(&r.translated(nautilus::Point::new(2.0, 2.0))))
                .count();
            black_box(hits);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_place, bench_pack, bench_quadtree);
criterion_main!(benches);
