use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ritsmap_layout::{
    ArcSpec, ArcTuning, CalloutRules, CircleLayout, CircleParams, gear_path, layout_dots,
    place_callouts,
};
use std::hint::black_box;
use std::time::Duration;

fn bench_dot_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot_layout");
    group.measurement_time(Duration::from_secs(5));

    let circles = CircleLayout::from_params(&CircleParams::default());
    for count in [100usize, 1_000, 10_000] {
        let arc = ArcSpec::enclosing(&circles, &ArcTuning::default(), 5.0, count).spec;
        group.bench_with_input(BenchmarkId::new("layout_dots", count), &arc, |b, arc| {
            b.iter(|| {
                let dots = layout_dots(black_box(arc), count, 5.0);
                black_box(dots.len());
            })
        });
        group.bench_with_input(BenchmarkId::new("with_callouts", count), &arc, |b, arc| {
            let rules = CalloutRules::standard(circles.big.center, 2.4);
            b.iter(|| {
                let dots = layout_dots(black_box(arc), count, 5.0);
                black_box(place_callouts(&dots, arc, &rules).len());
            })
        });
    }

    group.finish();
}

fn bench_gear_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("gear_path");
    for teeth in [10usize, 20, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(teeth), &teeth, |b, &teeth| {
            b.iter(|| black_box(gear_path(113.25, teeth, 6.0, 0.25)).len())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dot_layout, bench_gear_path);
criterion_main!(benches);
