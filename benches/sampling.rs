use afrigrid::{grid_spacing_for, sample_polygon, SamplingConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geo::{LineString, Polygon};

fn nigeria_sized_square() -> Polygon<f64> {
    // Roughly 10 degrees on a side, similar to sampling a whole country.
    Polygon::new(
        LineString::from(vec![
            (3.0, 4.0),
            (13.0, 4.0),
            (13.0, 14.0),
            (3.0, 14.0),
            (3.0, 4.0),
        ]),
        vec![],
    )
}

fn bench_sampling(c: &mut Criterion) {
    let config = SamplingConfig::default();
    let polygon = nigeria_sized_square();

    c.bench_function("grid_spacing_for", |b| {
        b.iter(|| grid_spacing_for(black_box(12_345.0), &config))
    });
    c.bench_function("sample_polygon_auto_spacing", |b| {
        b.iter(|| sample_polygon(black_box(&polygon), None, true, &config))
    });
    c.bench_function("sample_polygon_fine_spacing", |b| {
        b.iter(|| sample_polygon(black_box(&polygon), Some(0.25), true, &config))
    });
}

criterion_group!(benches, bench_sampling);
criterion_main!(benches);
