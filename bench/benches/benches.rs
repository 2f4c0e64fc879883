use criterion::{Criterion, criterion_group, criterion_main};
use landscape::{
    DescentSimulator, FieldSynthesizer, GradientField, GridBuilder, LandscapeConfig,
    LandscapeService,
};
use storage::models::LandscapeRecord;

const SIZE: usize = 200;

fn rough() -> LandscapeConfig {
    LandscapeConfig::default().with_resolution(SIZE)
}

fn bench_synthesis(c: &mut Criterion) {
    let cfg = rough();
    let grid = GridBuilder::new(SIZE, cfg.x_bounds, cfg.y_bounds)
        .build()
        .unwrap();
    c.bench_function("FieldSynthesizer rough 200x200", |b| {
        b.iter(|| {
            let _field = FieldSynthesizer::new(&cfg.components, cfg.noise)
                .generate(&grid)
                .unwrap();
        })
    });
}

fn bench_gradient(c: &mut Criterion) {
    let res = LandscapeService::new().compute(&rough()).unwrap();
    c.bench_function("GradientField 200x200", |b| {
        b.iter(|| {
            let _grad = GradientField::compute(res.field());
        })
    });
}

fn bench_descent(c: &mut Criterion) {
    let cfg = rough();
    let res = LandscapeService::new().compute(&cfg).unwrap();
    let grad = GradientField::compute(res.field());
    let sim = DescentSimulator::new(&cfg.descent).unwrap();
    c.bench_function("DescentSimulator 200 steps", |b| {
        b.iter(|| {
            let _path = sim.run(res.grid(), res.field(), &grad);
        })
    });
}

fn bench_compute_and_export(c: &mut Criterion) {
    let cfg = rough();
    c.bench_function("compute + export record + JSON", |b| {
        b.iter(|| {
            let res = LandscapeService::new().compute(&cfg).unwrap();
            let record = LandscapeRecord::from(&res);
            let _json = serde_json::to_vec(&record).unwrap();
        })
    });
}

criterion_group!(
    landscape_benchmarks,
    bench_synthesis,
    bench_gradient,
    bench_descent,
    bench_compute_and_export
);
criterion_main!(landscape_benchmarks);
