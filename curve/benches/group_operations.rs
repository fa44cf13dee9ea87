use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ecurve::{list_standard_curve_names, Curve, Point};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn setup(name: &str) -> (Curve, Point, BigUint) {
    let curve = Curve::from_name(name).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let point = Point::random(&curve, &mut rng);
    let scalar = curve.random_scalar(&mut rng);
    (curve, point, scalar)
}

fn bench_point_double(c: &mut Criterion) {
    let (_, p, _) = setup("secp256r1");
    c.bench_function("p256_double", |bencher| {
        bencher.iter(|| black_box(black_box(&p).double()))
    });
}

fn bench_point_add(c: &mut Criterion) {
    let (curve, p, _) = setup("secp256r1");
    let g = Point::generator(&curve);
    c.bench_function("p256_add", |bencher| {
        bencher.iter(|| black_box(black_box(&p).add(black_box(&g))))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_mul");
    group.sample_size(10);

    for name in list_standard_curve_names() {
        let (_, p, scalar) = setup(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &scalar, |bencher, k| {
            bencher.iter(|| black_box(black_box(&p).scalar_mul(black_box(k))))
        });
    }
    group.finish();
}

fn bench_scalar_mul_precomputed(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_mul_precomputed");
    group.sample_size(10);

    for name in list_standard_curve_names() {
        let (_, mut p, scalar) = setup(name);
        p.precompute();
        group.bench_with_input(BenchmarkId::from_parameter(name), &scalar, |bencher, k| {
            bencher.iter(|| black_box(black_box(&p).scalar_mul_precomputed(black_box(k))))
        });
    }
    group.finish();
}

fn bench_precompute(c: &mut Criterion) {
    let (_, p, _) = setup("secp256r1");
    c.bench_function("p256_precompute", |bencher| {
        bencher.iter(|| {
            let mut q = black_box(&p).clone();
            q.precompute();
            black_box(q)
        })
    });
}

criterion_group!(
    benches,
    bench_point_double,
    bench_point_add,
    bench_scalar_mul,
    bench_scalar_mul_precomputed,
    bench_precompute
);
criterion_main!(benches);
