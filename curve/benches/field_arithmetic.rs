use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ecurve::{Curve, FieldElement};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn operands(name: &str) -> (FieldElement, FieldElement) {
    let curve = Curve::from_name(name).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    (
        FieldElement::random(curve.field(), &mut rng),
        FieldElement::random(curve.field(), &mut rng),
    )
}

fn bench_field_add(c: &mut Criterion) {
    let (a, b) = operands("secp256r1");
    c.bench_function("p256_field_add", |bencher| {
        bencher.iter(|| black_box(black_box(&a) + black_box(&b)))
    });
}

fn bench_field_sub(c: &mut Criterion) {
    let (a, b) = operands("secp256r1");
    c.bench_function("p256_field_sub", |bencher| {
        bencher.iter(|| black_box(black_box(&a) - black_box(&b)))
    });
}

fn bench_field_mul(c: &mut Criterion) {
    for name in ["secp256r1", "secp521r1"] {
        let (a, b) = operands(name);
        c.bench_function(&format!("{name}_field_mul"), |bencher| {
            bencher.iter(|| black_box(black_box(&a) * black_box(&b)))
        });
    }
}

fn bench_field_invert(c: &mut Criterion) {
    let (a, _) = operands("secp256r1");
    c.bench_function("p256_field_invert", |bencher| {
        bencher.iter(|| black_box(black_box(&a).invert()))
    });
}

fn bench_field_sqrt(c: &mut Criterion) {
    for name in ["secp256r1", "Ed25519"] {
        let (a, _) = operands(name);
        let square = a.square();
        c.bench_function(&format!("{name}_field_sqrt"), |bencher| {
            bencher.iter(|| black_box(black_box(&square).sqrt()))
        });
    }
}

criterion_group!(
    benches,
    bench_field_add,
    bench_field_sub,
    bench_field_mul,
    bench_field_invert,
    bench_field_sqrt
);
criterion_main!(benches);
