use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{CurveParameters, FieldElement, RandomElement};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_secp256k1_mul(c: &mut Criterion) {
    let curve = CurveParameters::secp256k1();
    let mut rng = StdRng::seed_from_u64(42);
    let a = FieldElement::random(&mut rng, &curve);
    let b = FieldElement::random(&mut rng, &curve);
    c.bench_function("secp256k1_field_mul", |bencher| {
        bencher.iter(|| black_box(black_box(&a) * black_box(&b)))
    });
}

fn bench_secp256k1_invert(c: &mut Criterion) {
    let curve = CurveParameters::secp256k1();
    let mut rng = StdRng::seed_from_u64(7);
    let a = FieldElement::random(&mut rng, &curve);
    c.bench_function("secp256k1_field_invert", |bencher| {
        bencher.iter(|| black_box(black_box(&a).invert()))
    });
}

fn bench_secp256k1_sqrt(c: &mut Criterion) {
    let curve = CurveParameters::secp256k1();
    let mut rng = StdRng::seed_from_u64(9);
    let a = FieldElement::random(&mut rng, &curve).square();
    c.bench_function("secp256k1_field_sqrt", |bencher| {
        bencher.iter(|| black_box(black_box(&a).sqrt()))
    });
}

criterion_group!(
    benches,
    bench_secp256k1_mul,
    bench_secp256k1_invert,
    bench_secp256k1_sqrt
);
criterion_main!(benches);
