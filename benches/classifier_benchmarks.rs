use criterion::{Criterion, criterion_group, criterion_main};
use pretium_client::{ApiError, ErrorCondition};
use std::hint::black_box;

fn bench_classification(c: &mut Criterion) {
    let below_minimum = ApiError::new(422, "The amount field must be at least 10.");
    let unrelated = ApiError::new(
        400,
        "The selected mobile network is invalid for the provided shortcode and currency",
    );

    c.bench_function("matches_below_minimum", |b| {
        b.iter(|| black_box(&below_minimum).matches(ErrorCondition::AmountBelowMinimum))
    });

    c.bench_function("classify_unrelated_message", |b| {
        b.iter(|| black_box(&unrelated).condition())
    });
}

criterion_group!(benches, bench_classification);
criterion_main!(benches);
