//! Benchmarks for feature encoding and prediction
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses the sample artifacts shipped in the repository.

use artifacts::{ArtifactPaths, ArtifactSet};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::{BookInput, Predictor};
use std::path::Path;
use std::sync::Arc;

fn load_predictor() -> Predictor {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../artifacts");
    let set = ArtifactSet::load_from_paths(&ArtifactPaths::in_dir(&dir)).expect("Failed to load sample artifacts");
    Predictor::new(Arc::new(set))
}

fn bench_encode(c: &mut Criterion) {
    let predictor = load_predictor();
    let input = BookInput::new(9.99, 4.0, 100, "Literature & Fiction", "Romance").unwrap();

    c.bench_function("encode_features", |b| {
        b.iter(|| black_box(predictor.features(black_box(&input))))
    });
}

fn bench_predict(c: &mut Criterion) {
    let predictor = load_predictor();
    let input = BookInput::new(12.0, 4.7, 5000, "Literature & Fiction", "Romance").unwrap();

    c.bench_function("predict", |b| {
        b.iter(|| {
            let report = predictor.predict(black_box(&input)).unwrap();
            black_box(report)
        })
    });
}

fn bench_load_artifacts(c: &mut Criterion) {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../artifacts");
    let paths = ArtifactPaths::in_dir(&dir);

    c.bench_function("load_artifacts", |b| {
        b.iter(|| black_box(ArtifactSet::load_from_paths(black_box(&paths)).unwrap()))
    });
}

criterion_group!(benches, bench_encode, bench_predict, bench_load_artifacts);
criterion_main!(benches);
