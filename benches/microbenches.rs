//! Criterion microbenches for cocoprep.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - COCO JSON parsing (from_coco_str, from_coco_slice)
//! - index construction and target retrieval
//! - per-category balancing

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

use cocoprep::balance::balance_with_rng;
use cocoprep::coco::{
    from_coco_slice, from_coco_str, Annotation, BBoxXYXY, Category, CocoDataset, Image,
};
use cocoprep::index::CocoDetection;

// Include test fixtures at compile time (no file I/O during benchmark)
const COCO_FIXTURE: &str = include_str!("../tests/fixtures/sample.coco.json");

/// A store shaped like the top-10 subset: 2000 images, 10 categories,
/// heavily skewed towards the first category.
fn skewed_store() -> CocoDataset {
    let mut dataset = CocoDataset {
        images: (1..=2000u64)
            .map(|id| Image::new(id, format!("{id:012}.jpg")))
            .collect(),
        categories: (1..=10u64)
            .map(|id| Category::new(id, format!("class{id}")))
            .collect(),
        ..Default::default()
    };

    let mut ann_id = 1u64;
    for cat in 1..=10u64 {
        let count = 6000 / cat;
        for i in 0..count {
            let image_id = (i * 7 + cat) % 2000 + 1;
            dataset.annotations.push(Annotation::new(
                ann_id,
                image_id,
                cat,
                BBoxXYXY::from_xywh(1.0, 2.0, 30.0, 40.0),
            ));
            ann_id += 1;
        }
    }
    dataset
}

/// Benchmark COCO JSON parsing from string.
fn bench_coco_parse_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("coco_parse");
    group.throughput(Throughput::Bytes(COCO_FIXTURE.len() as u64));

    group.bench_function("from_coco_str", |b| {
        b.iter(|| {
            let ds = from_coco_str(black_box(COCO_FIXTURE)).unwrap();
            black_box(ds)
        })
    });

    group.finish();
}

/// Benchmark COCO JSON parsing from byte slice.
fn bench_coco_parse_slice(c: &mut Criterion) {
    let bytes = COCO_FIXTURE.as_bytes();
    let mut group = c.benchmark_group("coco_parse");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("from_coco_slice", |b| {
        b.iter(|| {
            let ds = from_coco_slice(black_box(bytes)).unwrap();
            black_box(ds)
        })
    });

    group.finish();
}

/// Benchmark index construction and a full pass over all targets.
fn bench_index(c: &mut Criterion) {
    let dataset = skewed_store();

    let mut group = c.benchmark_group("index");
    group.throughput(Throughput::Elements(dataset.images.len() as u64));

    group.bench_function("from_dataset", |b| {
        b.iter(|| black_box(CocoDetection::from_dataset(".", black_box(dataset.clone()))))
    });

    let index = CocoDetection::from_dataset(".", dataset);
    group.bench_function("target_all", |b| {
        b.iter(|| {
            for i in 0..index.len() {
                black_box(index.target(i).unwrap());
            }
        })
    });

    group.finish();
}

/// Benchmark balancing the skewed store to 150 per category.
fn bench_balance(c: &mut Criterion) {
    let dataset = skewed_store();

    let mut group = c.benchmark_group("balance");
    group.throughput(Throughput::Elements(dataset.annotations.len() as u64));

    group.bench_function("balance_with_rng", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            black_box(balance_with_rng(black_box(&dataset), 150, &mut rng))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_coco_parse_str,
    bench_coco_parse_slice,
    bench_index,
    bench_balance,
);
criterion_main!(benches);
