use std::collections::{HashMap, HashSet};
use std::path::Path;

use cocoprep::balance::{balance_dataset, balance_file, BalanceOptions};
use cocoprep::coco::{read_coco_json, CategoryId, ImageId};

mod common;

fn seeded(per_category: usize, seed: u64) -> BalanceOptions {
    BalanceOptions {
        per_category,
        seed: Some(seed),
    }
}

#[test]
fn caps_large_category_and_keeps_sparse_one() {
    let dataset = common::synthetic_store(&[500, 50], 120);
    let (balanced, report) = balance_dataset(&dataset, &seeded(150, 2024)).unwrap();

    let mut per_category: HashMap<CategoryId, usize> = HashMap::new();
    for ann in &balanced.annotations {
        *per_category.entry(ann.category_id).or_insert(0) += 1;
    }
    assert_eq!(per_category[&CategoryId(1)], 150);
    assert_eq!(per_category[&CategoryId(2)], 50);
    assert_eq!(balanced.annotations.len(), 200);

    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.warnings[0].category_id, CategoryId(2));
    assert_eq!(report.warnings[0].available, 50);
    assert_eq!(report.warnings[0].requested, 150);

    let referenced: HashSet<ImageId> = balanced.annotations.iter().map(|a| a.image_id).collect();
    let emitted: Vec<ImageId> = balanced.images.iter().map(|img| img.id).collect();
    let emitted_set: HashSet<ImageId> = emitted.iter().copied().collect();
    assert_eq!(emitted.len(), emitted_set.len(), "image emitted twice");
    assert_eq!(emitted_set, referenced);
}

#[test]
fn selected_records_are_unchanged() {
    let dataset = common::synthetic_store(&[30, 30, 5], 10);
    let (balanced, _) = balance_dataset(&dataset, &seeded(8, 9)).unwrap();

    for ann in &balanced.annotations {
        let source = dataset
            .annotations
            .iter()
            .find(|candidate| candidate.id == ann.id)
            .expect("selected annotation comes from the source");
        assert_eq!(source, ann);
        assert!(ann.extra.contains_key("note"));
    }
    for image in &balanced.images {
        assert_eq!(image.extra["width"], 640);
    }
}

#[test]
fn different_seeds_can_differ() {
    let dataset = common::synthetic_store(&[200], 50);
    let (a, _) = balance_dataset(&dataset, &seeded(20, 1)).unwrap();
    let (b, _) = balance_dataset(&dataset, &seeded(20, 2)).unwrap();

    let ids = |d: &cocoprep::coco::CocoDataset| -> Vec<u64> {
        d.annotations.iter().map(|a| a.id.as_u64()).collect()
    };
    assert_ne!(ids(&a), ids(&b));
}

#[test]
fn unseeded_run_still_caps() {
    let dataset = common::synthetic_store(&[40, 3], 12);
    let opts = BalanceOptions {
        per_category: 10,
        seed: None,
    };
    let (balanced, report) = balance_dataset(&dataset, &opts).unwrap();

    assert_eq!(balanced.annotations.len(), 13);
    assert_eq!(report.seed, None);
}

#[test]
fn balance_file_writes_valid_store() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("labels_balanced.json");

    let report = balance_file(Path::new(common::SAMPLE_COCO), &output, &seeded(1, 7)).unwrap();
    let balanced = read_coco_json(&output).unwrap();

    // car, person, bicycle: one instance each; the orphan never survives.
    assert_eq!(balanced.annotations.len(), 3);
    assert!(balanced
        .annotations
        .iter()
        .all(|ann| ann.category_id != CategoryId(8)));
    assert_eq!(report.orphaned_annotations, 1);
    assert_eq!(report.output.annotations, 3);

    // Category list is copied in order, with its custom fields.
    let names: Vec<_> = balanced.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["car", "person", "bicycle"]);
    assert_eq!(balanced.categories[0].extra["supercategory"], "vehicle");

    // Top-level blocks pass through.
    assert_eq!(balanced.extra["info"]["year"], 2017);
    assert!(balanced.extra.contains_key("licenses"));
}

#[test]
fn balance_file_reports_load_errors() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.json");

    let err = balance_file(
        Path::new("tests/fixtures/missing_categories.coco.json"),
        &output,
        &seeded(1, 1),
    )
    .unwrap_err();

    assert!(err.is_load_error());
    assert!(!output.exists());
}
