//! Index inspection.
//!
//! Summarises what a training loop would see through a [`CocoDetection`]:
//! how many positions there are, the label table with per-label instance
//! counts, and optionally the target (and decoded size) at one position.

mod report;

pub use report::{InspectReport, LabelRow, SampleSection, SummarySection};

use std::collections::HashMap;

use crate::error::CocoprepError;
use crate::index::CocoDetection;

/// Options for inspection.
#[derive(Clone, Debug, Default)]
pub struct InspectOptions {
    /// Position to show the target of.
    pub index: Option<usize>,
    /// Also decode the image at `index`.
    pub decode: bool,
}

/// Inspect an index and produce a report.
///
/// # Errors
/// Fails only for the sampled position: out of range, or (with `decode`)
/// an unreadable image.
pub fn inspect_index<T>(
    dataset: &CocoDetection<T>,
    opts: &InspectOptions,
) -> Result<InspectReport, CocoprepError> {
    let store = dataset.dataset();
    let labels = dataset.labels();

    let mut instances: HashMap<usize, usize> = HashMap::new();
    let mut orphaned = 0;
    for ann in &store.annotations {
        match labels.label(ann.category_id) {
            Some(label) => *instances.entry(label).or_insert(0) += 1,
            None => orphaned += 1,
        }
    }

    let rows = labels
        .entries()
        .iter()
        .map(|entry| LabelRow {
            label: entry.label,
            category_id: entry.category_id,
            name: entry.name.clone(),
            instances: instances.get(&entry.label).copied().unwrap_or(0),
        })
        .collect();

    let mut empty_targets = 0;
    for i in 0..dataset.len() {
        if dataset.target(i)?.is_empty() {
            empty_targets += 1;
        }
    }

    let summary = SummarySection {
        images: dataset.len(),
        annotations: store.annotations.len(),
        categories: store.categories.len(),
        images_without_targets: empty_targets,
        orphaned_annotations: orphaned,
    };

    let sample = match opts.index {
        Some(index) => {
            let image = dataset.image(index)?;
            let decoded = if opts.decode {
                let rgb = dataset.load_image(index)?;
                Some((rgb.width(), rgb.height()))
            } else {
                None
            };
            Some(SampleSection {
                index,
                file_name: image.file_name.clone(),
                target: dataset.target(index)?,
                decoded,
            })
        }
        None => None,
    };

    Ok(InspectReport {
        summary,
        labels: rows,
        sample,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coco::{from_coco_str, CategoryId, ImageId};

    fn index() -> CocoDetection {
        let store = from_coco_str(
            r#"{
                "images": [
                    {"id": 2, "file_name": "b.jpg"},
                    {"id": 1, "file_name": "a.jpg"}
                ],
                "categories": [
                    {"id": 18, "name": "dog"},
                    {"id": 17, "name": "cat"}
                ],
                "annotations": [
                    {"id": 1, "image_id": 1, "category_id": 17, "bbox": [0, 0, 4, 4], "area": 16},
                    {"id": 2, "image_id": 1, "category_id": 17, "bbox": [1, 1, 4, 4], "area": 16},
                    {"id": 3, "image_id": 2, "category_id": 5, "bbox": [1, 1, 4, 4], "area": 16}
                ]
            }"#,
        )
        .unwrap();
        CocoDetection::from_dataset("imgs", store)
    }

    #[test]
    fn summary_and_label_counts() {
        let report = inspect_index(&index(), &InspectOptions::default()).unwrap();

        assert_eq!(report.summary.images, 2);
        assert_eq!(report.summary.orphaned_annotations, 1);
        assert_eq!(report.summary.images_without_targets, 1);

        assert_eq!(report.labels[0].category_id, CategoryId(18));
        assert_eq!(report.labels[0].instances, 0);
        assert_eq!(report.labels[1].label, 2);
        assert_eq!(report.labels[1].instances, 2);
        assert!(report.sample.is_none());
    }

    #[test]
    fn sample_section_without_decoding() {
        let opts = InspectOptions {
            index: Some(0),
            decode: false,
        };
        let report = inspect_index(&index(), &opts).unwrap();
        let sample = report.sample.expect("sample requested");

        assert_eq!(sample.file_name, "a.jpg");
        assert_eq!(sample.target.image_id, ImageId(1));
        assert_eq!(sample.target.labels, vec![2, 2]);
        assert_eq!(sample.decoded, None);
    }

    #[test]
    fn sample_out_of_range_fails() {
        let opts = InspectOptions {
            index: Some(5),
            decode: false,
        };
        assert!(matches!(
            inspect_index(&index(), &opts),
            Err(CocoprepError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }
}
