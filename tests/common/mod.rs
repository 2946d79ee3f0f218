#![allow(dead_code)]

use std::fs;
use std::path::Path;

use cocoprep::coco::{Annotation, BBoxXYXY, Category, CocoDataset, Image};
use image::{Rgb, RgbImage};

pub const SAMPLE_COCO: &str = "tests/fixtures/sample.coco.json";

/// Writes a solid-colour RGB image; the format follows the extension.
pub fn write_rgb(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, Rgb([200, 40, 10]))
        .save(path)
        .expect("write image file");
}

/// A store with `counts[i]` instances of category `i + 1`, one instance per
/// image, spread over `images` images round-robin.
pub fn synthetic_store(counts: &[usize], images: u64) -> CocoDataset {
    let mut dataset = CocoDataset {
        images: (1..=images)
            .map(|id| Image::new(id, format!("{id:06}.jpg")).with_field("width", 640))
            .collect(),
        categories: (1..=counts.len() as u64)
            .map(|id| Category::new(id, format!("class{id}")))
            .collect(),
        ..Default::default()
    };

    let mut next_id = 1u64;
    for (cat, &count) in counts.iter().enumerate() {
        for _ in 0..count {
            let image_id = next_id % images + 1;
            dataset.annotations.push(
                Annotation::new(
                    next_id,
                    image_id,
                    cat as u64 + 1,
                    BBoxXYXY::from_xywh(1.0, 2.0, 3.0, 4.0),
                )
                .with_field("note", format!("ann{next_id}")),
            );
            next_id += 1;
        }
    }

    dataset
}
