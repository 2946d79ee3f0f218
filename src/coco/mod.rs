//! COCO annotation store model and I/O.
//!
//! Both the [`index`](crate::index) and the [`balance`](crate::balance)
//! modules work on the [`CocoDataset`] defined here and on nothing else;
//! the persisted JSON document is the only thing they share.
//!
//! # Example
//!
//! ```
//! use cocoprep::coco::{Annotation, BBoxXYXY, Category, CocoDataset, Image};
//!
//! let dataset = CocoDataset {
//!     images: vec![Image::new(1u64, "000001.jpg")],
//!     categories: vec![Category::new(1u64, "person")],
//!     annotations: vec![Annotation::new(
//!         1u64, 1u64, 1u64,
//!         BBoxXYXY::from_xywh(10.0, 20.0, 30.0, 40.0),
//!     )],
//!     ..Default::default()
//! };
//! assert_eq!(dataset.annotations[0].bbox_xywh(), [10.0, 20.0, 30.0, 40.0]);
//! ```

mod bbox;
mod ids;
mod io;
mod model;

pub use bbox::BBoxXYXY;
pub use ids::{AnnotationId, CategoryId, ImageId};
pub use io::{from_coco_slice, from_coco_str, read_coco_json, to_coco_string, write_coco_json};
pub use model::{Annotation, Category, CocoDataset, Image};
