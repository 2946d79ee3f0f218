//! Typed COCO annotation store.
//!
//! Every record keeps the fields it does not know about in an `extra` map,
//! so a record copied from one store into a derived store is written back
//! with its custom fields untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::bbox::BBoxXYXY;
use super::ids::{AnnotationId, CategoryId, ImageId};

/// A complete COCO detection store.
///
/// Only the three record lists are required. Top-level blocks such as
/// `info` and `licenses` are carried through `extra` verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CocoDataset {
    /// All images in the store.
    pub images: Vec<Image>,

    /// All annotations (bounding boxes with category references).
    pub annotations: Vec<Annotation>,

    /// Category definitions. Their order is meaningful: it fixes the
    /// contiguous training labels.
    pub categories: Vec<Category>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An image record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,

    /// Path of the image file, relative to the image root.
    pub file_name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Image {
    pub fn new(id: impl Into<ImageId>, file_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            extra: Map::new(),
        }
    }

    /// Adds a pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A category (class) record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    /// Name of the category (e.g., "person", "car", "traffic light").
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Adds a pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// An annotation record.
///
/// Numbers are stored as written so that a record copied into a derived
/// store keeps `10` as `10` and `5400.0` as `5400.0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub image_id: ImageId,
    pub category_id: CategoryId,

    /// COCO bbox format: `[x, y, width, height]` with `(x, y)` the top-left corner.
    pub bbox: [Number; 4],

    /// `area`, `iscrowd`, segmentation, score, attributes and anything else.
    /// A `null` here stays `null` on write.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Annotation {
    /// Creates an annotation from a corner-form box, with `area` set to the
    /// box area.
    ///
    /// Non-finite coordinates have no JSON form and are stored as `0`.
    pub fn new(
        id: impl Into<AnnotationId>,
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: BBoxXYXY,
    ) -> Self {
        let (x, y, w, h) = bbox.to_xywh();
        Self {
            id: id.into(),
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox: [x, y, w, h].map(finite_number),
            extra: Map::new(),
        }
        .with_field("area", finite_number(bbox.area()))
    }

    pub fn with_iscrowd(self, iscrowd: u8) -> Self {
        self.with_field("iscrowd", iscrowd)
    }

    /// Adds a pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The box as stored, `[x, y, width, height]`.
    pub fn bbox_xywh(&self) -> [f64; 4] {
        self.bbox.each_ref().map(|n| n.as_f64().unwrap_or(f64::NAN))
    }

    /// The box in corner form.
    pub fn bbox_xyxy(&self) -> BBoxXYXY {
        let [x, y, w, h] = self.bbox_xywh();
        BBoxXYXY::from_xywh(x, y, w, h)
    }

    /// The `area` field, if present and numeric.
    pub fn area(&self) -> Option<f64> {
        self.extra.get("area").and_then(Value::as_f64)
    }

    /// Stored area, or the box area when the record carries none.
    pub fn area_or_bbox(&self) -> f64 {
        self.area().unwrap_or_else(|| self.bbox_xyxy().area())
    }

    /// Crowd flag: `1` for any non-zero `iscrowd`, `0` when absent or `null`.
    pub fn is_crowd(&self) -> u8 {
        self.extra
            .get("iscrowd")
            .and_then(Value::as_u64)
            .map_or(0, |flag| u8::from(flag != 0))
    }
}

fn finite_number(value: f64) -> Number {
    Number::from_f64(value).unwrap_or_else(|| Number::from(0u8))
}
