//! Per-image supervision target.

use serde::Serialize;

use crate::coco::{Annotation, ImageId};

use super::LabelMap;

/// All valid annotations of one image, as parallel sequences.
///
/// `boxes`, `labels`, `area` and `iscrowd` always have the same length,
/// which may be zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Target {
    /// Corner boxes `[x1, y1, x2, y2]` in pixels.
    pub boxes: Vec<[f32; 4]>,
    pub labels: Vec<i64>,
    pub area: Vec<f32>,
    pub iscrowd: Vec<i64>,
    pub image_id: ImageId,
}

impl Target {
    /// Collects the annotations whose category has a label. Others are skipped.
    pub(crate) fn collect<'a>(
        image_id: ImageId,
        annotations: impl IntoIterator<Item = &'a Annotation>,
        labels: &LabelMap,
    ) -> Self {
        let mut target = Target {
            image_id,
            ..Default::default()
        };

        for ann in annotations {
            let Some(label) = labels.label(ann.category_id) else {
                continue;
            };
            target.boxes.push(ann.bbox_xyxy().to_f32_array());
            target.labels.push(label as i64);
            target.area.push(ann.area_or_bbox() as f32);
            target.iscrowd.push(i64::from(ann.is_crowd()));
        }

        target
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
