//! Bounding box conversion between COCO XYWH and corner (XYXY) form.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax),
/// in absolute pixel coordinates.
///
/// Note: This type does NOT enforce that min <= max. A store with a negative
/// width keeps it, and the box is reported as-is rather than rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BBoxXYXY {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BBoxXYXY {
    /// Creates a new bounding box from explicit corners.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Creates a bounding box from COCO `[x, y, width, height]`.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::from_xyxy(x, y, x + w, y + h)
    }

    /// Converts back to COCO `(x, y, width, height)`.
    #[inline]
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        (self.xmin, self.ymin, self.width(), self.height())
    }

    /// May be negative if the box is malformed.
    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// May be negative if the box is malformed.
    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Corner coordinates narrowed to `f32`, the layout training targets use.
    #[inline]
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.xmin as f32,
            self.ymin as f32,
            self.xmax as f32,
            self.ymax as f32,
        ]
    }
}
