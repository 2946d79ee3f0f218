//! Inspection report types.

use serde::Serialize;
use std::fmt;

use crate::coco::CategoryId;
use crate::index::Target;

/// Full inspection report.
#[derive(Clone, Debug, Serialize)]
pub struct InspectReport {
    pub summary: SummarySection,
    /// One row per label, in label order.
    pub labels: Vec<LabelRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<SampleSection>,
}

/// Counts over the whole index.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SummarySection {
    /// Distinct images, i.e. the index length.
    pub images: usize,
    pub annotations: usize,
    pub categories: usize,
    /// Images whose target has no instances.
    pub images_without_targets: usize,
    /// Annotations whose category has no label.
    pub orphaned_annotations: usize,
}

/// A label with its instance count.
#[derive(Clone, Debug, Serialize)]
pub struct LabelRow {
    pub label: usize,
    pub category_id: CategoryId,
    pub name: String,
    pub instances: usize,
}

/// The target at one position.
#[derive(Clone, Debug, Serialize)]
pub struct SampleSection {
    pub index: usize,
    pub file_name: String,
    pub target: Target,
    /// Width and height of the decoded image, if it was decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<(u32, u32)>,
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(f, "Summary:")?;
        writeln!(f, "  images:       {}", s.images)?;
        writeln!(f, "  annotations:  {}", s.annotations)?;
        writeln!(f, "  categories:   {}", s.categories)?;
        if s.images_without_targets > 0 {
            writeln!(f, "  empty images: {}", s.images_without_targets)?;
        }
        if s.orphaned_annotations > 0 {
            writeln!(f, "  unlabeled annotations: {}", s.orphaned_annotations)?;
        }

        writeln!(f)?;
        writeln!(f, "Labels ({}):", self.labels.len())?;
        for row in &self.labels {
            writeln!(
                f,
                "  {:>3}  id={:<6} {:<24} {}",
                row.label,
                row.category_id.as_u64(),
                row.name,
                row.instances
            )?;
        }

        if let Some(sample) = &self.sample {
            writeln!(f)?;
            writeln!(
                f,
                "Position {} (image {}, {}):",
                sample.index, sample.target.image_id, sample.file_name
            )?;
            if let Some((w, h)) = sample.decoded {
                writeln!(f, "  decoded: {}x{}", w, h)?;
            }
            if sample.target.is_empty() {
                writeln!(f, "  no instances")?;
            }
            for i in 0..sample.target.len() {
                let [x1, y1, x2, y2] = sample.target.boxes[i];
                writeln!(
                    f,
                    "  label={} box=[{}, {}, {}, {}] area={} iscrowd={}",
                    sample.target.labels[i],
                    x1,
                    y1,
                    x2,
                    y2,
                    sample.target.area[i],
                    sample.target.iscrowd[i]
                )?;
            }
        }

        Ok(())
    }
}
