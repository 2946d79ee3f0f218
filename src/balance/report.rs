//! Balance report types.
//!
//! A balance run never fails because of the data it is given. Categories
//! that cannot supply the requested count are recorded here as
//! [`SparseCategory`] warnings instead.

use serde::Serialize;
use std::fmt;

use crate::coco::CategoryId;

/// What a balance run selected, category by category.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BalanceReport {
    /// Requested instances per category.
    pub per_category: usize,
    /// Seed used, if the run was seeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Counts in the source store.
    pub input: BalanceCounts,
    /// Counts in the balanced store.
    pub output: BalanceCounts,
    /// One row per category, in category-list order.
    pub categories: Vec<CategorySelection>,
    /// Categories that had fewer instances than requested.
    pub warnings: Vec<SparseCategory>,
    /// Annotations dropped because their category is not in the category list.
    pub orphaned_annotations: usize,
}

impl BalanceReport {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Selected instances for a category, if it is listed.
    pub fn selected(&self, category_id: CategoryId) -> Option<usize> {
        self.categories
            .iter()
            .find(|row| row.category_id == category_id)
            .map(|row| row.selected)
    }
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Balanced to at most {} instance(s) per category",
            self.per_category
        )?;
        writeln!(
            f,
            "  input:  {} images, {} categories, {} annotations",
            self.input.images, self.input.categories, self.input.annotations
        )?;
        writeln!(
            f,
            "  output: {} images, {} categories, {} annotations",
            self.output.images, self.output.categories, self.output.annotations
        )?;

        writeln!(f)?;
        writeln!(f, "Per category:")?;
        for row in &self.categories {
            writeln!(
                f,
                "  {:>6}  {:<24} {:>6} / {:<6}",
                row.category_id.as_u64(),
                row.name,
                row.selected,
                row.available
            )?;
        }

        if self.orphaned_annotations > 0 {
            writeln!(f)?;
            writeln!(
                f,
                "Dropped {} annotation(s) with unlisted categories",
                self.orphaned_annotations
            )?;
        }

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", self.warnings.len())?;
            for warning in &self.warnings {
                writeln!(f, "  - {}", warning)?;
            }
        }

        Ok(())
    }
}

/// Counts of store records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BalanceCounts {
    pub images: usize,
    pub categories: usize,
    pub annotations: usize,
}

/// Selection outcome for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategorySelection {
    pub category_id: CategoryId,
    pub name: String,
    pub available: usize,
    pub selected: usize,
}

/// A category with fewer instances than requested; all of them were kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SparseCategory {
    pub category_id: CategoryId,
    pub name: String,
    pub available: usize,
    pub requested: usize,
}

impl fmt::Display for SparseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "category {} ('{}') has only {} instance(s), using all (requested {})",
            self.category_id, self.name, self.available, self.requested
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_warnings() {
        let report = BalanceReport {
            per_category: 150,
            categories: vec![CategorySelection {
                category_id: CategoryId(2),
                name: "bicycle".into(),
                available: 50,
                selected: 50,
            }],
            warnings: vec![SparseCategory {
                category_id: CategoryId(2),
                name: "bicycle".into(),
                available: 50,
                requested: 150,
            }],
            ..Default::default()
        };

        let text = report.to_string();
        assert!(text.contains("Warnings (1):"));
        assert!(text.contains("category 2 ('bicycle') has only 50 instance(s)"));
        assert_eq!(report.selected(CategoryId(2)), Some(50));
        assert_eq!(report.selected(CategoryId(3)), None);
    }

    #[test]
    fn json_omits_missing_seed() {
        let json = serde_json::to_value(BalanceReport::default()).unwrap();
        assert!(json.get("seed").is_none());
        assert_eq!(json["warnings"], serde_json::json!([]));
    }
}
