//! Category id to contiguous training label mapping.

use std::collections::HashMap;

use serde::Serialize;

use crate::coco::{Category, CategoryId};

/// Label reserved for "no object".
pub const BACKGROUND_LABEL: usize = 0;

/// One row of the label table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    pub label: usize,
    pub category_id: CategoryId,
    pub name: String,
}

/// Immutable two-way table between raw category ids and contiguous labels.
///
/// Labels start at 1 and follow the order of the category list, so the same
/// categories listed in a different order produce different labels. Raw id
/// values play no part in the assignment.
#[derive(Clone, Debug, Default)]
pub struct LabelMap {
    entries: Vec<LabelEntry>,
    by_category: HashMap<CategoryId, usize>,
}

impl LabelMap {
    /// Builds the table from a category list, in list order.
    ///
    /// If the list repeats an id, the later entry owns the lookup for that
    /// id; every entry still gets its own label and class name.
    pub fn from_categories(categories: &[Category]) -> Self {
        let entries: Vec<LabelEntry> = categories
            .iter()
            .enumerate()
            .map(|(pos, cat)| LabelEntry {
                label: pos + 1,
                category_id: cat.id,
                name: cat.name.clone(),
            })
            .collect();

        let by_category = entries
            .iter()
            .map(|entry| (entry.category_id, entry.label))
            .collect();

        Self {
            entries,
            by_category,
        }
    }

    /// Label for a category, or `None` if it is outside the label space.
    pub fn label(&self, category_id: CategoryId) -> Option<usize> {
        self.by_category.get(&category_id).copied()
    }

    /// Category id behind a label. The background label has none.
    pub fn category_id(&self, label: usize) -> Option<CategoryId> {
        self.entry(label).map(|entry| entry.category_id)
    }

    /// Class name behind a label.
    pub fn name(&self, label: usize) -> Option<&str> {
        self.entry(label).map(|entry| entry.name.as_str())
    }

    /// Class names in label order (index 0 holds label 1).
    pub fn class_names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    /// Number of labels, background excluded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, label: usize) -> Option<&LabelEntry> {
        if label == BACKGROUND_LABEL {
            return None;
        }
        self.entries.get(label - 1)
    }
}
