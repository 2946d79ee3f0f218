//! Class-balanced subsets of a COCO store.
//!
//! Every category in the store's category list keeps at most `N` of its
//! annotations, drawn uniformly at random without replacement. An image that
//! carries several categories can be picked by more than one of them; it is
//! still written once.

mod report;

pub use report::{BalanceCounts, BalanceReport, CategorySelection, SparseCategory};

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::coco::{read_coco_json, write_coco_json, CategoryId, CocoDataset, ImageId};
use crate::error::CocoprepError;

/// Instances per category when none is given.
pub const DEFAULT_PER_CATEGORY: usize = 150;

/// Balancing options.
#[derive(Clone, Debug)]
pub struct BalanceOptions {
    /// Maximum number of annotations kept per category.
    pub per_category: usize,
    /// Seed for reproducible runs. `None` draws from the thread-local RNG.
    pub seed: Option<u64>,
}

impl Default for BalanceOptions {
    fn default() -> Self {
        Self {
            per_category: DEFAULT_PER_CATEGORY,
            seed: None,
        }
    }
}

/// Validate balancing options before running.
pub fn validate_balance_options(opts: &BalanceOptions) -> Result<(), CocoprepError> {
    if opts.per_category == 0 {
        return Err(CocoprepError::InvalidBalanceParams {
            message: "-n must be greater than 0".to_string(),
        });
    }
    Ok(())
}

/// Balance a store according to options.
///
/// Returns the balanced store together with a report of what was selected.
/// Sparse categories are reported, never an error.
pub fn balance_dataset(
    dataset: &CocoDataset,
    opts: &BalanceOptions,
) -> Result<(CocoDataset, BalanceReport), CocoprepError> {
    validate_balance_options(opts)?;

    let (balanced, mut report) = if let Some(seed) = opts.seed {
        let mut rng = StdRng::seed_from_u64(seed);
        balance_with_rng(dataset, opts.per_category, &mut rng)
    } else {
        let mut rng = rand::rng();
        balance_with_rng(dataset, opts.per_category, &mut rng)
    };

    report.seed = opts.seed;
    Ok((balanced, report))
}

/// Read a store, balance it and write the result.
pub fn balance_file(
    input: &Path,
    output: &Path,
    opts: &BalanceOptions,
) -> Result<BalanceReport, CocoprepError> {
    validate_balance_options(opts)?;

    let dataset = read_coco_json(input)?;
    let (balanced, report) = balance_dataset(&dataset, opts)?;
    write_coco_json(output, &balanced)?;

    log::info!(
        "wrote {} image(s) and {} annotation(s) to {}",
        report.output.images,
        report.output.annotations,
        output.display()
    );

    Ok(report)
}

/// Balance with a caller-supplied random source.
///
/// Categories are visited in category-list order and draw from `rng` in that
/// order, so a seeded generator gives the same subset on every run. A
/// category id listed twice is sampled once.
pub fn balance_with_rng<R: Rng + ?Sized>(
    dataset: &CocoDataset,
    per_category: usize,
    rng: &mut R,
) -> (CocoDataset, BalanceReport) {
    let (partitions, orphaned) = partition_by_category(dataset);

    let mut report = BalanceReport {
        per_category,
        input: counts(dataset),
        orphaned_annotations: orphaned,
        ..Default::default()
    };

    let mut selected: Vec<usize> = Vec::new();
    let mut visited: HashSet<CategoryId> = HashSet::new();

    for category in &dataset.categories {
        if !visited.insert(category.id) {
            continue;
        }

        let mut picked = partitions.get(&category.id).cloned().unwrap_or_default();
        let available = picked.len();

        if available < per_category {
            log::warn!(
                "category {} ('{}') has only {} instance(s), using all",
                category.id,
                category.name,
                available
            );
            report.warnings.push(SparseCategory {
                category_id: category.id,
                name: category.name.clone(),
                available,
                requested: per_category,
            });
        } else {
            picked.shuffle(rng);
            picked.truncate(per_category);
        }

        log::debug!(
            "category {}: selected {} of {}",
            category.id,
            picked.len(),
            available
        );

        report.categories.push(CategorySelection {
            category_id: category.id,
            name: category.name.clone(),
            available,
            selected: picked.len(),
        });
        selected.extend(picked);
    }

    // Source order, independent of the order categories were drawn in.
    selected.sort_unstable();

    let annotations: Vec<_> = selected
        .iter()
        .map(|&pos| dataset.annotations[pos].clone())
        .collect();

    let referenced: HashSet<ImageId> = annotations.iter().map(|ann| ann.image_id).collect();
    let mut emitted: HashSet<ImageId> = HashSet::with_capacity(referenced.len());
    let images = dataset
        .images
        .iter()
        .filter(|image| referenced.contains(&image.id) && emitted.insert(image.id))
        .cloned()
        .collect();

    let balanced = CocoDataset {
        images,
        annotations,
        categories: dataset.categories.clone(),
        extra: dataset.extra.clone(),
    };

    report.output = counts(&balanced);
    (balanced, report)
}

/// Annotation positions per listed category, in source order, plus the
/// number of annotations whose category is not listed.
fn partition_by_category(dataset: &CocoDataset) -> (HashMap<CategoryId, Vec<usize>>, usize) {
    let mut partitions: HashMap<CategoryId, Vec<usize>> = dataset
        .categories
        .iter()
        .map(|cat| (cat.id, Vec::new()))
        .collect();
    let mut orphaned = 0;

    for (pos, ann) in dataset.annotations.iter().enumerate() {
        match partitions.get_mut(&ann.category_id) {
            Some(partition) => partition.push(pos),
            None => orphaned += 1,
        }
    }

    (partitions, orphaned)
}

fn counts(dataset: &CocoDataset) -> BalanceCounts {
    BalanceCounts {
        images: dataset.images.len(),
        categories: dataset.categories.len(),
        annotations: dataset.annotations.len(),
    }
}
