//! Random-access detection dataset over a COCO store.
//!
//! [`CocoDetection`] presents a store as a fixed-length sequence of
//! `(image, target)` pairs. Everything it needs is built once at
//! construction and never written again, so a shared reference can serve
//! `get` from any number of loader threads.
//!
//! ```no_run
//! use cocoprep::index::CocoDetection;
//!
//! let dataset = CocoDetection::new("data/coco_top10_2000/data", "data/coco_top10_2000/labels.json")?;
//! for i in 0..dataset.len() {
//!     let (image, target) = dataset.get(i)?;
//!     println!("{}x{}: {} box(es)", image.width(), image.height(), target.len());
//! }
//! # Ok::<(), cocoprep::CocoprepError>(())
//! ```

mod label_map;
mod target;

pub use label_map::{LabelEntry, LabelMap, BACKGROUND_LABEL};
pub use target::Target;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageReader, RgbImage};

use crate::coco::{read_coco_json, CocoDataset, Image, ImageId};
use crate::error::CocoprepError;

/// Transform used when the caller supplies none: returns the image unchanged.
pub type Identity = fn(RgbImage) -> Result<RgbImage, CocoprepError>;

fn identity(image: RgbImage) -> Result<RgbImage, CocoprepError> {
    Ok(image)
}

/// A COCO store indexed for positional retrieval.
///
/// Position `i` addresses the `i`-th smallest distinct image id. The
/// transform `T` is applied to every decoded image; see
/// [`with_transform`](Self::with_transform).
pub struct CocoDetection<T = Identity> {
    root: PathBuf,
    dataset: CocoDataset,
    ids: Vec<ImageId>,
    images: HashMap<ImageId, usize>,
    annotations: HashMap<ImageId, Vec<usize>>,
    labels: LabelMap,
    transform: T,
}

impl CocoDetection {
    /// Loads the annotation file and indexes it against an image root.
    ///
    /// Image files are not touched until [`get`](Self::get).
    ///
    /// # Errors
    /// Returns a load error if the annotation file is unreadable or is not a
    /// COCO document.
    pub fn new(
        root: impl Into<PathBuf>,
        annotation_file: impl AsRef<Path>,
    ) -> Result<Self, CocoprepError> {
        let dataset = read_coco_json(annotation_file.as_ref())?;
        Ok(Self::from_dataset(root, dataset))
    }

    /// Indexes an already parsed store.
    pub fn from_dataset(root: impl Into<PathBuf>, dataset: CocoDataset) -> Self {
        let mut images: HashMap<ImageId, usize> = HashMap::with_capacity(dataset.images.len());
        for (pos, image) in dataset.images.iter().enumerate() {
            images.entry(image.id).or_insert(pos);
        }

        let mut ids: Vec<ImageId> = images.keys().copied().collect();
        ids.sort();

        let mut annotations: HashMap<ImageId, Vec<usize>> = HashMap::new();
        for (pos, ann) in dataset.annotations.iter().enumerate() {
            annotations.entry(ann.image_id).or_default().push(pos);
        }

        let labels = LabelMap::from_categories(&dataset.categories);

        log::debug!(
            "indexed {} image(s) with {} label(s)",
            ids.len(),
            labels.len()
        );

        Self {
            root: root.into(),
            dataset,
            ids,
            images,
            annotations,
            labels,
            transform: identity,
        }
    }
}

impl<T> CocoDetection<T> {
    /// Replaces the image transform.
    ///
    /// The transform receives the decoded RGB image. Its error type must be
    /// able to hold a [`CocoprepError`] so that decode failures and transform
    /// failures come back through the same `Result`; transform errors are
    /// returned as produced.
    pub fn with_transform<F, O, E>(self, transform: F) -> CocoDetection<F>
    where
        F: Fn(RgbImage) -> Result<O, E>,
        E: From<CocoprepError>,
    {
        CocoDetection {
            root: self.root,
            dataset: self.dataset,
            ids: self.ids,
            images: self.images,
            annotations: self.annotations,
            labels: self.labels,
            transform,
        }
    }

    /// Number of distinct images.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The label table built from the store's category list.
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// The underlying store.
    pub fn dataset(&self) -> &CocoDataset {
        &self.dataset
    }

    /// Image id at a position.
    pub fn image_id(&self, index: usize) -> Result<ImageId, CocoprepError> {
        self.ids
            .get(index)
            .copied()
            .ok_or(CocoprepError::IndexOutOfRange {
                index,
                len: self.ids.len(),
            })
    }

    /// Image record at a position.
    pub fn image(&self, index: usize) -> Result<&Image, CocoprepError> {
        let id = self.image_id(index)?;
        // Every id in `ids` came from `images`.
        Ok(&self.dataset.images[self.images[&id]])
    }

    /// Path of the image file at a position.
    pub fn image_path(&self, index: usize) -> Result<PathBuf, CocoprepError> {
        Ok(self.root.join(&self.image(index)?.file_name))
    }

    /// Target at a position, without decoding the image.
    pub fn target(&self, index: usize) -> Result<Target, CocoprepError> {
        let id = self.image_id(index)?;
        let anns = self
            .annotations
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&pos| &self.dataset.annotations[pos]);

        Ok(Target::collect(id, anns, &self.labels))
    }

    /// Decodes the image at a position to 8-bit RGB, without the transform.
    pub fn load_image(&self, index: usize) -> Result<RgbImage, CocoprepError> {
        decode_rgb(&self.image_path(index)?)
    }

    /// Decoded, transformed image and its target at a position.
    ///
    /// # Errors
    /// - [`CocoprepError::IndexOutOfRange`] if `index >= len()`
    /// - [`CocoprepError::ImageRead`] if the image file is missing or unreadable
    /// - [`CocoprepError::ImageDecode`] if it is not a decodable image
    /// - whatever the transform returns
    pub fn get<O, E>(&self, index: usize) -> Result<(O, Target), E>
    where
        T: Fn(RgbImage) -> Result<O, E>,
        E: From<CocoprepError>,
    {
        let target = self.target(index)?;
        let image = self.load_image(index)?;
        let image = (self.transform)(image)?;
        Ok((image, target))
    }
}

/// Decodes by content; the extension is only a fallback when the leading
/// bytes match no known format.
fn decode_rgb(path: &Path) -> Result<RgbImage, CocoprepError> {
    let read_error = |source: std::io::Error| CocoprepError::ImageRead {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(read_error)?
        .with_guessed_format()
        .map_err(read_error)?;

    let decoded = reader.decode().map_err(|err| match err {
        ImageError::IoError(source) => CocoprepError::ImageRead {
            path: path.to_path_buf(),
            source,
        },
        source => CocoprepError::ImageDecode {
            path: path.to_path_buf(),
            source,
        },
    })?;

    Ok(decoded.to_rgb8())
}
