//! COCO JSON reader and writer.
//!
//! COCO bounding boxes use `[x, y, width, height]` where `(x, y)` is the
//! top-left corner in absolute pixel coordinates.
//!
//! Unlike a format converter, these functions never reorder records: the
//! category order of a store decides its training labels, so the writer
//! emits lists exactly as they appear in the [`CocoDataset`].

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::model::CocoDataset;
use crate::error::CocoprepError;

/// Reads a store from a COCO JSON file.
///
/// # Errors
/// Returns [`CocoprepError::AnnotationRead`] if the file cannot be opened and
/// [`CocoprepError::AnnotationParse`] if it is not a COCO document (including
/// a missing `images`, `annotations` or `categories` key).
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use cocoprep::coco::read_coco_json;
///
/// let dataset = read_coco_json(Path::new("labels.json"))?;
/// # Ok::<(), cocoprep::CocoprepError>(())
/// ```
pub fn read_coco_json(path: &Path) -> Result<CocoDataset, CocoprepError> {
    let file = File::open(path).map_err(|source| CocoprepError::AnnotationRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let dataset: CocoDataset =
        serde_json::from_reader(reader).map_err(|source| CocoprepError::AnnotationParse {
            path: path.to_path_buf(),
            source,
        })?;

    log::debug!(
        "loaded {} image(s), {} annotation(s), {} category record(s) from {}",
        dataset.images.len(),
        dataset.annotations.len(),
        dataset.categories.len(),
        path.display()
    );

    Ok(dataset)
}

/// Writes a store to a COCO JSON file, pretty-printed.
pub fn write_coco_json(path: &Path, dataset: &CocoDataset) -> Result<(), CocoprepError> {
    let file = File::create(path).map_err(CocoprepError::Io)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, dataset).map_err(|source| {
        CocoprepError::AnnotationWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush()?;
    Ok(())
}

/// Reads a store from a COCO JSON string.
///
/// Useful for testing without file I/O.
pub fn from_coco_str(json: &str) -> Result<CocoDataset, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a store from a COCO JSON byte slice.
pub fn from_coco_slice(bytes: &[u8]) -> Result<CocoDataset, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a store to a pretty-printed COCO JSON string.
pub fn to_coco_string(dataset: &CocoDataset) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(dataset)
}
