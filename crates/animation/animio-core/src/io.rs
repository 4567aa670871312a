//! Reading and writing animation documents on disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::CodecConfig;
use crate::data::AnimationDocument;
use crate::error::{AnimIoError, Result};
use crate::stored_document::{document_to_json, parse_document_json};

/// `path` with `.json` appended unless it already ends in `.json`.
pub fn with_json_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "json") {
        return path.to_path_buf();
    }
    let mut s = path.as_os_str().to_owned();
    s.push(".json");
    PathBuf::from(s)
}

/// Write `doc` to `path` (extension enforced). Returns the path actually written.
///
/// The text is rendered completely before the file is opened, so a
/// serialization failure never leaves a partial file.
pub fn write_document(path: impl AsRef<Path>, doc: &AnimationDocument) -> Result<PathBuf> {
    write_document_with(path, doc, &CodecConfig::default())
}

pub fn write_document_with(
    path: impl AsRef<Path>,
    doc: &AnimationDocument,
    cfg: &CodecConfig,
) -> Result<PathBuf> {
    let path = with_json_extension(path.as_ref());
    let text = document_to_json(doc, cfg)?;
    fs::write(&path, text).map_err(|source| AnimIoError::Io {
        path: path.clone(),
        source,
    })?;
    info!("Successfully wrote animation data to {}", path.display());
    Ok(path)
}

/// Read and validate a document from `path`.
pub fn read_document(path: impl AsRef<Path>) -> Result<AnimationDocument> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| AnimIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_document_json(&text)?;
    info!("Successfully read animation data from {}", path.display());
    Ok(doc)
}
