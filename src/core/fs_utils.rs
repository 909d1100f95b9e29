//! File system utility helpers (BOM-aware readers, file type detection)
use std::fs;
use std::path::Path;

use super::errors::{DedupError, DedupResult};
use super::FileType;

/// Read a document as UTF-8 text, stripping UTF-8 BOM if present.
pub fn read_document(path: &Path) -> DedupResult<String> {
    let mut content = fs::read_to_string(path).map_err(|e| DedupError::io(path, e))?;
    if content.starts_with('\u{FEFF}') {
        content = content.trim_start_matches('\u{FEFF}').to_string();
    }
    Ok(content)
}

/// True for files the analyzer knows how to handle.
pub fn is_supported_document(path: &Path) -> bool {
    FileType::from_path(path).is_ok()
}
