//! JSON persistence for [`SyllabusDocument`].

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::SyllabusDocument;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid syllabus JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to replace {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Render the document the way it is stored on disk (4-space indent).
pub fn to_pretty_json(document: &SyllabusDocument) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `document` to `path`, replacing any previous version.
///
/// The JSON is written to a temporary file next to `path` and renamed over
/// it, so a failure at any point leaves the existing file untouched.
pub fn save_document(path: &Path, document: &SyllabusDocument) -> Result<(), StoreError> {
    let json = to_pretty_json(document)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| StoreError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;
    tracing::info!(path = %path.display(), bytes = json.len(), "syllabus JSON written");
    Ok(())
}

pub fn load_document(path: &Path) -> Result<SyllabusDocument, StoreError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
