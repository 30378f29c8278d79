use std::path::Path;

use thiserror::Error;

use crate::layout::PageText;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF page extraction backends.
///
/// Implementors turn a document into positioned text lines; the parsing
/// pipeline (header sections, course blocks, semester tables) lives in
/// `syllabus_parsing::SyllabusExtractor`.
pub trait PageBackend: Send + Sync {
    /// Extract every page of the document, in page order.
    fn load_pages(&self, path: &Path) -> Result<Vec<PageText>, BackendError>;
}
