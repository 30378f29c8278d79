use std::path::Path;

use thiserror::Error;

pub mod assemble;
pub mod config;
pub mod courses;
pub mod extractor;
pub mod header;
pub mod section;
pub mod table;
pub mod text_processing;

pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use extractor::SyllabusExtractor;
pub use section::{SectionError, extract_between, extract_section};
pub use table::{SemesterTable, TableRegion};
pub use text_processing::clean_text;
// Re-export domain types from core (canonical definitions live there)
pub use syllabus_core::{BackendError, PageBackend, PageText, SyllabusDocument};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Extract the structured syllabus from a PDF using the given backend.
///
/// Pipeline:
/// 1. Load positioned page text via `backend`
/// 2. Extract the front-matter sections (vision/mission, PEOs, POs, PSOs)
/// 3. Parse every "COURSE OVERVIEW:" block into the master detail map
/// 4. Locate and parse the semester summary tables
/// 5. Join table rows with course details
pub fn extract_syllabus(
    pdf_path: &Path,
    backend: &dyn PageBackend,
) -> Result<SyllabusDocument, ExtractError> {
    SyllabusExtractor::new().extract(pdf_path, backend)
}
