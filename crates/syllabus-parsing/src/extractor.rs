use std::collections::BTreeMap;
use std::path::Path;

use syllabus_core::{CourseDetail, HeaderInfo, PageBackend, PageText, SyllabusDocument};

use crate::config::ParsingConfig;
use crate::table::SemesterTable;
use crate::{ExtractError, assemble, courses, header, table};

/// A configurable syllabus extraction pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each pipeline step as a method.
pub struct SyllabusExtractor {
    config: ParsingConfig,
}

impl Default for SyllabusExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SyllabusExtractor {
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Full document text: every page's reading-order text joined by newlines.
    pub fn full_text(&self, pages: &[PageText]) -> String {
        pages
            .iter()
            .map(PageText::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Front-matter sections (step 1).
    pub fn header_info(&self, text: &str) -> HeaderInfo {
        header::extract_header_info(text, self.config.header_sections())
    }

    /// Master course-code → detail map (step 2).
    pub fn course_details(&self, text: &str) -> BTreeMap<String, CourseDetail> {
        courses::parse_course_details(text)
    }

    /// Semester summary tables (step 3).
    pub fn semester_tables(&self, pages: &[PageText]) -> Vec<SemesterTable> {
        table::parse_semester_tables(pages, self.config.table_regions())
    }

    /// Run the full pipeline on a PDF file.
    pub fn extract(
        &self,
        path: &Path,
        backend: &dyn PageBackend,
    ) -> Result<SyllabusDocument, ExtractError> {
        let pages = backend.load_pages(path)?;
        tracing::info!(path = %path.display(), pages = pages.len(), "PDF pages loaded");
        Ok(self.extract_from_pages(&pages))
    }

    /// Run the pipeline on already-loaded pages.
    pub fn extract_from_pages(&self, pages: &[PageText]) -> SyllabusDocument {
        let text = self.full_text(pages);

        tracing::info!("parsing header information");
        let header_info = self.header_info(&text);

        tracing::info!("parsing detailed course descriptions");
        let details = self.course_details(&text);
        tracing::info!(courses = details.len(), "course details found");

        tracing::info!("parsing semester summary tables");
        let tables = self.semester_tables(pages);

        tracing::info!(semesters = tables.len(), "assembling syllabus");
        assemble::assemble(header_info, &tables, &details)
    }
}
