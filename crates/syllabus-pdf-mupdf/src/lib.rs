use std::path::Path;

use mupdf::{Document, TextPageFlags};

use syllabus_core::{BackendError, PageBackend, PageText, Rect, TextLine};

/// MuPDF-based implementation of [`PageBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency so
/// that the parsing and query crates do not transitively depend on it.
///
/// Every text line MuPDF reports becomes one [`TextLine`], positioned
/// relative to the page's top-left corner.
#[derive(Debug, Default)]
pub struct MupdfBackend {
    /// Drop lines consisting only of whitespace.
    keep_blank_lines: bool,
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep whitespace-only lines (useful when debugging table bands).
    pub fn with_blank_lines(mut self, keep: bool) -> Self {
        self.keep_blank_lines = keep;
        self
    }
}

impl PageBackend for MupdfBackend {
    fn load_pages(&self, path: &Path) -> Result<Vec<PageText>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let page_bounds = page
                .bounds()
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let mut lines = Vec::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    if !self.keep_blank_lines && text.trim().is_empty() {
                        continue;
                    }
                    let b = line.bounds();
                    lines.push(TextLine::new(
                        text,
                        Rect::new(
                            b.x0 - page_bounds.x0,
                            b.y0 - page_bounds.y0,
                            b.x1 - page_bounds.x0,
                            b.y1 - page_bounds.y0,
                        ),
                    ));
                }
            }

            pages.push(PageText::new(
                page_bounds.x1 - page_bounds.x0,
                page_bounds.y1 - page_bounds.y0,
                lines,
            ));
        }

        Ok(pages)
    }
}
