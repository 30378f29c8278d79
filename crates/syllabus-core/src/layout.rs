//! Positioned page text.
//!
//! A [`PageText`] is the backend-neutral view of one PDF page: a list of
//! text lines with bounding boxes in page coordinates (origin top-left,
//! y growing downwards). Table parsing only needs three operations on it:
//! search by pattern with position, crop to a horizontal band, and render
//! the band back to text with column gaps preserved.

use regex::Regex;

/// Axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn center_y(&self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }
}

/// A run of text sharing one baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub bbox: Rect,
}

impl TextLine {
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// Fallback glyph width when a page has no measurable text.
const DEFAULT_CHAR_WIDTH: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageText {
    pub width: f32,
    pub height: f32,
    /// Lines in reading order (top to bottom, then left to right).
    lines: Vec<TextLine>,
}

impl PageText {
    pub fn new(width: f32, height: f32, mut lines: Vec<TextLine>) -> Self {
        lines.sort_by(|a, b| {
            a.bbox
                .y0
                .total_cmp(&b.bbox.y0)
                .then(a.bbox.x0.total_cmp(&b.bbox.x0))
        });
        Self {
            width,
            height,
            lines,
        }
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.text.trim().is_empty())
    }

    /// Bounding box of the first line (reading order) matching `pattern`.
    pub fn find(&self, pattern: &Regex) -> Option<Rect> {
        self.lines
            .iter()
            .find(|l| pattern.is_match(&l.text))
            .map(|l| l.bbox)
    }

    /// Like [`find`](Self::find) but only considers lines whose bottom edge
    /// lies strictly below `y`.
    pub fn find_below(&self, pattern: &Regex, y: f32) -> Option<Rect> {
        self.lines
            .iter()
            .find(|l| l.bbox.y1 > y && pattern.is_match(&l.text))
            .map(|l| l.bbox)
    }

    /// Keep only the lines whose vertical centre falls inside `[top, bottom]`.
    /// The page width is kept so column positions stay comparable.
    pub fn crop(&self, top: f32, bottom: f32) -> PageText {
        let lines = self
            .lines
            .iter()
            .filter(|l| {
                let c = l.bbox.center_y();
                c >= top && c <= bottom
            })
            .cloned()
            .collect();
        PageText {
            width: self.width,
            height: bottom - top,
            lines,
        }
    }

    /// Plain reading-order text: one output line per visual row, segments
    /// joined by a single space.
    pub fn text(&self) -> String {
        self.rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|l| l.text.trim())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Layout-preserving text: segments are placed at the character column
    /// implied by their x position, so table columns stay separated by runs
    /// of spaces even when the PDF emits each cell as its own line.
    pub fn layout_text(&self) -> String {
        let char_width = self.mean_char_width();
        self.rows()
            .iter()
            .map(|row| {
                let mut out = String::new();
                let mut cursor = 0usize;
                for line in row {
                    let column = (line.bbox.x0.max(0.0) / char_width).round() as usize;
                    let pad = if out.is_empty() {
                        column
                    } else {
                        column.saturating_sub(cursor).max(1)
                    };
                    out.push_str(&" ".repeat(pad));
                    out.push_str(&line.text);
                    cursor = out.chars().count();
                }
                out.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn mean_char_width(&self) -> f32 {
        let (width, chars) = self
            .lines
            .iter()
            .map(|l| (l.bbox.width(), l.text.chars().count()))
            .filter(|&(w, n)| w > 0.0 && n > 0)
            .fold((0.0f32, 0usize), |(w, n), (lw, ln)| (w + lw, n + ln));
        if chars == 0 {
            DEFAULT_CHAR_WIDTH
        } else {
            width / chars as f32
        }
    }

    /// Group lines into visual rows by vertical overlap, each row sorted
    /// left to right.
    fn rows(&self) -> Vec<Vec<&TextLine>> {
        let mut rows: Vec<Vec<&TextLine>> = Vec::new();
        for line in &self.lines {
            if let Some(row) = rows.last_mut().filter(|row| same_row(row[0], line)) {
                row.push(line);
                continue;
            }
            rows.push(vec![line]);
        }
        for row in &mut rows {
            row.sort_by(|a, b| a.bbox.x0.total_cmp(&b.bbox.x0));
        }
        rows
    }
}

fn same_row(a: &TextLine, b: &TextLine) -> bool {
    let tolerance = (a.bbox.height().min(b.bbox.height()) * 0.5).max(1.0);
    (a.bbox.center_y() - b.bbox.center_y()).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, x0: f32, y0: f32) -> TextLine {
        let width = text.chars().count() as f32 * 5.0;
        TextLine::new(text, Rect::new(x0, y0, x0 + width, y0 + 10.0))
    }

    fn page() -> PageText {
        PageText::new(
            600.0,
            800.0,
            vec![
                line("TOTAL 20", 10.0, 300.0),
                line("SEMESTER I", 10.0, 100.0),
                line("3-1-0", 300.0, 150.0),
                line("A PCC CS2U401L", 10.0, 150.0),
                line("Footer", 10.0, 700.0),
            ],
        )
    }

    #[test]
    fn lines_are_in_reading_order() {
        let p = page();
        let texts: Vec<_> = p.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["SEMESTER I", "A PCC CS2U401L", "3-1-0", "TOTAL 20", "Footer"]
        );
    }

    #[test]
    fn find_returns_position_of_first_match() {
        let p = page();
        let re = Regex::new(r"(?i)total").unwrap();
        let rect = p.find(&re).unwrap();
        assert_eq!(rect.y0, 300.0);
        assert!(p.find(&Regex::new("MISSING").unwrap()).is_none());
    }

    #[test]
    fn find_below_skips_lines_above() {
        let p = PageText::new(
            600.0,
            800.0,
            vec![line("TOTAL 1", 10.0, 50.0), line("TOTAL 2", 10.0, 400.0)],
        );
        let re = Regex::new("TOTAL").unwrap();
        assert_eq!(p.find_below(&re, 100.0).unwrap().y0, 400.0);
    }

    #[test]
    fn crop_keeps_band_only() {
        let cropped = page().crop(100.0, 310.0);
        assert_eq!(cropped.lines().len(), 4);
        assert!(!cropped.text().contains("Footer"));
    }

    #[test]
    fn text_joins_cells_on_the_same_row() {
        let text = page().crop(140.0, 170.0).text();
        assert_eq!(text, "A PCC CS2U401L 3-1-0");
    }

    #[test]
    fn layout_text_preserves_column_gap() {
        let text = page().crop(140.0, 170.0).layout_text();
        assert!(text.starts_with("  A PCC CS2U401L"));
        assert!(text.contains("CS2U401L   "));
        assert!(text.ends_with("3-1-0"));
    }

    #[test]
    fn empty_page_uses_default_char_width() {
        let p = PageText::new(100.0, 100.0, vec![]);
        assert!(p.is_empty());
        assert_eq!(p.layout_text(), "");
    }
}
