//! Semester summary tables.
//!
//! Generic PDF table detection does not survive this document's layout, so
//! each table is located by its title line and its `TOTAL` line, the band
//! between them is cropped, and rows are recovered with a fixed-column
//! regex. A [`TableRegion`] bundles those three patterns with the label the
//! table is stored under.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use syllabus_core::{CourseSummary, PageText};

use crate::text_processing::clean_text;

/// Canonical semester labels, in document order.
pub const SEMESTER_LABELS: [&str; 8] = [
    "SEMESTER I",
    "SEMESTER II",
    "SEMESTER III",
    "SEMESTER IV",
    "SEMESTER V",
    "SEMESTER VI",
    "SEMESTER VII",
    "SEMESTER VIII",
];

/// Row layout of the summary tables: slot, 3-letter category, course
/// number, free-text name, L-T-P triple, single-digit hours, credit (may
/// contain `/` or `-`).
pub const DEFAULT_ROW_PATTERN: &str = r"(?P<slot>[A-Z\d/\s½]+)\s+(?P<category>[A-Z]{3})\s+(?P<number>[A-Z0-9]+)\s+(?P<name>.+?)\s+(?P<ltp>[0-9]-[0-9]-[0-9])\s+(?P<hours>[0-9])\s+(?P<credit>[0-9/\-]+)";

pub const DEFAULT_TERMINATOR_PATTERN: &str = r"(?i)TOTAL";

static DEFAULT_REGIONS: Lazy<Vec<TableRegion>> = Lazy::new(|| {
    SEMESTER_LABELS
        .iter()
        .map(|label| TableRegion::for_title(label).unwrap())
        .collect()
});

/// Where a table lives and how its rows look.
///
/// The row pattern names its columns with the groups `slot`, `category`,
/// `number`, `name`, `ltp`, `hours` and `credit`; a group the pattern does
/// not define reads as an empty string.
#[derive(Debug, Clone)]
pub struct TableRegion {
    pub label: String,
    pub title: Regex,
    pub terminator: Regex,
    pub row: Regex,
}

impl TableRegion {
    pub fn new(
        label: impl Into<String>,
        title: &str,
        terminator: &str,
        row: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            label: label.into(),
            title: Regex::new(title)?,
            terminator: Regex::new(terminator)?,
            row: Regex::new(row)?,
        })
    }

    /// Region whose title is `label` itself, matched case-insensitively and
    /// as whole words so that "SEMESTER I" does not hit "SEMESTER II".
    pub fn for_title(label: &str) -> Result<Self, regex::Error> {
        let words: Vec<String> = label.split_whitespace().map(regex::escape).collect();
        let title = format!(r"(?i)\b{}\b", words.join(r"\s+"));
        Self::new(label, &title, DEFAULT_TERMINATOR_PATTERN, DEFAULT_ROW_PATTERN)
    }

    /// The eight semester summary tables.
    pub fn semesters() -> Vec<TableRegion> {
        DEFAULT_REGIONS.clone()
    }
}

/// Rows recovered for one table region.
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterTable {
    pub label: String,
    /// 1-based page the rows came from.
    pub page: usize,
    pub rows: Vec<CourseSummary>,
}

/// Match the region's row pattern against every line of `text`.
pub fn parse_table_text(text: &str, region: &TableRegion) -> Vec<CourseSummary> {
    text.lines()
        .filter_map(|line| region.row.captures(line))
        .map(|caps| summary_from_captures(&caps))
        .collect()
}

fn summary_from_captures(caps: &Captures<'_>) -> CourseSummary {
    let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());
    CourseSummary {
        slot: clean_text(group("slot")),
        category_code: group("category").trim().to_string(),
        course_number: group("number").trim().to_string(),
        name: clean_text(group("name")),
        ltp: group("ltp").trim().to_string(),
        hours: group("hours").trim().to_string(),
        credit: group("credit").trim().to_string(),
    }
}

/// Find the first page holding a non-empty table for `region`.
///
/// A page qualifies when it contains the title and, below it, the
/// terminator. Pages whose cropped band yields no rows are skipped so that
/// a title repeated elsewhere (table of contents, running headers) does not
/// shadow the real table.
pub fn find_table(pages: &[PageText], region: &TableRegion) -> Option<SemesterTable> {
    for (index, page) in pages.iter().enumerate() {
        let Some(title) = page.find(&region.title) else {
            continue;
        };
        let Some(total) = page.find_below(&region.terminator, title.y0) else {
            tracing::debug!(semester = %region.label, page = index + 1, "title without terminator");
            continue;
        };

        let band = page.crop(title.y0, total.y1).layout_text();
        if band.trim().is_empty() {
            continue;
        }

        let rows = parse_table_text(&band, region);
        if rows.is_empty() {
            tracing::debug!(semester = %region.label, page = index + 1, "no table rows in band");
            continue;
        }

        tracing::info!(
            semester = %region.label,
            page = index + 1,
            rows = rows.len(),
            "semester table located"
        );
        return Some(SemesterTable {
            label: region.label.clone(),
            page: index + 1,
            rows,
        });
    }

    tracing::warn!(semester = %region.label, "semester table not found");
    None
}

/// Locate every region's table, keeping region order. Regions with no
/// table are absent from the result.
pub fn parse_semester_tables(pages: &[PageText], regions: &[TableRegion]) -> Vec<SemesterTable> {
    regions
        .iter()
        .filter_map(|region| find_table(pages, region))
        .collect()
}
