use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use syllabus_core::CourseDetail;

use crate::section::extract_section;

/// Marker that opens every detailed course description.
pub const COURSE_MARKER: &str = "COURSE OVERVIEW:";

/// Course code token, e.g. `CS2U401L`: 2-3 uppercase letters, a digit, `U`,
/// then 3-7 uppercase alphanumerics.
pub static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{2,3}[0-9]U[0-9A-Z]{3,7})\b").unwrap());

/// Split the document into course blocks, one per [`COURSE_MARKER`].
///
/// The text before the first marker is discarded; the marker is put back
/// at the start of every block.
pub fn split_course_blocks(text: &str) -> Vec<String> {
    static MARKER_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(&format!("(?i){}", regex::escape(COURSE_MARKER))).unwrap());

    MARKER_RE
        .split(text)
        .skip(1)
        .map(|rest| format!("{COURSE_MARKER}{rest}"))
        .collect()
}

/// First course code token in `block`, if any.
pub fn find_course_code(block: &str) -> Option<&str> {
    COURSE_CODE_RE
        .captures(block)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Extract the named sub-sections of one course block.
pub fn parse_course_block(block: &str, code: &str) -> CourseDetail {
    CourseDetail {
        course_name: extract_section(block, code, Some(COURSE_MARKER)),
        overview: extract_section(block, COURSE_MARKER, Some("COURSE OUTCOMES")),
        outcomes: extract_section(block, "COURSE OUTCOMES", Some("SYLLABUS")),
        syllabus: extract_section(block, "SYLLABUS", Some("TEXT BOOKS")),
        textbooks: extract_section(block, "TEXT BOOKS", Some("REFERENCES")),
        references: extract_section(block, "REFERENCES", Some("COURSE PLAN")),
        course_plan: extract_section(block, "COURSE PLAN", None),
    }
}

/// Build the master course-code → detail map from the full document text.
///
/// Blocks with no recognizable course code are skipped. When a code occurs
/// in more than one block the last one wins.
pub fn parse_course_details(text: &str) -> BTreeMap<String, CourseDetail> {
    let mut courses = BTreeMap::new();

    for (index, block) in split_course_blocks(text).iter().enumerate() {
        let Some(code) = find_course_code(block) else {
            tracing::debug!(block = index, "no course code in block, skipping");
            continue;
        };
        courses.insert(code.to_string(), parse_course_block(block, code));
    }

    courses
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::NOT_FOUND;

    #[test]
    fn test_split_discards_preamble_and_reattaches_marker() {
        let text = "preamble\nCOURSE OVERVIEW: one\ncourse overview: two";
        let blocks = split_course_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0], "COURSE OVERVIEW: one\n");
        assert_eq!(blocks[1], "COURSE OVERVIEW: two");
    }

    #[test]
    fn test_split_without_marker_is_empty() {
        assert!(split_course_blocks("no courses at all").is_empty());
    }

    #[test]
    fn test_find_course_code() {
        assert_eq!(find_course_code("see CS2U401L here"), Some("CS2U401L"));
        assert_eq!(find_course_code("MAT1U10101ABC x"), None);
        assert_eq!(find_course_code("cs2u401l lowercase"), None);
        assert_eq!(find_course_code("ABC1U12"), None);
    }

    #[test]
    fn test_block_without_code_is_dropped() {
        let text = "COURSE OVERVIEW: general notes\nCOURSE OUTCOMES none";
        assert!(parse_course_details(text).is_empty());
    }

    #[test]
    fn test_single_course_without_textbooks() {
        let text = "Preface\nCOURSE OVERVIEW: Intro to X\nCOURSE OUTCOMES\nCO1 Understand X\n\
                    SYLLABUS\nUnit 1 CS2U401L basics\nREFERENCES\nSome book\nCOURSE PLAN\nWeek 1";
        let courses = parse_course_details(text);
        assert_eq!(courses.len(), 1);
        let detail = &courses["CS2U401L"];
        assert_eq!(detail.overview, "Intro to X");
        assert_eq!(detail.outcomes, "CO1 Understand X");
        assert_eq!(detail.textbooks, NOT_FOUND);
        assert_eq!(detail.syllabus, NOT_FOUND);
        assert_eq!(detail.references, "Some book");
        assert_eq!(detail.course_plan, "Week 1");
    }

    #[test]
    fn test_duplicate_code_last_write_wins() {
        let text = "COURSE OVERVIEW: first CS2U401L COURSE OUTCOMES a\n\
                    COURSE OVERVIEW: second CS2U401L COURSE OUTCOMES b";
        let courses = parse_course_details(text);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses["CS2U401L"].overview, "second CS2U401L");
    }

    #[test]
    fn test_course_name_needs_following_marker() {
        let block = "COURSE OVERVIEW: Intro CS2U401L Data Structures";
        let detail = parse_course_block(block, "CS2U401L");
        assert_eq!(detail.course_name, NOT_FOUND);
    }
}
