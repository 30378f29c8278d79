//! Keyword-delimited section extraction.
//!
//! [`extract_between`] is the typed form: callers can tell a section that
//! is absent from the source apart from an internal pattern failure.
//! [`extract_section`] is the tolerant form used by the pipeline, which
//! records every failure as the [`NOT_FOUND`] sentinel and carries on.

use regex::Regex;
use syllabus_core::NOT_FOUND;
use thiserror::Error;

use crate::text_processing::clean_text;

#[derive(Error, Debug)]
pub enum SectionError {
    #[error("start keyword {0:?} not found")]
    StartNotFound(String),
    #[error("end keyword {0:?} not found after start keyword")]
    EndNotFound(String),
    #[error("invalid section pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Return the cleaned text strictly between the first case-insensitive
/// occurrence of `start` and the first occurrence of `end` after it.
/// With no `end`, everything after `start` is returned. `.` matches
/// newlines.
pub fn extract_between(text: &str, start: &str, end: Option<&str>) -> Result<String, SectionError> {
    let start_esc = regex::escape(start);
    let pattern = match end {
        Some(end) => format!("(?is){}(.*?){}", start_esc, regex::escape(end)),
        None => format!("(?is){}(.*)", start_esc),
    };
    let re = Regex::new(&pattern)?;

    if let Some(caps) = re.captures(text) {
        let body = caps.get(1).map_or("", |m| m.as_str());
        return Ok(clean_text(body.trim()));
    }

    let start_re = Regex::new(&format!("(?i){}", start_esc))?;
    if start_re.is_match(text) {
        Err(SectionError::EndNotFound(end.unwrap_or_default().to_string()))
    } else {
        Err(SectionError::StartNotFound(start.to_string()))
    }
}

/// Sentinel form of [`extract_between`]: any failure yields `"Not Found"`.
pub fn extract_section(text: &str, start: &str, end: Option<&str>) -> String {
    match extract_between(text, start, end) {
        Ok(section) => section,
        Err(SectionError::Pattern(e)) => {
            tracing::warn!(start, end, error = %e, "section pattern failed");
            NOT_FOUND.to_string()
        }
        Err(e) => {
            tracing::debug!(error = %e, "section not located");
            NOT_FOUND.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_between_basic() {
        let text = "Intro\nCOURSE OUTCOMES\nCO1 Learn things\nSYLLABUS\nUnit 1";
        let section = extract_between(text, "COURSE OUTCOMES", Some("SYLLABUS")).unwrap();
        assert_eq!(section, "CO1 Learn things");
    }

    #[test]
    fn test_extract_between_is_case_insensitive() {
        let text = "vision and mission of the institution\nTo excel.\nDepartment of Computer Science and Engineering";
        let section = extract_between(
            text,
            "Vision and Mission of the Institution",
            Some("DEPARTMENT OF COMPUTER SCIENCE AND ENGINEERING"),
        )
        .unwrap();
        assert_eq!(section, "To excel.");
    }

    #[test]
    fn test_extract_between_uses_first_end_after_start() {
        let text = "END early START one END two END";
        assert_eq!(extract_between(text, "START", Some("END")).unwrap(), "one");
    }

    #[test]
    fn test_extract_between_spans_lines() {
        let text = "TEXT BOOKS\n1. Knuth\n\n2. Cormen\nREFERENCES";
        assert_eq!(
            extract_between(text, "TEXT BOOKS", Some("REFERENCES")).unwrap(),
            "1. Knuth 2. Cormen"
        );
    }

    #[test]
    fn test_extract_between_without_end_takes_rest() {
        let text = "COURSE PLAN\nWeek 1: arrays\nWeek 2: lists\n";
        assert_eq!(
            extract_between(text, "COURSE PLAN", None).unwrap(),
            "Week 1: arrays Week 2: lists"
        );
    }

    #[test]
    fn test_extract_between_escapes_keywords() {
        let text = "PROGRAMME OUTCOMES (POs) PO1: Engineering knowledge PROGRAMME SPECIFIC OUTCOMES (PSOs)";
        assert_eq!(
            extract_between(
                text,
                "PROGRAMME OUTCOMES (POs)",
                Some("PROGRAMME SPECIFIC OUTCOMES (PSOs)")
            )
            .unwrap(),
            "PO1: Engineering knowledge"
        );
    }

    #[test]
    fn test_extract_between_distinguishes_missing_start_and_end() {
        assert!(matches!(
            extract_between("nothing here", "SYLLABUS", Some("TEXT BOOKS")),
            Err(SectionError::StartNotFound(_))
        ));
        assert!(matches!(
            extract_between("SYLLABUS unit 1", "SYLLABUS", Some("TEXT BOOKS")),
            Err(SectionError::EndNotFound(_))
        ));
    }

    #[test]
    fn test_extract_section_missing_start_is_sentinel() {
        let texts = ["", "abc", "TEXT BOOKS only", "syllabu s"];
        for text in texts {
            assert_eq!(extract_section(text, "SYLLABUS", Some("TEXT BOOKS")), NOT_FOUND);
            assert_eq!(extract_section(text, "SYLLABUS", None), NOT_FOUND);
        }
    }

    #[test]
    fn test_extract_section_missing_end_is_sentinel() {
        assert_eq!(
            extract_section("TEXT BOOKS Knuth", "TEXT BOOKS", Some("REFERENCES")),
            NOT_FOUND
        );
    }

    #[test]
    fn test_extract_section_empty_body_is_empty_string() {
        assert_eq!(extract_section("SYLLABUS\nTEXT BOOKS", "SYLLABUS", Some("TEXT BOOKS")), "");
    }

    #[test]
    fn test_extract_section_is_deterministic() {
        let text = "A\nCOURSE OVERVIEW: something\nCOURSE OUTCOMES x";
        let first = extract_section(text, "COURSE OVERVIEW:", Some("COURSE OUTCOMES"));
        let second = extract_section(text, "COURSE OVERVIEW:", Some("COURSE OUTCOMES"));
        assert_eq!(first, second);
    }
}
