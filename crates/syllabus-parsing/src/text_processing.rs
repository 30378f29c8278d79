use once_cell::sync::Lazy;
use regex::Regex;

/// Normalize whitespace in raw extracted text.
///
/// Runs of blank lines collapse to one newline, every newline becomes a
/// space, then any remaining run of two or more whitespace characters
/// collapses to a single space. Leading and trailing whitespace is removed.
pub fn clean_text(text: &str) -> String {
    static BLANK_LINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\n\s*){2,}").unwrap());
    static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

    if text.is_empty() {
        return String::new();
    }

    let single_line = BLANK_LINE_RUNS.replace_all(text, "\n").replace('\n', " ");
    WHITESPACE_RUNS
        .replace_all(&single_line, " ")
        .trim()
        .to_string()
}
