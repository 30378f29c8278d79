//! Markdown rendering of rule answers.

use once_cell::sync::Lazy;
use regex::Regex;
use syllabus_core::{CourseRecord, is_found};

pub const COURSE_DETAILS_MISSING: &str =
    "Sorry, detailed information for this course could not be found.";

/// Split a run-on list ("PEO1: a. PEO2: b.") into items on `". "` or a
/// numbered `"<n>. "` marker.
pub fn split_items(text: &str) -> Vec<String> {
    static ITEM_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\. |\d+\. ").unwrap());
    ITEM_SEP.split(text).map(str::to_string).collect()
}

/// Remove a leading `PEO1:` / `PSO2:` / `PO3:` style label.
fn strip_label(item: &str) -> &str {
    static LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:PEO|PSO|PO)(?:\d+:?|:)\s*").unwrap());
    match LABEL.find(item) {
        Some(m) => &item[m.end()..],
        None => item,
    }
}

/// Bold title followed by one bullet per non-empty item.
pub fn format_list<I, S>(items: I, title: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut response = format!("**{title}**:\n\n");
    for item in items {
        let item = item.as_ref().trim();
        if item.is_empty() {
            continue;
        }
        response.push_str("- ");
        response.push_str(strip_label(item).trim());
        response.push('\n');
    }
    response
}

/// [`format_list`] over a single run-on string.
pub fn format_text_list(text: &str, title: &str) -> String {
    format_list(split_items(text), title)
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() { "N/A" } else { value }
}

/// Full markdown description of one course.
pub fn format_course_details(record: &CourseRecord) -> String {
    let Some(details) = &record.entry.details else {
        return COURSE_DETAILS_MISSING.to_string();
    };
    let summary = &record.entry.summary;

    let mut response = format!(
        "### Course Details: {} ({})\n\n",
        or_na(&summary.name),
        or_na(&summary.course_number)
    );
    response.push_str(&format!("- **Category:** {}\n", or_na(&summary.category_code)));
    response.push_str(&format!("- **L-T-P:** {}\n", or_na(&summary.ltp)));
    response.push_str(&format!("- **Credits:** {}\n\n", or_na(&summary.credit)));

    if is_found(&details.overview) && !details.overview.is_empty() {
        response.push_str(&format!("**Overview:**\n{}\n\n", details.overview));
    }
    if is_found(&details.outcomes) && !details.outcomes.is_empty() {
        response.push_str(&format_list(
            details.outcomes.split("CO "),
            "Course Outcomes (COs)",
        ));
        response.push('\n');
    }
    if is_found(&details.syllabus) && !details.syllabus.is_empty() {
        response.push_str(&format!("**Syllabus:**\n{}\n\n", details.syllabus));
    }
    if is_found(&details.textbooks) && !details.textbooks.is_empty() {
        response.push_str(&format_text_list(&details.textbooks, "Textbooks"));
        response.push('\n');
    }
    if is_found(&details.references) && !details.references.is_empty() {
        response.push_str(&format_text_list(&details.references, "Reference Books"));
        response.push('\n');
    }
    response
}

/// Vision and mission statements recovered from a combined section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisionMission {
    pub vision: Option<String>,
    pub mission: Option<String>,
}

/// Split a combined "Vision: … Mission: …" section at the first
/// "Mission:" label, or at the first bare "Mission" word when no label is
/// present. Leading labels are dropped.
pub fn split_vision_mission(text: &str) -> VisionMission {
    static MISSION_LABEL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\bmission\s*:\s*").unwrap());
    static MISSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bmission\b\s*").unwrap());
    static VISION_LABEL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)^\s*vision\b\s*:?\s*").unwrap());

    if !is_found(text) {
        return VisionMission::default();
    }

    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    let split = MISSION_LABEL.find(text).or_else(|| MISSION.find(text));
    let (vision_part, mission_part) = match split {
        Some(m) => (&text[..m.start()], Some(&text[m.end()..])),
        None => (text, None),
    };
    let vision_part = VISION_LABEL.replace(vision_part, "");

    VisionMission {
        vision: non_empty(vision_part.as_ref()),
        mission: mission_part.and_then(non_empty),
    }
}
