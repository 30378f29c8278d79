//! Keyword rules tried in order before falling back to the model.

use once_cell::sync::Lazy;
use regex::Regex;
use syllabus_core::{HeaderSection, SyllabusDocument, is_found};

use crate::format::{format_course_details, format_list, format_text_list, split_vision_mission};

/// A user question with its lowercase form precomputed.
#[derive(Debug, Clone)]
pub struct Question {
    pub text: String,
    pub lower: String,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let lower = text.to_lowercase();
        Self { text, lower }
    }

    fn mentions(&self, re: &Regex) -> bool {
        re.is_match(&self.lower)
    }
}

pub type RuleHandler = fn(&SyllabusDocument, &Question) -> Option<String>;

/// A named handler. Returning `None` passes the question to the next rule.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub handler: RuleHandler,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

impl Rule {
    pub const fn new(name: &'static str, handler: RuleHandler) -> Self {
        Self { name, handler }
    }

    pub fn apply(&self, document: &SyllabusDocument, question: &Question) -> Option<String> {
        (self.handler)(document, question)
    }
}

/// Course before semester before header lists before vision/mission.
/// Department rules precede institution rules so "department vision" is not
/// answered with the institution's.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new("course", course_details),
        Rule::new("semester_courses", semester_courses),
        Rule::new("peos", peos),
        Rule::new("psos", psos),
        Rule::new("pos", pos),
        Rule::new("department_vision", department_vision),
        Rule::new("department_mission", department_mission),
        Rule::new("institution_vision", institution_vision),
        Rule::new("institution_mission", institution_mission),
    ]
}

static COURSE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z]{2}\d[a-z]\d{3}[a-z])").unwrap());
static SEMESTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:semester|sem)\s+(\d+|viii|vii|vi|v|iv|iii|ii|i)\b").unwrap()
});
// Plural or numbered ("peo2") forms; "policy" and "posts" stay unmatched.
static PEO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bpeo(?:s|\d+)?\b").unwrap());
static PSO: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bpso(?:s|\d+)?\b").unwrap());
static PO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bpo(?:s|\d+)?\b|\bprogram(?:me)? outcomes?\b").unwrap()
});
static VISION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bvision\b").unwrap());
static MISSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmission\b").unwrap());
static DEPARTMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:department|dept)\b").unwrap());

const ROMAN: [&str; 8] = ["i", "ii", "iii", "iv", "v", "vi", "vii", "viii"];

fn not_in_syllabus(what: &str) -> String {
    format!("Sorry, the {what} could not be found in the syllabus.")
}

fn course_details(document: &SyllabusDocument, question: &Question) -> Option<String> {
    let code = COURSE_CODE.captures(&question.lower)?.get(1)?.as_str();
    Some(match document.find_course(code) {
        Some(record) => format_course_details(record),
        None => not_in_syllabus(&format!("course `{}`", code.to_uppercase())),
    })
}

/// Map "2", "ii" etc. to the stored `SEMESTER II` key.
fn semester_label(token: &str) -> Option<String> {
    let index = match token.parse::<usize>() {
        Ok(n) => n.checked_sub(1)?,
        Err(_) => ROMAN.iter().position(|r| *r == token)?,
    };
    ROMAN
        .get(index)
        .map(|roman| format!("SEMESTER {}", roman.to_uppercase()))
}

fn semester_courses(document: &SyllabusDocument, question: &Question) -> Option<String> {
    if !(question.lower.contains("courses in") || question.lower.contains("subjects in")) {
        return None;
    }
    let token = SEMESTER.captures(&question.lower)?.get(1)?.as_str();
    let label = semester_label(token)?;
    let semester = document.semester(&label)?;
    let items = semester
        .courses
        .iter()
        .map(|record| format!("{} ({})", record.entry.summary.name, record.code));
    Some(format_list(items, &format!("Courses in {label}")))
}

fn header_list(document: &SyllabusDocument, section: HeaderSection, title: &str) -> String {
    let text = document.header_info.get(section);
    if is_found(text) {
        format_text_list(text, title)
    } else {
        not_in_syllabus(title)
    }
}

fn peos(document: &SyllabusDocument, question: &Question) -> Option<String> {
    question.mentions(&PEO).then(|| {
        header_list(
            document,
            HeaderSection::Peos,
            "Program Educational Objectives (PEOs)",
        )
    })
}

fn psos(document: &SyllabusDocument, question: &Question) -> Option<String> {
    question.mentions(&PSO).then(|| {
        header_list(
            document,
            HeaderSection::Psos,
            "Program Specific Outcomes (PSOs)",
        )
    })
}

fn pos(document: &SyllabusDocument, question: &Question) -> Option<String> {
    question
        .mentions(&PO)
        .then(|| header_list(document, HeaderSection::Pos, "Program Outcomes (POs)"))
}

#[derive(Clone, Copy)]
enum Statement {
    Vision,
    Mission,
}

fn statement(
    document: &SyllabusDocument,
    section: HeaderSection,
    which: Statement,
    title: &str,
) -> String {
    let parts = split_vision_mission(document.header_info.get(section));
    let text = match which {
        Statement::Vision => parts.vision,
        Statement::Mission => parts.mission,
    };
    match text {
        Some(text) => format!("**{title}:**\n\n{text}"),
        None => not_in_syllabus(&title.to_lowercase()),
    }
}

fn department_vision(document: &SyllabusDocument, question: &Question) -> Option<String> {
    (question.mentions(&VISION) && question.mentions(&DEPARTMENT)).then(|| {
        statement(
            document,
            HeaderSection::DepartmentVisionMission,
            Statement::Vision,
            "Department Vision",
        )
    })
}

fn department_mission(document: &SyllabusDocument, question: &Question) -> Option<String> {
    (question.mentions(&MISSION) && question.mentions(&DEPARTMENT)).then(|| {
        statement(
            document,
            HeaderSection::DepartmentVisionMission,
            Statement::Mission,
            "Department Mission",
        )
    })
}

fn institution_vision(document: &SyllabusDocument, question: &Question) -> Option<String> {
    question.mentions(&VISION).then(|| {
        statement(
            document,
            HeaderSection::InstitutionVisionMission,
            Statement::Vision,
            "Institution Vision",
        )
    })
}

fn institution_mission(document: &SyllabusDocument, question: &Question) -> Option<String> {
    question.mentions(&MISSION).then(|| {
        statement(
            document,
            HeaderSection::InstitutionVisionMission,
            Statement::Mission,
            "Institution Mission",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_label_arabic_and_roman() {
        assert_eq!(semester_label("1").as_deref(), Some("SEMESTER I"));
        assert_eq!(semester_label("iv").as_deref(), Some("SEMESTER IV"));
        assert_eq!(semester_label("8").as_deref(), Some("SEMESTER VIII"));
        assert!(semester_label("0").is_none());
        assert!(semester_label("9").is_none());
    }

    #[test]
    fn test_semester_regex_is_word_bounded() {
        let caps = SEMESTER.captures("courses in semester iii please").unwrap();
        assert_eq!(&caps[1], "iii");
        assert!(SEMESTER.captures("courses in semesterii").is_none());
    }

    #[test]
    fn test_po_keyword_does_not_match_inside_words() {
        assert!(Question::new("List the POs").mentions(&PO));
        assert!(Question::new("What are the program outcomes?").mentions(&PO));
        assert!(!Question::new("What is the exam policy?").mentions(&PO));
        assert!(!Question::new("What is PSO?").mentions(&PO));
        assert!(!Question::new("any posts on the board?").mentions(&PO));
        assert!(Question::new("what does PO3 mean?").mentions(&PO));
        assert!(!Question::new("what does PSO3 mean?").mentions(&PO));
    }

    #[test]
    fn test_default_rule_order() {
        let names: Vec<_> = default_rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "course",
                "semester_courses",
                "peos",
                "psos",
                "pos",
                "department_vision",
                "department_mission",
                "institution_vision",
                "institution_mission",
            ]
        );
    }

    #[test]
    fn test_missing_header_apologises() {
        let doc = SyllabusDocument::default();
        let answer = psos(&doc, &Question::new("what is pso")).unwrap();
        assert_eq!(
            answer,
            "Sorry, the Program Specific Outcomes (PSOs) could not be found in the syllabus."
        );
    }
}
