use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod backend;
pub mod config_file;
pub mod layout;
pub mod store;

pub use backend::{BackendError, PageBackend};
pub use layout::{PageText, Rect, TextLine};
pub use store::{StoreError, load_document, save_document};

/// Reserved value for "extraction did not locate this section".
pub const NOT_FOUND: &str = "Not Found";

/// Key used for a summary row that carried no course number.
pub const UNKNOWN_CODE: &str = "UNKNOWN_CODE";

/// Returns `true` unless `value` is the [`NOT_FOUND`] sentinel.
pub fn is_found(value: &str) -> bool {
    value != NOT_FOUND
}

/// Root of the extracted syllabus. Built once, then read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyllabusDocument {
    pub header_info: HeaderInfo,
    /// Semester label ("SEMESTER I" …) to its course list, in the order
    /// the tables were located.
    pub semesters: IndexMap<String, Semester>,
}

impl SyllabusDocument {
    /// Look a course up by code or by exact course name, case-insensitively,
    /// across every semester.
    pub fn find_course(&self, identifier: &str) -> Option<&CourseRecord> {
        let identifier = identifier.trim().to_lowercase();
        self.courses().find(|record| {
            record.code.to_lowercase() == identifier
                || record.entry.summary.name.to_lowercase() == identifier
        })
    }

    /// All course records in semester order.
    pub fn courses(&self) -> impl Iterator<Item = &CourseRecord> {
        self.semesters.values().flat_map(|s| s.courses.iter())
    }

    pub fn semester(&self, label: &str) -> Option<&Semester> {
        self.semesters.get(label)
    }
}

/// Front-matter sections of the syllabus. Every key is always present;
/// a section that could not be located holds [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderInfo {
    pub institution_vision_mission: String,
    pub department_vision_mission: String,
    pub peos: String,
    pub pos: String,
    pub psos: String,
}

impl Default for HeaderInfo {
    fn default() -> Self {
        Self {
            institution_vision_mission: NOT_FOUND.to_string(),
            department_vision_mission: NOT_FOUND.to_string(),
            peos: NOT_FOUND.to_string(),
            pos: NOT_FOUND.to_string(),
            psos: NOT_FOUND.to_string(),
        }
    }
}

/// Which header section a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderSection {
    InstitutionVisionMission,
    DepartmentVisionMission,
    Peos,
    Pos,
    Psos,
}

impl HeaderInfo {
    pub fn get(&self, section: HeaderSection) -> &str {
        match section {
            HeaderSection::InstitutionVisionMission => &self.institution_vision_mission,
            HeaderSection::DepartmentVisionMission => &self.department_vision_mission,
            HeaderSection::Peos => &self.peos,
            HeaderSection::Pos => &self.pos,
            HeaderSection::Psos => &self.psos,
        }
    }

    pub fn set(&mut self, section: HeaderSection, value: String) {
        let slot = match section {
            HeaderSection::InstitutionVisionMission => &mut self.institution_vision_mission,
            HeaderSection::DepartmentVisionMission => &mut self.department_vision_mission,
            HeaderSection::Peos => &mut self.peos,
            HeaderSection::Pos => &mut self.pos,
            HeaderSection::Psos => &mut self.psos,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub courses: Vec<CourseRecord>,
}

/// One parsed row of a semester summary table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    #[serde(rename = "Slot")]
    pub slot: String,
    #[serde(rename = "Category Code")]
    pub category_code: String,
    #[serde(rename = "Course Number")]
    pub course_number: String,
    #[serde(rename = "Courses")]
    pub name: String,
    #[serde(rename = "L-T-P")]
    pub ltp: String,
    #[serde(rename = "Hours")]
    pub hours: String,
    #[serde(rename = "Credit")]
    pub credit: String,
}

/// Prose sections extracted for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetail {
    pub course_name: String,
    pub overview: String,
    pub outcomes: String,
    pub syllabus: String,
    pub textbooks: String,
    pub references: String,
    pub course_plan: String,
}

impl Default for CourseDetail {
    fn default() -> Self {
        Self {
            course_name: NOT_FOUND.to_string(),
            overview: NOT_FOUND.to_string(),
            outcomes: NOT_FOUND.to_string(),
            syllabus: NOT_FOUND.to_string(),
            textbooks: NOT_FOUND.to_string(),
            references: NOT_FOUND.to_string(),
            course_plan: NOT_FOUND.to_string(),
        }
    }
}

/// Summary row paired with its detail block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub summary: CourseSummary,
    /// `None` is written as the `"Not Found"` sentinel.
    #[serde(with = "details_or_sentinel")]
    pub details: Option<CourseDetail>,
}

/// A course in a semester list, serialized as `{code: {summary, details}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    pub code: String,
    pub entry: CourseEntry,
}

impl Serialize for CourseRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.code, &self.entry)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for CourseRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, CourseEntry>::deserialize(deserializer)?;
        let mut entries = map.into_iter();
        match (entries.next(), entries.next()) {
            (Some((code, entry)), None) => Ok(CourseRecord { code, entry }),
            _ => Err(D::Error::custom(
                "course record must be an object with exactly one course code key",
            )),
        }
    }
}

mod details_or_sentinel {
    use super::{CourseDetail, NOT_FOUND};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Detail(CourseDetail),
        Text(#[allow(dead_code)] String),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<CourseDetail>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(detail) => detail.serialize(serializer),
            None => serializer.serialize_str(NOT_FOUND),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<CourseDetail>, D::Error> {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Detail(detail) => Some(detail),
            Raw::Text(_) => None,
        })
    }
}
