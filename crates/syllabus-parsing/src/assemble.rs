use std::collections::BTreeMap;

use indexmap::IndexMap;
use syllabus_core::{
    CourseDetail, CourseEntry, CourseRecord, HeaderInfo, Semester, SyllabusDocument, UNKNOWN_CODE,
};

use crate::table::SemesterTable;

/// Join summary rows with the master detail map into the final document.
///
/// Every summary row produces exactly one record. Lookup is by exact course
/// number; a row with no matching detail block keeps a sentinel detail.
pub fn assemble(
    header_info: HeaderInfo,
    tables: &[SemesterTable],
    details: &BTreeMap<String, CourseDetail>,
) -> SyllabusDocument {
    let mut semesters = IndexMap::new();

    for table in tables {
        tracing::info!(semester = %table.label, rows = table.rows.len(), "assembling semester");
        let courses = table
            .rows
            .iter()
            .map(|summary| {
                let number = summary.course_number.as_str();
                let found = details.get(number).cloned();
                if found.is_none() {
                    tracing::warn!(
                        semester = %table.label,
                        course = number,
                        "course from summary not found in detailed descriptions"
                    );
                }
                let code = if number.is_empty() {
                    UNKNOWN_CODE
                } else {
                    number
                };
                CourseRecord {
                    code: code.to_string(),
                    entry: CourseEntry {
                        summary: summary.clone(),
                        details: found,
                    },
                }
            })
            .collect();
        semesters.insert(table.label.clone(), Semester { courses });
    }

    SyllabusDocument {
        header_info,
        semesters,
    }
}
