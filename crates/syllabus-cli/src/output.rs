use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use syllabus_core::{HeaderSection, SyllabusDocument, is_found};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

const HEADER_LABELS: [(HeaderSection, &str); 5] = [
    (HeaderSection::InstitutionVisionMission, "Institution vision/mission"),
    (HeaderSection::DepartmentVisionMission, "Department vision/mission"),
    (HeaderSection::Peos, "PEOs"),
    (HeaderSection::Pos, "POs"),
    (HeaderSection::Psos, "PSOs"),
];

/// Print which header sections were found and the per-semester course counts.
pub fn print_summary(
    w: &mut dyn Write,
    doc: &SyllabusDocument,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w, "Header sections:")?;
    for (section, label) in HEADER_LABELS {
        let found = is_found(doc.header_info.get(section));
        let mark = if found { "found" } else { "missing" };
        if color.enabled() {
            if found {
                writeln!(w, "  {:<28} {}", label, mark.green())?;
            } else {
                writeln!(w, "  {:<28} {}", label, mark.yellow())?;
            }
        } else {
            writeln!(w, "  {:<28} {}", label, mark)?;
        }
    }
    writeln!(w)?;

    if doc.semesters.is_empty() {
        if color.enabled() {
            writeln!(w, "{}", "No semester tables found".yellow())?;
        } else {
            writeln!(w, "No semester tables found")?;
        }
        return Ok(());
    }

    for (label, semester) in &doc.semesters {
        let without_details = semester
            .courses
            .iter()
            .filter(|c| c.entry.details.is_none())
            .count();
        let line = format!("{}: {} courses", label, semester.courses.len());
        if color.enabled() {
            write!(w, "{}", line.bold())?;
        } else {
            write!(w, "{}", line)?;
        }
        if without_details > 0 {
            let note = format!(" ({} without details)", without_details);
            if color.enabled() {
                write!(w, "{}", note.dimmed())?;
            } else {
                write!(w, "{}", note)?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Print the courses of every semester, one per line.
pub fn print_courses(
    w: &mut dyn Write,
    doc: &SyllabusDocument,
    color: ColorMode,
) -> std::io::Result<()> {
    for (label, semester) in &doc.semesters {
        if color.enabled() {
            writeln!(w, "{}", label.bold())?;
        } else {
            writeln!(w, "{}", label)?;
        }
        for record in &semester.courses {
            let summary = &record.entry.summary;
            if color.enabled() {
                writeln!(
                    w,
                    "  {:<10} {} {}",
                    record.code.cyan(),
                    summary.name,
                    format!("[{} | {} cr]", summary.ltp, summary.credit).dimmed()
                )?;
            } else {
                writeln!(
                    w,
                    "  {:<10} {} [{} | {} cr]",
                    record.code, summary.name, summary.ltp, summary.credit
                )?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

pub fn print_saved(w: &mut dyn Write, path: &Path, color: ColorMode) -> std::io::Result<()> {
    let msg = format!("Saved syllabus to {}", path.display());
    if color.enabled() {
        writeln!(w, "{}", msg.green())
    } else {
        writeln!(w, "{}", msg)
    }
}

/// Print one chat turn.
pub fn print_message(
    w: &mut dyn Write,
    role: &str,
    content: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    let label = if role == "user" { "You" } else { "Assistant" };
    if color.enabled() {
        if role == "user" {
            writeln!(w, "{}", format!("{label}:").cyan().bold())?;
        } else {
            writeln!(w, "{}", format!("{label}:").green().bold())?;
        }
    } else {
        writeln!(w, "{label}:")?;
    }
    writeln!(w, "{}", content)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::{CourseEntry, CourseRecord, CourseSummary, HeaderInfo, Semester};

    fn doc() -> SyllabusDocument {
        let mut doc = SyllabusDocument {
            header_info: HeaderInfo {
                psos: "PSO1: outcome A.".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        doc.semesters.insert(
            "SEMESTER I".into(),
            Semester {
                courses: vec![CourseRecord {
                    code: "CS2U401L".into(),
                    entry: CourseEntry {
                        summary: CourseSummary {
                            name: "Data Structures".into(),
                            ltp: "3-1-0".into(),
                            credit: "4".into(),
                            ..Default::default()
                        },
                        details: None,
                    },
                }],
            },
        );
        doc
    }

    #[test]
    fn test_summary_plain() {
        let mut out = Vec::new();
        print_summary(&mut out, &doc(), ColorMode(false)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("PSOs"));
        assert!(text.contains("SEMESTER I: 1 courses (1 without details)"));
        assert!(text.lines().any(|l| l.contains("PEOs") && l.ends_with("missing")));
    }

    #[test]
    fn test_courses_plain() {
        let mut out = Vec::new();
        print_courses(&mut out, &doc(), ColorMode(false)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("CS2U401L   Data Structures [3-1-0 | 4 cr]"));
    }

    #[test]
    fn test_empty_document() {
        let mut out = Vec::new();
        print_summary(&mut out, &SyllabusDocument::default(), ColorMode(false)).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No semester tables found"));
    }
}
