use syllabus_core::{HeaderInfo, HeaderSection};

use crate::section::extract_section;

/// Start/end keywords delimiting one front-matter section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpec {
    pub section: HeaderSection,
    pub start: &'static str,
    pub end: &'static str,
}

pub const HEADER_SECTIONS: [HeaderSpec; 5] = [
    HeaderSpec {
        section: HeaderSection::InstitutionVisionMission,
        start: "Vision and Mission of the Institution",
        end: "DEPARTMENT OF COMPUTER SCIENCE AND ENGINEERING",
    },
    HeaderSpec {
        section: HeaderSection::DepartmentVisionMission,
        start: "Vision and Mission of the Department",
        end: "PROGRAMME EDUCATIONAL OBJECTIVES",
    },
    HeaderSpec {
        section: HeaderSection::Peos,
        start: "PROGRAMME EDUCATIONAL OBJECTIVES (PEOs)",
        end: "PROGRAMME OUTCOMES (POs)",
    },
    HeaderSpec {
        section: HeaderSection::Pos,
        start: "PROGRAMME OUTCOMES (POs)",
        end: "PROGRAMME SPECIFIC OUTCOMES (PSOs)",
    },
    HeaderSpec {
        section: HeaderSection::Psos,
        start: "PROGRAMME SPECIFIC OUTCOMES (PSOs)",
        end: "Scheduling of Courses",
    },
];

/// Extract the front-matter sections. Sections that cannot be located
/// keep the sentinel value.
pub fn extract_header_info(text: &str, specs: &[HeaderSpec]) -> HeaderInfo {
    let mut header = HeaderInfo::default();
    for spec in specs {
        header.set(spec.section, extract_section(text, spec.start, Some(spec.end)));
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::NOT_FOUND;

    #[test]
    fn test_extract_header_info() {
        let text = "Vision and Mission of the Institution\nVision: To excel.\nMission: To serve.\n\
                    DEPARTMENT OF COMPUTER SCIENCE AND ENGINEERING\n\
                    PROGRAMME EDUCATIONAL OBJECTIVES (PEOs)\nPEO1: Careers.\n\
                    PROGRAMME OUTCOMES (POs)\nPO1: Knowledge.\n\
                    PROGRAMME SPECIFIC OUTCOMES (PSOs)\nPSO1: outcome A. PSO2: outcome B.\n\
                    Scheduling of Courses";
        let header = extract_header_info(text, &HEADER_SECTIONS);
        assert_eq!(
            header.institution_vision_mission,
            "Vision: To excel. Mission: To serve."
        );
        assert_eq!(header.peos, "PEO1: Careers.");
        assert_eq!(header.pos, "PO1: Knowledge.");
        assert_eq!(header.psos, "PSO1: outcome A. PSO2: outcome B.");
        assert_eq!(header.department_vision_mission, NOT_FOUND);
    }
}
