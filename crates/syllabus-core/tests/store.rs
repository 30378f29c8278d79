//! Round trips through the on-disk JSON store.

use syllabus_core::{
    CourseDetail, CourseEntry, CourseRecord, CourseSummary, HeaderInfo, Semester,
    SyllabusDocument, load_document, save_document, store::to_pretty_json,
};

fn sample_document() -> SyllabusDocument {
    let mut doc = SyllabusDocument {
        header_info: HeaderInfo {
            psos: "PSO1: outcome A. PSO2: outcome B.".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    doc.semesters.insert(
        "SEMESTER I".into(),
        Semester {
            courses: vec![
                CourseRecord {
                    code: "CS2U401L".into(),
                    entry: CourseEntry {
                        summary: CourseSummary {
                            slot: "A".into(),
                            category_code: "PCC".into(),
                            course_number: "CS2U401L".into(),
                            name: "Data Structures – Théorie".into(),
                            ltp: "3-1-0".into(),
                            hours: "4".into(),
                            credit: "4".into(),
                        },
                        details: Some(CourseDetail {
                            overview: "Intro to X".into(),
                            ..Default::default()
                        }),
                    },
                },
                CourseRecord {
                    code: "MA1U101T".into(),
                    entry: CourseEntry {
                        summary: CourseSummary {
                            course_number: "MA1U101T".into(),
                            ..Default::default()
                        },
                        details: None,
                    },
                },
            ],
        },
    );
    doc
}

#[test]
fn save_then_load_preserves_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("syllabus.json");
    let doc = sample_document();

    save_document(&path, &doc).unwrap();
    let loaded = load_document(&path).unwrap();

    assert_eq!(loaded, doc);
}

#[test]
fn saved_json_has_expected_shape() {
    let json = to_pretty_json(&sample_document()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["header_info"]["peos"], "Not Found");
    let courses = value["semesters"]["SEMESTER I"]["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[1]["MA1U101T"]["details"], "Not Found");
    // Non-ASCII is written as-is, indentation is four spaces
    assert!(json.contains("Théorie"));
    assert!(json.contains("\n    \"header_info\""));
}

#[test]
fn save_overwrites_previous_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("syllabus.json");
    std::fs::write(&path, "stale").unwrap();

    save_document(&path, &sample_document()).unwrap();

    assert!(load_document(&path).is_ok());
}

#[test]
fn save_into_missing_directory_fails_without_creating_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("syllabus.json");

    assert!(save_document(&path, &sample_document()).is_err());
    assert!(!path.exists());
    assert!(!dir.path().join("missing-dir").exists());
}

#[test]
fn failed_replace_leaves_destination_untouched() {
    // A non-empty directory at the destination makes the final rename fail
    // after the temporary file has been fully written.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("syllabus.json");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep.txt"), "previous contents").unwrap();

    let result = save_document(&path, &sample_document());

    assert!(matches!(result, Err(syllabus_core::StoreError::Persist { .. })));
    assert!(path.is_dir());
    assert_eq!(
        std::fs::read_to_string(path.join("keep.txt")).unwrap(),
        "previous contents"
    );
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, [std::ffi::OsString::from("syllabus.json")]);
}

#[test]
fn load_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("syllabus.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        load_document(&path),
        Err(syllabus_core::StoreError::Json(_))
    ));
}

#[test]
fn serialization_is_deterministic() {
    let a = to_pretty_json(&sample_document()).unwrap();
    let b = to_pretty_json(&sample_document()).unwrap();
    assert_eq!(a, b);
}
