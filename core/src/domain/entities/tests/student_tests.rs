//! Unit tests for student records

use uuid::Uuid;

use crate::domain::entities::student::{
    branch_acronym, PerformanceStatus, SemesterRecord, Student, SubjectPerformance,
};
use crate::domain::entities::subject::{Subject, SubjectType};
use crate::errors::ValidationError;

fn performance(internal: u32, external: u32, detained: bool) -> SubjectPerformance {
    SubjectPerformance {
        subject_id: Uuid::new_v4(),
        internal_marks: internal,
        external_marks: external,
        internal_detained: detained,
        external_detained: false,
    }
}

fn student() -> Student {
    Student::new(
        "  Asha Verma ",
        1905123,
        190456,
        "B.Tech",
        Some("Computer Science Engineering".to_string()),
        2019,
        2023,
    )
}

#[test]
fn test_new_student_trims_name() {
    let s = student();
    assert_eq!(s.full_name, "Asha Verma");
    assert_eq!(s.cgpa(), 0.0);
    assert!(!s.is_detained());
}

#[test]
fn test_cgpa_is_rounded_mean_of_sgpa() {
    let mut s = student();
    s.semesters = vec![
        SemesterRecord { semester_number: 1, sgpa: 8.1, subjects: vec![] },
        SemesterRecord { semester_number: 2, sgpa: 7.45, subjects: vec![] },
        SemesterRecord { semester_number: 3, sgpa: 9.0, subjects: vec![] },
    ];
    assert_eq!(s.cgpa(), 8.18);
    assert_eq!(s.semester(2).map(|sem| sem.sgpa), Some(7.45));
    assert!(s.semester(4).is_none());
}

#[test]
fn test_subject_status_and_total() {
    let pass = performance(24, 51, false);
    assert_eq!(pass.total_marks(), 75);
    assert_eq!(pass.status(), PerformanceStatus::Pass);

    let detained = performance(5, 0, true);
    assert_eq!(detained.status(), PerformanceStatus::Detained);

    let mut s = student();
    s.semesters.push(SemesterRecord {
        semester_number: 1,
        sgpa: 6.0,
        subjects: vec![pass, detained],
    });
    assert!(s.is_detained());
}

#[test]
fn test_total_marks_saturates_instead_of_overflowing() {
    let huge = performance(4_000_000_000, 1_000_000_000, false);
    assert_eq!(huge.total_marks(), u32::MAX);
}

#[test]
fn test_marks_are_bounded_by_subject_scheme() {
    let subject = Subject {
        id: Uuid::new_v4(),
        title: "Operating Systems".to_string(),
        code: "CS-301".to_string(),
        subject_type: SubjectType::Theory,
        credits: 3.0,
        max_internal_marks: 40,
        max_external_marks: 60,
        max_total_marks: 100,
        min_internal_pass_marks: 16,
        min_external_pass_marks: 24,
        min_total_pass_marks: 40,
    };

    assert!(performance(40, 60, false).validate_against(&subject).is_ok());

    match performance(41, 10, false).validate_against(&subject) {
        Err(ValidationError::OutOfRange { field, max, .. }) => {
            assert_eq!(field, "internalMarks (CS-301)");
            assert_eq!(max, "40");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(performance(0, 4_000_000_000, false)
        .validate_against(&subject)
        .is_err());
}

#[test]
fn test_validate_years_and_sgpa() {
    let mut s = student();
    assert!(s.validate().is_ok());

    s.graduation_year = 2019;
    assert!(matches!(
        s.validate(),
        Err(ValidationError::BusinessRuleViolation { .. })
    ));

    let mut s = student();
    s.semesters.push(SemesterRecord { semester_number: 1, sgpa: 10.5, subjects: vec![] });
    assert!(matches!(s.validate(), Err(ValidationError::OutOfRange { field, .. }) if field == "sgpa"));

    let mut s = student();
    s.full_name = "   ".to_string();
    assert!(matches!(s.validate(), Err(ValidationError::RequiredField { .. })));
}

#[test]
fn test_branch_acronym() {
    assert_eq!(branch_acronym("Computer Science Engineering"), "CSE");
    assert_eq!(branch_acronym("Mechanical  Engineering"), "ME");
    assert_eq!(branch_acronym(""), "");
}
