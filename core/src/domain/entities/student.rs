//! Student academic record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::subject::Subject;
use crate::errors::ValidationError;

/// Highest grade point on the university scale
pub const MAX_GRADE_POINT: f64 = 10.0;

/// Earliest admission year accepted for a record
pub const MIN_ADMISSION_YEAR: i32 = 2000;

/// Outcome of a subject for one semester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceStatus {
    Pass,
    Detained,
}

/// Marks obtained by a student in one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPerformance {
    /// Reference to the subject catalogue entry
    pub subject_id: Uuid,

    #[serde(default)]
    pub internal_marks: u32,

    #[serde(default)]
    pub external_marks: u32,

    #[serde(default)]
    pub internal_detained: bool,

    #[serde(default)]
    pub external_detained: bool,
}

impl SubjectPerformance {
    pub fn total_marks(&self) -> u32 {
        self.internal_marks.saturating_add(self.external_marks)
    }

    /// Check the marks fit within the subject's marking scheme
    pub fn validate_against(&self, subject: &Subject) -> Result<(), ValidationError> {
        let bounds = [
            ("internalMarks", self.internal_marks, subject.max_internal_marks),
            ("externalMarks", self.external_marks, subject.max_external_marks),
        ];
        for (field, marks, max) in bounds {
            if marks > max {
                return Err(ValidationError::OutOfRange {
                    field: format!("{} ({})", field, subject.code),
                    min: "0".to_string(),
                    max: max.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Detained when either component is detained
    pub fn status(&self) -> PerformanceStatus {
        if self.internal_detained || self.external_detained {
            PerformanceStatus::Detained
        } else {
            PerformanceStatus::Pass
        }
    }
}

/// One semester of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterRecord {
    pub semester_number: u32,

    #[serde(default)]
    pub sgpa: f64,

    #[serde(default)]
    pub subjects: Vec<SubjectPerformance>,
}

/// Student with nested semester and subject performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub full_name: String,

    /// University registration number, unique per student
    pub urn: i64,

    /// College roll number
    pub crn: i64,

    pub course: String,
    pub branch: Option<String>,
    pub admission_year: i32,
    pub graduation_year: i32,

    /// Stored guardian contacts, used when a send request carries none
    pub guardian_email: Option<String>,
    pub guardian_phone: Option<String>,

    pub semesters: Vec<SemesterRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Creates a student record without any semester results
    pub fn new(
        full_name: impl Into<String>,
        urn: i64,
        crn: i64,
        course: impl Into<String>,
        branch: Option<String>,
        admission_year: i32,
        graduation_year: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into().trim().to_string(),
            urn,
            crn,
            course: course.into(),
            branch,
            admission_year,
            graduation_year,
            guardian_email: None,
            guardian_phone: None,
            semesters: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mean of the semester SGPAs, rounded to two decimals; 0 without semesters
    pub fn cgpa(&self) -> f64 {
        if self.semesters.is_empty() {
            return 0.0;
        }
        let total: f64 = self.semesters.iter().map(|s| s.sgpa).sum();
        round2(total / self.semesters.len() as f64)
    }

    /// True if any subject in any semester is detained
    pub fn is_detained(&self) -> bool {
        self.semesters
            .iter()
            .flat_map(|s| s.subjects.iter())
            .any(|p| p.status() == PerformanceStatus::Detained)
    }

    pub fn semester(&self, number: u32) -> Option<&SemesterRecord> {
        self.semesters.iter().find(|s| s.semester_number == number)
    }

    /// Check record consistency before it is stored
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "fullName".to_string(),
            });
        }
        if self.course.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "course".to_string(),
            });
        }
        if self.admission_year < MIN_ADMISSION_YEAR {
            return Err(ValidationError::OutOfRange {
                field: "admissionYear".to_string(),
                min: MIN_ADMISSION_YEAR.to_string(),
                max: "-".to_string(),
            });
        }
        if self.graduation_year <= self.admission_year {
            return Err(ValidationError::BusinessRuleViolation {
                rule: "Graduation year must be greater than admission year".to_string(),
            });
        }
        for semester in &self.semesters {
            if semester.semester_number == 0 {
                return Err(ValidationError::OutOfRange {
                    field: "semesterNumber".to_string(),
                    min: "1".to_string(),
                    max: "-".to_string(),
                });
            }
            if !(0.0..=MAX_GRADE_POINT).contains(&semester.sgpa) {
                return Err(ValidationError::OutOfRange {
                    field: "sgpa".to_string(),
                    min: "0".to_string(),
                    max: MAX_GRADE_POINT.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Acronym of a branch name built from the first letter of each word
///
/// "Computer Science Engineering" becomes "CSE".
pub fn branch_acronym(branch: &str) -> String {
    branch
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
