//! Read models built from student records for admins and guardians.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::access_token::DeliveryChannel;
use crate::domain::entities::student::{PerformanceStatus, Student, SubjectPerformance};
use crate::domain::entities::subject::{Subject, SubjectType};

/// Minimal student identity joined onto token listings and issuance results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: Uuid,
    pub full_name: String,
    pub urn: i64,
    pub crn: i64,
    pub course: String,
    pub branch: Option<String>,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            full_name: student.full_name.clone(),
            urn: student.urn,
            crn: student.crn,
            course: student.course.clone(),
            branch: student.branch.clone(),
        }
    }
}

/// Subject fields shown next to a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectInfo {
    pub title: String,
    pub code: String,
    pub subject_type: SubjectType,
    pub credits: f64,
    pub max_internal_marks: u32,
    pub max_external_marks: u32,
    pub max_total_marks: u32,
}

impl From<&Subject> for SubjectInfo {
    fn from(subject: &Subject) -> Self {
        Self {
            title: subject.title.clone(),
            code: subject.code.clone(),
            subject_type: subject.subject_type,
            credits: subject.credits,
            max_internal_marks: subject.max_internal_marks,
            max_external_marks: subject.max_external_marks,
            max_total_marks: subject.max_total_marks,
        }
    }
}

/// A subject result with its catalogue entry resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub subject_id: Uuid,

    /// `None` when the subject was removed from the catalogue
    pub subject: Option<SubjectInfo>,

    pub internal_marks: u32,
    pub external_marks: u32,
    pub total_marks: u32,
    pub internal_detained: bool,
    pub external_detained: bool,
    pub status: PerformanceStatus,
}

impl SubjectResult {
    fn resolve(performance: &SubjectPerformance, catalogue: &HashMap<Uuid, Subject>) -> Self {
        Self {
            subject_id: performance.subject_id,
            subject: catalogue.get(&performance.subject_id).map(SubjectInfo::from),
            internal_marks: performance.internal_marks,
            external_marks: performance.external_marks,
            total_marks: performance.total_marks(),
            internal_detained: performance.internal_detained,
            external_detained: performance.external_detained,
            status: performance.status(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterView {
    pub semester_number: u32,
    pub sgpa: f64,
    pub subjects: Vec<SubjectResult>,
}

/// Full academic record with subject details resolved
///
/// Guardian contact details are deliberately not part of this view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: Uuid,
    pub full_name: String,
    pub urn: i64,
    pub crn: i64,
    pub course: String,
    pub branch: Option<String>,
    pub admission_year: i32,
    pub graduation_year: i32,
    pub cgpa: f64,
    pub semesters: Vec<SemesterView>,
}

impl StudentRecord {
    /// Build the record, looking subjects up in `catalogue`
    pub fn resolve(student: &Student, catalogue: &HashMap<Uuid, Subject>) -> Self {
        let semesters = student
            .semesters
            .iter()
            .map(|semester| SemesterView {
                semester_number: semester.semester_number,
                sgpa: semester.sgpa,
                subjects: semester
                    .subjects
                    .iter()
                    .map(|p| SubjectResult::resolve(p, catalogue))
                    .collect(),
            })
            .collect();

        Self {
            id: student.id,
            full_name: student.full_name.clone(),
            urn: student.urn,
            crn: student.crn,
            course: student.course.clone(),
            branch: student.branch.clone(),
            admission_year: student.admission_year,
            graduation_year: student.graduation_year,
            cgpa: student.cgpa(),
            semesters,
        }
    }
}

/// What a guardian receives after a successful token validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianReport {
    pub student: StudentRecord,

    /// Semester the notification was about
    pub semester: u32,

    pub delivery_channel: DeliveryChannel,

    /// When the token was consumed
    pub accessed_at: DateTime<Utc>,
}

/// Number of students in one branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchShare {
    /// Acronym, e.g. "CSE"
    pub branch: String,
    pub full_name: String,
    pub students: usize,
}

/// Aggregate figures for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: usize,
    pub detained_students: usize,
    pub courses_offered: usize,

    /// Average CGPA over students with a CGPA above zero, two decimals
    #[serde(rename = "avgCGPA")]
    pub avg_cgpa: String,

    /// Sorted by student count, largest first
    pub branch_distribution: Vec<BranchShare>,
}

/// Student listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFilter {
    /// Exact course; "All" or empty means no filter
    pub course: Option<String>,

    /// Case-insensitive match on name or branch; numeric text also matches URN or CRN
    pub search: Option<String>,
}

impl StudentFilter {
    pub fn course(&self) -> Option<&str> {
        self.course
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn matches(&self, student: &Student) -> bool {
        if let Some(course) = self.course() {
            if student.course != course {
                return false;
            }
        }
        let Some(query) = self.search() else {
            return true;
        };
        let needle = query.to_lowercase();
        if student.full_name.to_lowercase().contains(&needle) {
            return true;
        }
        if let Some(branch) = &student.branch {
            if branch.to_lowercase().contains(&needle) {
                return true;
            }
        }
        match query.parse::<i64>() {
            Ok(number) => student.urn == number || student.crn == number,
            Err(_) => false,
        }
    }
}

/// A record rejected during import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFailure {
    pub urn: i64,
    pub error: super::issuance::ItemError,
}

/// Result of a bulk student import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub summary: gp_shared::BatchSummary,
    pub failures: Vec<ImportFailure>,
}
