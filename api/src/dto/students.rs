use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use gp_core::domain::{SemesterRecord, Student, StudentFilter, Subject, SubjectType};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListStudentsQuery {
    pub course: Option<String>,
    pub search: Option<String>,
}

impl From<ListStudentsQuery> for StudentFilter {
    fn from(query: ListStudentsQuery) -> Self {
        StudentFilter {
            course: query.course,
            search: query.search,
        }
    }
}

/// One student record in an import batch
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentImportDto {
    pub full_name: String,
    pub urn: i64,
    pub crn: i64,
    pub course: String,
    pub branch: Option<String>,
    pub admission_year: i32,
    pub graduation_year: i32,
    pub guardian_email: Option<String>,
    pub guardian_phone: Option<String>,

    #[serde(default)]
    pub semesters: Vec<SemesterRecord>,
}

impl From<StudentImportDto> for Student {
    fn from(dto: StudentImportDto) -> Self {
        let mut student = Student::new(
            dto.full_name,
            dto.urn,
            dto.crn,
            dto.course,
            dto.branch.filter(|b| !b.trim().is_empty()),
            dto.admission_year,
            dto.graduation_year,
        );
        student.guardian_email = dto.guardian_email.filter(|e| !e.trim().is_empty());
        student.guardian_phone = dto.guardian_phone.filter(|p| !p.trim().is_empty());
        student.semesters = dto.semesters;
        student
    }
}

/// Body of `POST /students/import`; records are upserted by URN
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImportStudentsRequest {
    #[validate(length(min = 1, max = 1000, message = "Import between 1 and 1000 students at a time"))]
    pub students: Vec<StudentImportDto>,
}

/// Body of `POST /subjects`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 20))]
    pub code: String,

    pub subject_type: SubjectType,

    #[validate(range(min = 0.0, max = 40.0))]
    pub credits: f64,

    pub max_internal_marks: u32,
    pub max_external_marks: u32,
    pub max_total_marks: u32,

    #[serde(default)]
    pub min_internal_pass_marks: u32,
    #[serde(default)]
    pub min_external_pass_marks: u32,
    #[serde(default)]
    pub min_total_pass_marks: u32,
}

impl From<CreateSubjectRequest> for Subject {
    fn from(request: CreateSubjectRequest) -> Self {
        Subject {
            id: Uuid::new_v4(),
            title: request.title,
            code: request.code,
            subject_type: request.subject_type,
            credits: request.credits,
            max_internal_marks: request.max_internal_marks,
            max_external_marks: request.max_external_marks,
            max_total_marks: request.max_total_marks,
            min_internal_pass_marks: request.min_internal_pass_marks,
            min_external_pass_marks: request.min_external_pass_marks,
            min_total_pass_marks: request.min_total_pass_marks,
        }
    }
}
