//! Student and subject record endpoints (admin only)

use actix_web::{web, HttpResponse};
use gp_core::domain::{Student, StudentFilter, Subject};
use gp_shared::ApiResponse;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{CreateSubjectRequest, ImportStudentsRequest, ListStudentsQuery};
use crate::handlers::ApiError;
use crate::middleware::Admin;

/// Handler for GET /api/v1/students?course=&search=
pub async fn list_students(
    state: web::Data<AppState>,
    admin: Admin,
    query: web::Query<ListStudentsQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter: StudentFilter = query.into_inner().into();
    let students = state.students.list_students(&admin, &filter).await?;
    let message = format!("{} students", students.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(students, message)))
}

/// Handler for GET /api/v1/students/stats
pub async fn dashboard_stats(
    state: web::Data<AppState>,
    admin: Admin,
) -> Result<HttpResponse, ApiError> {
    let stats = state.students.dashboard_stats(&admin).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Dashboard statistics")))
}

/// Handler for GET /api/v1/students/{id}
pub async fn get_student(
    state: web::Data<AppState>,
    admin: Admin,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let student = state.students.get_student(&admin, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student record")))
}

/// Handler for POST /api/v1/students/import
///
/// Invalid records are reported per URN; valid ones are stored.
pub async fn import_students(
    state: web::Data<AppState>,
    admin: Admin,
    body: web::Json<ImportStudentsRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let students: Vec<Student> = body.into_inner().students.into_iter().map(Student::from).collect();

    let report = state.students.import_students(&admin, students).await?;
    let message = format!(
        "{} of {} students imported",
        report.summary.successful, report.summary.total
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(report, message)))
}

/// Handler for GET /api/v1/subjects
pub async fn list_subjects(
    state: web::Data<AppState>,
    admin: Admin,
) -> Result<HttpResponse, ApiError> {
    let subjects = state.students.list_subjects(&admin).await?;
    let message = format!("{} subjects", subjects.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(subjects, message)))
}

/// Handler for POST /api/v1/subjects
pub async fn create_subject(
    state: web::Data<AppState>,
    admin: Admin,
    body: web::Json<CreateSubjectRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let subject = state
        .students
        .create_subject(&admin, Subject::from(body.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(subject, "Subject created")))
}
