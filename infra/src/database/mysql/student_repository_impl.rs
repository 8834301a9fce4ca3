//! MySQL implementation of the StudentRepository trait.
//!
//! Semester results are stored as a JSON column alongside the student row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use gp_core::domain::entities::student::{SemesterRecord, Student};
use gp_core::domain::value_objects::student_view::StudentFilter;
use gp_core::errors::DomainError;
use gp_core::repositories::StudentRepository;

const STUDENT_COLUMNS: &str = "id, full_name, urn, crn, course, branch, admission_year, \
     graduation_year, guardian_email, guardian_phone, semesters, created_at, updated_at";

/// MySQL implementation of StudentRepository
pub struct MySqlStudentRepository {
    pool: MySqlPool,
}

impl MySqlStudentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_student(row: &sqlx::mysql::MySqlRow) -> Result<Student, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let semesters: Json<Vec<SemesterRecord>> = row
            .try_get("semesters")
            .map_err(|e| DomainError::internal(format!("Failed to decode semesters: {}", e)))?;

        Ok(Student {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid student UUID: {}", e)))?,
            full_name: row
                .try_get("full_name")
                .map_err(|e| DomainError::internal(format!("Failed to get full_name: {}", e)))?,
            urn: row
                .try_get("urn")
                .map_err(|e| DomainError::internal(format!("Failed to get urn: {}", e)))?,
            crn: row
                .try_get("crn")
                .map_err(|e| DomainError::internal(format!("Failed to get crn: {}", e)))?,
            course: row
                .try_get("course")
                .map_err(|e| DomainError::internal(format!("Failed to get course: {}", e)))?,
            branch: row
                .try_get("branch")
                .map_err(|e| DomainError::internal(format!("Failed to get branch: {}", e)))?,
            admission_year: row
                .try_get("admission_year")
                .map_err(|e| DomainError::internal(format!("Failed to get admission_year: {}", e)))?,
            graduation_year: row
                .try_get("graduation_year")
                .map_err(|e| DomainError::internal(format!("Failed to get graduation_year: {}", e)))?,
            guardian_email: row
                .try_get("guardian_email")
                .map_err(|e| DomainError::internal(format!("Failed to get guardian_email: {}", e)))?,
            guardian_phone: row
                .try_get("guardian_phone")
                .map_err(|e| DomainError::internal(format!("Failed to get guardian_phone: {}", e)))?,
            semesters: semesters.0,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::internal(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl StudentRepository for MySqlStudentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, DomainError> {
        let query = format!("SELECT {} FROM students WHERE id = ? LIMIT 1", STUDENT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find student: {}", e)))?;

        row.as_ref().map(Self::row_to_student).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Student>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM students WHERE id IN (", STUDENT_COLUMNS));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to load students: {}", e)))?;

        rows.iter().map(Self::row_to_student).collect()
    }

    async fn list(&self, filter: &StudentFilter) -> Result<Vec<Student>, DomainError> {
        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM students", STUDENT_COLUMNS));
        if let Some(course) = filter.course() {
            builder.push(" WHERE course = ").push_bind(course.to_string());
        }
        builder.push(" ORDER BY urn ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list students: {}", e)))?;

        // Search semantics (numeric URN/CRN match) stay in one place
        let mut students = Vec::with_capacity(rows.len());
        for row in &rows {
            let student = Self::row_to_student(row)?;
            if filter.matches(&student) {
                students.push(student);
            }
        }
        Ok(students)
    }

    async fn upsert(&self, mut student: Student) -> Result<Student, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to begin transaction: {}", e)))?;

        let existing = sqlx::query("SELECT id, created_at FROM students WHERE urn = ? FOR UPDATE")
            .bind(student.urn)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to look up student: {}", e)))?;

        student.updated_at = Utc::now();

        match existing {
            Some(row) => {
                let id: String = row
                    .try_get("id")
                    .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
                student.id = Uuid::parse_str(&id)
                    .map_err(|e| DomainError::internal(format!("Invalid student UUID: {}", e)))?;
                student.created_at = row
                    .try_get::<DateTime<Utc>, _>("created_at")
                    .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?;

                sqlx::query(
                    r#"
                    UPDATE students SET
                        full_name = ?, crn = ?, course = ?, branch = ?,
                        admission_year = ?, graduation_year = ?,
                        guardian_email = ?, guardian_phone = ?,
                        semesters = ?, updated_at = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&student.full_name)
                .bind(student.crn)
                .bind(&student.course)
                .bind(&student.branch)
                .bind(student.admission_year)
                .bind(student.graduation_year)
                .bind(&student.guardian_email)
                .bind(&student.guardian_phone)
                .bind(Json(&student.semesters))
                .bind(student.updated_at)
                .bind(student.id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::internal(format!("Failed to update student: {}", e)))?;
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO students (
                        id, full_name, urn, crn, course, branch, admission_year,
                        graduation_year, guardian_email, guardian_phone, semesters,
                        created_at, updated_at
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(student.id.to_string())
                .bind(&student.full_name)
                .bind(student.urn)
                .bind(student.crn)
                .bind(&student.course)
                .bind(&student.branch)
                .bind(student.admission_year)
                .bind(student.graduation_year)
                .bind(&student.guardian_email)
                .bind(&student.guardian_phone)
                .bind(Json(&student.semesters))
                .bind(student.created_at)
                .bind(student.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::internal(format!("Failed to insert student: {}", e)))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to commit student: {}", e)))?;

        Ok(student)
    }
}
