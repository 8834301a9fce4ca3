//! MySQL implementation of the SubjectRepository trait.

use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use gp_core::domain::entities::subject::{Subject, SubjectType};
use gp_core::errors::{DomainError, ValidationError};
use gp_core::repositories::SubjectRepository;

const SUBJECT_COLUMNS: &str = "id, title, code, subject_type, credits, max_internal_marks, \
     max_external_marks, max_total_marks, min_internal_pass_marks, min_external_pass_marks, \
     min_total_pass_marks";

/// MySQL implementation of SubjectRepository
pub struct MySqlSubjectRepository {
    pool: MySqlPool,
}

impl MySqlSubjectRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn marks(row: &sqlx::mysql::MySqlRow, column: &str) -> Result<u32, DomainError> {
        row.try_get(column)
            .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", column, e)))
    }

    fn row_to_subject(row: &sqlx::mysql::MySqlRow) -> Result<Subject, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let type_code: String = row
            .try_get("subject_type")
            .map_err(|e| DomainError::internal(format!("Failed to get subject_type: {}", e)))?;

        Ok(Subject {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid subject UUID: {}", e)))?,
            title: row
                .try_get("title")
                .map_err(|e| DomainError::internal(format!("Failed to get title: {}", e)))?,
            code: row
                .try_get("code")
                .map_err(|e| DomainError::internal(format!("Failed to get code: {}", e)))?,
            subject_type: SubjectType::from_code(&type_code).ok_or_else(|| {
                DomainError::internal(format!("Unknown subject type: {}", type_code))
            })?,
            credits: row
                .try_get("credits")
                .map_err(|e| DomainError::internal(format!("Failed to get credits: {}", e)))?,
            max_internal_marks: Self::marks(row, "max_internal_marks")?,
            max_external_marks: Self::marks(row, "max_external_marks")?,
            max_total_marks: Self::marks(row, "max_total_marks")?,
            min_internal_pass_marks: Self::marks(row, "min_internal_pass_marks")?,
            min_external_pass_marks: Self::marks(row, "min_external_pass_marks")?,
            min_total_pass_marks: Self::marks(row, "min_total_pass_marks")?,
        })
    }
}

#[async_trait]
impl SubjectRepository for MySqlSubjectRepository {
    async fn list_all(&self) -> Result<Vec<Subject>, DomainError> {
        let query = format!("SELECT {} FROM subjects ORDER BY code ASC", SUBJECT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list subjects: {}", e)))?;

        rows.iter().map(Self::row_to_subject).collect()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Subject>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM subjects WHERE id IN (", SUBJECT_COLUMNS));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to load subjects: {}", e)))?;

        rows.iter().map(Self::row_to_subject).collect()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Subject>, DomainError> {
        let query = format!("SELECT {} FROM subjects WHERE code = ? LIMIT 1", SUBJECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(code.trim().to_uppercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find subject: {}", e)))?;

        row.as_ref().map(Self::row_to_subject).transpose()
    }

    async fn create(&self, subject: Subject) -> Result<Subject, DomainError> {
        let query = r#"
            INSERT INTO subjects (
                id, title, code, subject_type, credits, max_internal_marks,
                max_external_marks, max_total_marks, min_internal_pass_marks,
                min_external_pass_marks, min_total_pass_marks
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(subject.id.to_string())
            .bind(&subject.title)
            .bind(&subject.code)
            .bind(subject.subject_type.code())
            .bind(subject.credits)
            .bind(subject.max_internal_marks)
            .bind(subject.max_external_marks)
            .bind(subject.max_total_marks)
            .bind(subject.min_internal_pass_marks)
            .bind(subject.min_external_pass_marks)
            .bind(subject.min_total_pass_marks)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    DomainError::from(ValidationError::DuplicateValue {
                        field: "code".to_string(),
                    })
                }
                other => DomainError::internal(format!("Failed to create subject: {}", other)),
            })?;

        Ok(subject)
    }
}
