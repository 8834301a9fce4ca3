//! Subject repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::subject::Subject;
use crate::errors::DomainError;

/// Persistence for the subject catalogue
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// All subjects ordered by code
    async fn list_all(&self) -> Result<Vec<Subject>, DomainError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Subject>, DomainError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Subject>, DomainError>;

    /// Store a new subject
    ///
    /// # Returns
    /// * `Err(DomainError)` - A subject with the same code already exists
    async fn create(&self, subject: Subject) -> Result<Subject, DomainError>;
}
