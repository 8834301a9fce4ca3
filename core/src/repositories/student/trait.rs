//! Student repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::student::Student;
use crate::domain::value_objects::student_view::StudentFilter;
use crate::errors::DomainError;

/// Persistence for student academic records
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Find a student by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, DomainError>;

    /// Find all students whose id is in `ids`; missing ids are simply absent
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Student>, DomainError>;

    /// Students matching `filter`, ordered by URN ascending
    async fn list(&self, filter: &StudentFilter) -> Result<Vec<Student>, DomainError>;

    /// Insert a student, or replace the record that has the same URN
    ///
    /// A replaced record keeps its original id and creation time.
    ///
    /// # Returns
    /// * `Ok(Student)` - The stored record
    async fn upsert(&self, student: Student) -> Result<Student, DomainError>;
}
