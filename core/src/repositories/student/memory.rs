//! In-memory implementation of StudentRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::student::Student;
use crate::domain::value_objects::student_view::StudentFilter;
use crate::errors::DomainError;

use super::r#trait::StudentRepository;

#[derive(Clone, Default)]
pub struct InMemoryStudentRepository {
    students: Arc<RwLock<HashMap<Uuid, Student>>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `students`
    pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
        let map = students.into_iter().map(|s| (s.id, s)).collect();
        Self {
            students: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, DomainError> {
        let students = self.students.read().await;
        Ok(students.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Student>, DomainError> {
        let students = self.students.read().await;
        Ok(ids.iter().filter_map(|id| students.get(id).cloned()).collect())
    }

    async fn list(&self, filter: &StudentFilter) -> Result<Vec<Student>, DomainError> {
        let students = self.students.read().await;
        let mut matching: Vec<Student> = students
            .values()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        matching.sort_by_key(|s| s.urn);
        Ok(matching)
    }

    async fn upsert(&self, mut student: Student) -> Result<Student, DomainError> {
        let mut students = self.students.write().await;

        if let Some(existing) = students.values().find(|s| s.urn == student.urn) {
            student.id = existing.id;
            student.created_at = existing.created_at;
        }
        student.updated_at = Utc::now();

        students.insert(student.id, student.clone());
        Ok(student)
    }
}
