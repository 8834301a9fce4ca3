//! In-memory implementation of SubjectRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::subject::Subject;
use crate::errors::{DomainError, ValidationError};

use super::r#trait::SubjectRepository;

#[derive(Clone, Default)]
pub struct InMemorySubjectRepository {
    subjects: Arc<RwLock<HashMap<Uuid, Subject>>>,
}

impl InMemorySubjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subjects(subjects: impl IntoIterator<Item = Subject>) -> Self {
        let map = subjects.into_iter().map(|s| (s.id, s)).collect();
        Self {
            subjects: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl SubjectRepository for InMemorySubjectRepository {
    async fn list_all(&self) -> Result<Vec<Subject>, DomainError> {
        let subjects = self.subjects.read().await;
        let mut all: Vec<Subject> = subjects.values().cloned().collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(all)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Subject>, DomainError> {
        let subjects = self.subjects.read().await;
        Ok(ids.iter().filter_map(|id| subjects.get(id).cloned()).collect())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Subject>, DomainError> {
        let subjects = self.subjects.read().await;
        let code = code.trim().to_uppercase();
        Ok(subjects.values().find(|s| s.code == code).cloned())
    }

    async fn create(&self, subject: Subject) -> Result<Subject, DomainError> {
        let mut subjects = self.subjects.write().await;

        if subjects.values().any(|s| s.code == subject.code) {
            return Err(ValidationError::DuplicateValue {
                field: "code".to_string(),
            }
            .into());
        }

        subjects.insert(subject.id, subject.clone());
        Ok(subject)
    }
}
