//! Student and subject record management

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use gp_shared::BatchSummary;
use uuid::Uuid;

use crate::domain::entities::student::{branch_acronym, Student};
use crate::domain::entities::subject::Subject;
use crate::domain::value_objects::admin::AdminContext;
use crate::domain::value_objects::issuance::ItemError;
use crate::domain::value_objects::student_view::{
    BranchShare, DashboardStats, ImportFailure, ImportReport, StudentFilter, StudentRecord,
};
use crate::errors::{DomainError, ValidationError};
use crate::repositories::{StudentRepository, SubjectRepository};

/// Read and import operations on the student record store
pub struct StudentService {
    students: Arc<dyn StudentRepository>,
    subjects: Arc<dyn SubjectRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>, subjects: Arc<dyn SubjectRepository>) -> Self {
        Self { students, subjects }
    }

    /// Students matching `filter` ordered by URN, with subject details resolved
    pub async fn list_students(
        &self,
        _admin: &AdminContext,
        filter: &StudentFilter,
    ) -> Result<Vec<StudentRecord>, DomainError> {
        let students = self.students.list(filter).await?;
        let catalogue = self.catalogue_for(&students).await?;
        Ok(students
            .iter()
            .map(|s| StudentRecord::resolve(s, &catalogue))
            .collect())
    }

    pub async fn get_student(
        &self,
        _admin: &AdminContext,
        id: Uuid,
    ) -> Result<StudentRecord, DomainError> {
        let student = self
            .students
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "student".to_string(),
            })?;
        let catalogue = self.catalogue_for(std::slice::from_ref(&student)).await?;
        Ok(StudentRecord::resolve(&student, &catalogue))
    }

    /// Aggregate figures for the dashboard
    pub async fn dashboard_stats(&self, _admin: &AdminContext) -> Result<DashboardStats, DomainError> {
        let students = self.students.list(&StudentFilter::default()).await?;

        let detained_students = students.iter().filter(|s| s.is_detained()).count();
        let courses_offered = students
            .iter()
            .map(|s| s.course.as_str())
            .collect::<HashSet<_>>()
            .len();

        let graded: Vec<f64> = students.iter().map(Student::cgpa).filter(|c| *c > 0.0).collect();
        let avg_cgpa = if graded.is_empty() {
            "0.00".to_string()
        } else {
            format!("{:.2}", graded.iter().sum::<f64>() / graded.len() as f64)
        };

        let mut per_branch: BTreeMap<&str, usize> = BTreeMap::new();
        for branch in students.iter().filter_map(|s| s.branch.as_deref()) {
            *per_branch.entry(branch).or_default() += 1;
        }
        let mut branch_distribution: Vec<BranchShare> = per_branch
            .into_iter()
            .map(|(name, count)| BranchShare {
                branch: branch_acronym(name),
                full_name: name.to_string(),
                students: count,
            })
            .collect();
        // Stable sort keeps branches with equal counts in name order
        branch_distribution.sort_by(|a, b| b.students.cmp(&a.students));

        Ok(DashboardStats {
            total_students: students.len(),
            detained_students,
            courses_offered,
            avg_cgpa,
            branch_distribution,
        })
    }

    /// Insert or update (by URN) a batch of student records
    ///
    /// Invalid records are reported and skipped; the rest are stored.
    pub async fn import_students(
        &self,
        admin: &AdminContext,
        students: Vec<Student>,
    ) -> Result<ImportReport, DomainError> {
        let total = students.len();
        let catalogue = self.catalogue_for(&students).await?;
        let mut failures = Vec::new();

        for student in students {
            let urn = student.urn;
            if let Err(err) = student.validate().and_then(|_| check_marks(&student, &catalogue)) {
                failures.push(ImportFailure {
                    urn,
                    error: ItemError::new(err.code(), err.to_string()),
                });
                continue;
            }
            self.students.upsert(student).await?;
        }

        let summary = BatchSummary {
            total,
            successful: total - failures.len(),
            failed: failures.len(),
        };
        tracing::info!(
            admin_id = %admin.admin_id,
            imported = summary.successful,
            rejected = summary.failed,
            "Student records imported"
        );
        Ok(ImportReport { summary, failures })
    }

    pub async fn list_subjects(&self, _admin: &AdminContext) -> Result<Vec<Subject>, DomainError> {
        self.subjects.list_all().await
    }

    /// Validate and store a new subject
    pub async fn create_subject(
        &self,
        admin: &AdminContext,
        mut subject: Subject,
    ) -> Result<Subject, DomainError> {
        subject.normalize();
        subject.validate()?;
        let created = self.subjects.create(subject).await?;
        tracing::info!(admin_id = %admin.admin_id, code = %created.code, "Subject created");
        Ok(created)
    }

    async fn catalogue_for(&self, students: &[Student]) -> Result<HashMap<Uuid, Subject>, DomainError> {
        let ids: Vec<Uuid> = students
            .iter()
            .flat_map(|s| s.semesters.iter())
            .flat_map(|sem| sem.subjects.iter().map(|p| p.subject_id))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(self
            .subjects
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect())
    }
}

/// Every performance must reference a known subject and stay within its maxima
fn check_marks(student: &Student, catalogue: &HashMap<Uuid, Subject>) -> Result<(), ValidationError> {
    for performance in student.semesters.iter().flat_map(|s| s.subjects.iter()) {
        let subject = catalogue.get(&performance.subject_id).ok_or_else(|| {
            ValidationError::BusinessRuleViolation {
                rule: format!("Unknown subject {}", performance.subject_id),
            }
        })?;
        performance.validate_against(subject)?;
    }
    Ok(())
}
