use uuid::Uuid;

use crate::domain::entities::student::Student;
use crate::domain::value_objects::student_view::StudentFilter;
use crate::repositories::student::{InMemoryStudentRepository, StudentRepository};

fn student(name: &str, urn: i64) -> Student {
    Student::new(name, urn, urn + 50, "B.Tech", Some("Civil Engineering".to_string()), 2020, 2024)
}

#[tokio::test]
async fn test_list_sorted_by_urn() {
    let repo = InMemoryStudentRepository::with_students(vec![
        student("Zoya", 300),
        student("Arjun", 100),
        student("Meera", 200),
    ]);

    let urns: Vec<i64> = repo
        .list(&StudentFilter::default())
        .await
        .unwrap()
        .iter()
        .map(|s| s.urn)
        .collect();
    assert_eq!(urns, vec![100, 200, 300]);
}

#[tokio::test]
async fn test_find_by_ids_skips_missing() {
    let a = student("Arjun", 100);
    let repo = InMemoryStudentRepository::with_students(vec![a.clone()]);

    let found = repo.find_by_ids(&[a.id, Uuid::new_v4()]).await.unwrap();
    assert_eq!(found, vec![a]);
}

#[tokio::test]
async fn test_upsert_replaces_by_urn() {
    let repo = InMemoryStudentRepository::new();
    let first = repo.upsert(student("Arjun", 100)).await.unwrap();

    let mut updated = student("Arjun Mehta", 100);
    updated.guardian_email = Some("mehta@example.com".to_string());
    let second = repo.upsert(updated).await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    let stored = repo.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(stored.full_name, "Arjun Mehta");
    assert_eq!(repo.list(&StudentFilter::default()).await.unwrap().len(), 1);
}
