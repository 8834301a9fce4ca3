//! Shared setup for the route tests: in-memory stores, mock senders and a
//! manually driven clock.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, test, web};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use gp_api::AppState;
use gp_core::domain::{SemesterRecord, Student, Subject, SubjectPerformance, SubjectType};
use gp_core::repositories::{StudentRepository, SubjectRepository};
use gp_core::services::FixedClock;
use gp_infra::mail::MockEmailSender;
use gp_infra::sms::MockSmsService;
use gp_infra::InfrastructureServices;
use gp_shared::AppConfig;

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub clock: Arc<FixedClock>,
    pub email: Arc<MockEmailSender>,
    pub admin_token: String,
    pub students: Vec<Student>,
    pub subject: Subject,
}

impl TestContext {
    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.admin_token))
    }

    pub fn student_id(&self, index: usize) -> String {
        self.students[index].id.to_string()
    }
}

fn subject() -> Subject {
    Subject {
        id: Uuid::new_v4(),
        title: "Data Structures".to_string(),
        code: "CS-201".to_string(),
        subject_type: SubjectType::Theory,
        credits: 4.0,
        max_internal_marks: 40,
        max_external_marks: 60,
        max_total_marks: 100,
        min_internal_pass_marks: 16,
        min_external_pass_marks: 24,
        min_total_pass_marks: 40,
    }
}

fn student(name: &str, urn: i64, subject_id: Uuid) -> Student {
    let mut s = Student::new(
        name,
        urn,
        urn + 1000,
        "B.Tech",
        Some("Computer Science Engineering".to_string()),
        2022,
        2026,
    );
    s.guardian_email = Some(format!("guardian{}@example.com", urn));
    s.guardian_phone = Some("+919876543210".to_string());
    s.semesters.push(SemesterRecord {
        semester_number: 1,
        sgpa: 8.6,
        subjects: vec![SubjectPerformance {
            subject_id,
            internal_marks: 34,
            external_marks: 51,
            internal_detained: false,
            external_detained: false,
        }],
    });
    s
}

pub async fn context() -> TestContext {
    context_with(AppConfig::default()).await
}

pub async fn context_with(config: AppConfig) -> TestContext {
    let email = Arc::new(MockEmailSender::new());
    let infrastructure =
        InfrastructureServices::in_memory(email.clone(), Arc::new(MockSmsService::new()));

    let subject = infrastructure.subjects.create(subject()).await.unwrap();
    let mut students = Vec::new();
    for (name, urn) in [("Kavya Iyer", 4101), ("Rohan Mehta", 4102)] {
        let stored = infrastructure
            .students
            .upsert(student(name, urn, subject.id))
            .await
            .unwrap();
        students.push(stored);
    }

    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 9, 2, 9, 0, 0).unwrap(),
    ));
    let state = AppState::new(config, infrastructure, clock.clone());
    let admin_token = state
        .verifier
        .issue("admin-1", Some("registrar@example.edu".to_string()))
        .unwrap();

    TestContext {
        state: web::Data::new(state),
        clock,
        email,
        admin_token,
        students,
        subject,
    }
}

pub async fn json_body<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    test::read_body_json(resp).await
}
