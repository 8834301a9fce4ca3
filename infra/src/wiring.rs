//! Infrastructure service container
//!
//! Picks the persistence backend and the notification providers named in
//! [`AppConfig`] and hands them out as core trait objects.

use std::sync::Arc;

use gp_core::repositories::{
    InMemoryStudentRepository, InMemorySubjectRepository, InMemoryTokenRepository,
    StudentRepository, SubjectRepository, TokenRepository,
};
use gp_core::services::{EmailSender, SmsSender};
use gp_shared::{AppConfig, StorageBackend};

use crate::database::{DatabasePool, MySqlStudentRepository, MySqlSubjectRepository, MySqlTokenRepository};
use crate::mail::create_email_sender;
use crate::sms::create_sms_service;
use crate::InfrastructureError;

/// Repositories and senders selected by configuration
#[derive(Clone)]
pub struct InfrastructureServices {
    pub tokens: Arc<dyn TokenRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub subjects: Arc<dyn SubjectRepository>,
    pub email: Arc<dyn EmailSender>,
    pub sms: Arc<dyn SmsSender>,

    /// Present only with the MySQL backend
    pub database: Option<DatabasePool>,
}

impl InfrastructureServices {
    /// Process-local repositories with the given senders
    pub fn in_memory(email: Arc<dyn EmailSender>, sms: Arc<dyn SmsSender>) -> Self {
        Self {
            tokens: Arc::new(InMemoryTokenRepository::new()),
            students: Arc::new(InMemoryStudentRepository::new()),
            subjects: Arc::new(InMemorySubjectRepository::new()),
            email,
            sms,
            database: None,
        }
    }

    /// MySQL-backed repositories sharing one pool
    pub fn mysql(pool: DatabasePool, email: Arc<dyn EmailSender>, sms: Arc<dyn SmsSender>) -> Self {
        let raw = pool.get_pool().clone();
        Self {
            tokens: Arc::new(MySqlTokenRepository::new(raw.clone())),
            students: Arc::new(MySqlStudentRepository::new(raw.clone())),
            subjects: Arc::new(MySqlSubjectRepository::new(raw)),
            email,
            sms,
            database: Some(pool),
        }
    }

    /// `true` when no database is configured or the database answers
    pub async fn is_healthy(&self) -> bool {
        match &self.database {
            Some(pool) => pool.health_check().await.unwrap_or(false),
            None => true,
        }
    }
}

/// Initialize infrastructure services
///
/// With the MySQL backend this opens the pool and, when configured, applies
/// the embedded migrations.
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(backend = ?config.storage.backend, "Initializing infrastructure services");

    let email = create_email_sender(&config.mail);
    let sms = create_sms_service(&config.sms);

    let services = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            InfrastructureServices::in_memory(email, sms)
        }
        StorageBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone()).await?;
            if config.database.run_migrations {
                pool.run_migrations().await?;
            }
            InfrastructureServices::mysql(pool, email, sms)
        }
    };

    tracing::info!(
        email_provider = services.email.provider_name(),
        sms_provider = services.sms.provider_name(),
        "Infrastructure services initialized successfully"
    );
    Ok(services)
}
