//! Mock email sender for development
//!
//! Logs messages instead of sending them and counts deliveries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use gp_core::services::{EmailMessage, EmailSender};
use gp_shared::utils::{is_valid_email, mask_email};

#[derive(Clone)]
pub struct MockEmailSender {
    message_count: Arc<AtomicU64>,
    simulate_failure: bool,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// A sender whose every delivery fails
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::new()
        }
    }

    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        if !is_valid_email(&message.to) {
            return Err(format!("Invalid recipient address: {}", mask_email(&message.to)));
        }
        if self.simulate_failure {
            return Err("Simulated email delivery failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "mail_service",
            provider = "mock",
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            count,
            "Mock email accepted"
        );
        tracing::debug!(target: "mail_service", body_len = message.text_body.len(), "Mock email body");

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
