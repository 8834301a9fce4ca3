//! Mock SMS Service Implementation
//!
//! Logs SMS messages instead of sending them. Used in development and tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use gp_core::services::SmsSender;
use gp_shared::utils::{is_valid_phone_number, mask_phone_number};

/// Mock SMS service for development and testing
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsSender for MockSmsService {
    async fn send_sms(&self, phone: &str, body: &str) -> Result<String, String> {
        if !is_valid_phone_number(phone) {
            return Err(format!(
                "Invalid phone number format: {}",
                mask_phone_number(phone)
            ));
        }

        if self.simulate_failure {
            warn!(phone = %mask_phone_number(phone), "Mock SMS service simulating failure");
            return Err("Simulated SMS sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            count,
            "Mock SMS accepted"
        );
        tracing::debug!(target: "sms_service", body_len = body.len(), "Mock SMS body");

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
