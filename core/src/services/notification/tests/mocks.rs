//! Recording provider doubles shared by service tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::services::notification::{EmailMessage, EmailSender, SmsSender};

#[derive(Default)]
pub(crate) struct RecordingEmailSender {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: AtomicBool,
}

impl RecordingEmailSender {
    pub fn failing() -> Self {
        let sender = Self::default();
        sender.fail.store(true, Ordering::SeqCst);
        sender
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("SMTP connection refused".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        Ok(format!("mail-{}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "Recording"
    }
}

#[derive(Default)]
pub(crate) struct RecordingSmsSender {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl RecordingSmsSender {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send_sms(&self, phone: &str, body: &str) -> Result<String, String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("Twilio returned 503".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((phone.to_string(), body.to_string()));
        Ok(format!("SM{}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "Recording"
    }
}
