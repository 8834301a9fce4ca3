//! SMTP email delivery through lettre

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use gp_core::services::{EmailMessage, EmailSender};
use gp_shared::utils::mask_email;
use gp_shared::MailConfig;

use crate::InfrastructureError;

/// Email sender backed by an SMTP relay
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Build the transport; no connection is opened until the first send
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        if config.username.is_empty() || config.password.is_empty() {
            return Err(InfrastructureError::Config(
                "mail.username and mail.password are required for SMTP".to_string(),
            ));
        }

        let from = sender_mailbox(config)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Mail(format!("Invalid SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP email sender initialized"
        );

        Ok(Self { transport, from })
    }
}

/// Parse the configured sender into a mailbox
pub fn sender_mailbox(config: &MailConfig) -> Result<Mailbox, InfrastructureError> {
    config
        .from_mailbox()
        .parse::<Mailbox>()
        .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))
}

/// Build a multipart (plain text + HTML) message
pub fn build_message(from: &Mailbox, message: &EmailMessage) -> Result<Message, InfrastructureError> {
    let to = message
        .to
        .parse::<Mailbox>()
        .map_err(|e| InfrastructureError::Mail(format!("Invalid recipient address: {}", e)))?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(message.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            message.text_body.clone(),
            message.html_body.clone(),
        ))
        .map_err(|e| InfrastructureError::Mail(format!("Failed to build email: {}", e)))
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        let email = build_message(&self.from, message).map_err(|e| e.to_string())?;

        match self.transport.send(email).await {
            Ok(response) => {
                let reply = response
                    .message()
                    .map(|line| line.to_string())
                    .collect::<Vec<String>>()
                    .join(" ");
                info!(
                    provider = "smtp",
                    to = %mask_email(&message.to),
                    code = %response.code(),
                    "Email sent"
                );
                Ok(reply)
            }
            Err(e) => {
                error!(provider = "smtp", to = %mask_email(&message.to), error = %e, "Email delivery failed");
                Err(e.to_string())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }
}
