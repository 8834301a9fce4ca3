//! Delivery of guardian links over email and SMS

use std::sync::Arc;

use gp_shared::utils::{
    is_valid_email, is_valid_phone_number, mask_email, mask_phone_number, normalize_phone_number,
};

use crate::domain::entities::access_token::DeliveryChannel;
use crate::domain::entities::student::Student;
use crate::domain::value_objects::issuance::{
    ChannelStatus, DeliveryOutcome, ItemError, RecipientOverride,
};
use crate::errors::{DeliveryError, ValidationError};

use super::message::{guardian_email, guardian_sms};
use super::traits::{EmailSender, SmsSender};

/// Sends the guardian link through the channels a token was issued for
///
/// Failures are returned inside the [`DeliveryOutcome`]; nothing here is retried.
pub struct NotificationDispatcher {
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
}

impl NotificationDispatcher {
    pub fn new(email: Arc<dyn EmailSender>, sms: Arc<dyn SmsSender>) -> Self {
        Self { email, sms }
    }

    /// Deliver `url` to the guardian of `student`
    ///
    /// Contacts in `recipient` take precedence over the ones stored on the student.
    pub async fn deliver(
        &self,
        student: &Student,
        recipient: Option<&RecipientOverride>,
        channel: DeliveryChannel,
        semester: u32,
        url: &str,
    ) -> DeliveryOutcome {
        let mut outcome = DeliveryOutcome::not_requested();

        if channel.includes_email() {
            let address = pick_contact(
                recipient.and_then(|r| r.email.as_deref()),
                student.guardian_email.as_deref(),
            );
            outcome.email = match self.send_email(student, address, semester, url).await {
                Ok(()) => ChannelStatus::Sent,
                Err(error) => {
                    outcome.errors.push(error);
                    ChannelStatus::Failed
                }
            };
        }

        if channel.includes_sms() {
            let phone = pick_contact(
                recipient.and_then(|r| r.phone.as_deref()),
                student.guardian_phone.as_deref(),
            );
            outcome.sms = match self.send_sms(student, phone, semester, url).await {
                Ok(()) => ChannelStatus::Sent,
                Err(error) => {
                    outcome.errors.push(error);
                    ChannelStatus::Failed
                }
            };
        }

        outcome
    }

    async fn send_email(
        &self,
        student: &Student,
        address: Option<&str>,
        semester: u32,
        url: &str,
    ) -> Result<(), ItemError> {
        let address = address.ok_or_else(|| {
            delivery_item(DeliveryError::MissingContact {
                channel: "email".to_string(),
            })
        })?;
        if !is_valid_email(address) {
            let err = ValidationError::InvalidEmail;
            return Err(ItemError::new(err.code(), err.to_string()));
        }

        let message = guardian_email(address, &student.full_name, semester, url);
        match self.email.send_email(&message).await {
            Ok(message_id) => {
                tracing::info!(
                    student_id = %student.id,
                    to = %mask_email(address),
                    provider = self.email.provider_name(),
                    message_id = %message_id,
                    "Guardian email sent"
                );
                Ok(())
            }
            Err(message) => {
                tracing::error!(
                    student_id = %student.id,
                    to = %mask_email(address),
                    provider = self.email.provider_name(),
                    error = %message,
                    "Guardian email failed"
                );
                Err(delivery_item(DeliveryError::Email { message }))
            }
        }
    }

    async fn send_sms(
        &self,
        student: &Student,
        phone: Option<&str>,
        semester: u32,
        url: &str,
    ) -> Result<(), ItemError> {
        let phone = phone.ok_or_else(|| {
            delivery_item(DeliveryError::MissingContact {
                channel: "phone".to_string(),
            })
        })?;
        if !is_valid_phone_number(phone) {
            let err = ValidationError::InvalidPhone;
            return Err(ItemError::new(err.code(), err.to_string()));
        }
        let phone = normalize_phone_number(phone);

        let body = guardian_sms(&student.full_name, semester, url);
        match self.sms.send_sms(&phone, &body).await {
            Ok(message_id) => {
                tracing::info!(
                    student_id = %student.id,
                    to = %mask_phone_number(&phone),
                    provider = self.sms.provider_name(),
                    message_id = %message_id,
                    "Guardian SMS sent"
                );
                Ok(())
            }
            Err(message) => {
                tracing::error!(
                    student_id = %student.id,
                    to = %mask_phone_number(&phone),
                    provider = self.sms.provider_name(),
                    error = %message,
                    "Guardian SMS failed"
                );
                Err(delivery_item(DeliveryError::Sms { message }))
            }
        }
    }
}

fn pick_contact<'a>(preferred: Option<&'a str>, stored: Option<&'a str>) -> Option<&'a str> {
    preferred
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or_else(|| stored.map(str::trim).filter(|c| !c.is_empty()))
}

fn delivery_item(error: DeliveryError) -> ItemError {
    ItemError::new(error.code(), error.to_string())
}
