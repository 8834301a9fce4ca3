//! Guardian notification module
//!
//! Builds the report-link messages and sends them through the configured
//! email and SMS providers. Provider implementations live in the infra crate.

mod dispatcher;
mod message;
mod traits;

#[cfg(test)]
pub(crate) mod tests;

pub use dispatcher::NotificationDispatcher;
pub use message::{guardian_email, guardian_sms};
pub use traits::{EmailMessage, EmailSender, SmsSender};
