//! Business services containing domain logic and use cases.

pub mod admin;
pub mod clock;
pub mod notification;
pub mod student;
pub mod token;

// Re-export commonly used types
pub use admin::AdminTokenVerifier;
pub use clock::{Clock, FixedClock, SystemClock};
pub use notification::{EmailMessage, EmailSender, NotificationDispatcher, SmsSender};
pub use student::StudentService;
pub use token::{TokenIssuer, TokenRegistry, TokenServiceConfig, TokenValidator};
