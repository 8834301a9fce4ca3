//! Domain entities representing core business objects.

pub mod access_token;
pub mod student;
pub mod subject;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use access_token::{
    AccessToken, DeliveryChannel, ExpiryOption, TokenStatus, DEFAULT_SEMESTER, TOKEN_VALUE_BYTES,
};
pub use student::{
    branch_acronym, PerformanceStatus, SemesterRecord, Student, SubjectPerformance,
};
pub use subject::{Subject, SubjectType};
