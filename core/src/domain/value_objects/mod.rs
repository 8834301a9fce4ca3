//! Value objects representing immutable domain concepts.

pub mod admin;
pub mod issuance;
pub mod student_view;


// Re-export commonly used types
pub use admin::{AdminClaims, AdminContext};
pub use issuance::{
    ChannelStatus, DeliveryOutcome, IssuanceItem, IssuanceReport, IssueRequest, ItemError,
    RecipientOverride, TokenFilter, TokenView,
};
pub use student_view::{
    BranchShare, DashboardStats, GuardianReport, ImportFailure, ImportReport, SemesterView,
    StudentFilter, StudentRecord, StudentSummary, SubjectInfo, SubjectResult,
};
