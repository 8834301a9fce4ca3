pub mod error;
pub mod students;
pub mod tokens;

pub use error::{ErrorResponse, ErrorResponseExt};
pub use students::{CreateSubjectRequest, ImportStudentsRequest, ListStudentsQuery, StudentImportDto};
pub use tokens::{
    IssueTokensRequest, ListTokensQuery, RecipientDto, SendNotificationsRequest,
    ValidateTokenQuery,
};
