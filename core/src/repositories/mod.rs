pub mod student;
pub mod subject;
pub mod token;

pub use student::{InMemoryStudentRepository, StudentRepository};
pub use subject::{InMemorySubjectRepository, SubjectRepository};
pub use token::{InMemoryTokenRepository, TokenRepository};
