//! MySQL repository implementations

mod student_repository_impl;
mod subject_repository_impl;
mod token_repository_impl;

pub use student_repository_impl::MySqlStudentRepository;
pub use subject_repository_impl::MySqlSubjectRepository;
pub use token_repository_impl::MySqlTokenRepository;
