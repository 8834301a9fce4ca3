//! Student record store operations (listing, stats, import, subject catalogue)

mod service;


pub use service::StudentService;
