//! API v1 route table
//!
//! - `tokens` - guardian validation plus admin issuance, listing and revocation
//! - `notifications` - issue-and-deliver in one call
//! - `students` - student records, dashboard statistics and the subject catalogue

pub mod notifications;
pub mod students;
pub mod tokens;

use actix_web::web;

use crate::middleware::AdminAuth;

/// Register every `/api/v1` route on `cfg`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tokens")
            // Guardian access, no admin token
            .route("/validate", web::get().to(tokens::validate_token))
            .route("", web::get().to(tokens::list_tokens).wrap(AdminAuth))
            .route("", web::post().to(tokens::issue_tokens).wrap(AdminAuth))
            .route("/{id}/revoke", web::patch().to(tokens::revoke_token).wrap(AdminAuth)),
    )
    .service(
        web::scope("/notifications").route(
            "/send",
            web::post().to(notifications::send_notifications).wrap(AdminAuth),
        ),
    )
    .service(
        web::scope("/students")
            .route("", web::get().to(students::list_students).wrap(AdminAuth))
            .route("/stats", web::get().to(students::dashboard_stats).wrap(AdminAuth))
            .route("/import", web::post().to(students::import_students).wrap(AdminAuth))
            .route("/{id}", web::get().to(students::get_student).wrap(AdminAuth)),
    )
    .service(
        web::scope("/subjects")
            .route("", web::get().to(students::list_subjects).wrap(AdminAuth))
            .route("", web::post().to(students::create_subject).wrap(AdminAuth)),
    );
}
