use actix_web::{web, HttpResponse};
use gp_shared::ApiResponse;
use validator::Validate;

use crate::app::AppState;
use crate::dto::SendNotificationsRequest;
use crate::handlers::ApiError;
use crate::middleware::Admin;

/// Handler for POST /api/v1/notifications/send
///
/// Issues a fresh token for every recipient and always delivers the link,
/// preferring the contact given in the request over the stored guardian
/// contact.
pub async fn send_notifications(
    state: web::Data<AppState>,
    admin: Admin,
    body: web::Json<SendNotificationsRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let request = body.into_inner().into_issue_request(state.issuer.config())?;

    let report = state.issuer.issue(&admin, request).await?;
    let summary = report.summary;
    log::info!(
        "Guardian notifications sent by {}: {} ok, {} failed",
        admin.admin_id,
        summary.successful,
        summary.failed
    );

    let message = if summary.failed == 0 {
        format!("Notifications sent to {} guardians", summary.successful)
    } else {
        format!(
            "Notifications sent to {} of {} guardians",
            summary.successful, summary.total
        )
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(report, message)))
}
