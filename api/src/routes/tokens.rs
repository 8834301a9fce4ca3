//! Guardian token endpoints

use actix_web::{web, HttpResponse};
use gp_shared::{utils::mask_token, ApiResponse};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::dto::{IssueTokensRequest, ListTokensQuery, ValidateTokenQuery};
use crate::handlers::ApiError;
use crate::middleware::Admin;

/// Handler for GET /api/v1/tokens/validate?token=<value>
///
/// Guardian entry point, no admin authentication. The first successful call
/// consumes the token and returns the student report.
///
/// # Responses
/// - 200: report for the semester the link was sent for
/// - 400: `token` parameter missing or blank
/// - 404: unknown token
/// - 410: token expired, revoked or already used
pub async fn validate_token(
    state: web::Data<AppState>,
    query: web::Query<ValidateTokenQuery>,
) -> Result<HttpResponse, ApiError> {
    let presented = query.token.as_deref().unwrap_or_default();
    log::info!("Guardian token presented: {}", mask_token(presented.trim()));

    let report = state.validator.validate(presented).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report, "Token validated")))
}

/// Handler for POST /api/v1/tokens
///
/// Creates one token per requested student and, with `deliver: true`, sends
/// the guardian links. Responds 201 with per-item results even when some
/// items failed.
pub async fn issue_tokens(
    state: web::Data<AppState>,
    admin: Admin,
    body: web::Json<IssueTokensRequest>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;
    let request = body.into_inner().into_issue_request(state.issuer.config())?;

    let report = state.issuer.issue(&admin, request).await?;
    let message = format!(
        "{} of {} tokens created",
        report.created, report.summary.total
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(report, message)))
}

/// Handler for GET /api/v1/tokens?status=&search=
pub async fn list_tokens(
    state: web::Data<AppState>,
    admin: Admin,
    query: web::Query<ListTokensQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.into_inner().into_filter()?;
    let tokens = state.registry.list_tokens(&admin, &filter).await?;
    let message = format!("{} tokens", tokens.len());
    Ok(HttpResponse::Ok().json(ApiResponse::success(tokens, message)))
}

/// Handler for PATCH /api/v1/tokens/{id}/revoke
pub async fn revoke_token(
    state: web::Data<AppState>,
    admin: Admin,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let token = state.registry.revoke(&admin, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(token, "Token revoked")))
}
