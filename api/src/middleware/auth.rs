//! Admin authentication middleware for the management endpoints.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! verifies it with the [`AdminTokenVerifier`] registered as app data and
//! injects the resulting [`AdminContext`] into the request extensions.
//! Handlers receive it through the [`Admin`] extractor.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use gp_core::{domain::AdminContext, errors::DomainError, services::AdminTokenVerifier};
use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::error::{handle_domain_error, ApiError};

/// Admin authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminAuth;

impl AdminAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Admin authentication middleware service
pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req) {
                Ok(admin) => {
                    req.extensions_mut().insert(admin);
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(error) => {
                    log::warn!("Admin request rejected: {} {}", req.method(), req.path());
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AdminContext, DomainError> {
    let token = extract_bearer_token(req).ok_or(DomainError::Unauthorized)?;
    let verifier = req
        .app_data::<web::Data<AdminTokenVerifier>>()
        .ok_or_else(|| DomainError::internal("Admin token verifier is not configured"))?;
    verifier.verify(&token)
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Verified administrator of the current request
#[derive(Debug, Clone)]
pub struct Admin(pub AdminContext);

impl Deref for Admin {
    type Target = AdminContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Admin {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AdminContext>()
            .cloned()
            .map(Admin)
            .ok_or(ApiError(DomainError::Unauthorized));

        ready(result)
    }
}
