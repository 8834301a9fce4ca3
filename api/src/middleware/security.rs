//! Security middleware for HTTPS enforcement and response hardening.
//!
//! Outside development every response carries the hardening headers below,
//! and plain HTTP requests are refused unless a trusted proxy terminated TLS.
//! Guardian links embed a bearer-equivalent token in the query string, so
//! responses are also marked non-cacheable.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{self, HeaderName, HeaderValue},
        StatusCode,
    },
    Error,
};
use futures_util::future::LocalBoxFuture;
use gp_shared::{error_codes, Environment, ErrorResponse};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::dto::error::ErrorResponseExt;

const SECURITY_HEADERS: [(&str, &str); 6] = [
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none';"),
    ("cache-control", "no-store"),
];

/// Security middleware factory
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Rc<Vec<String>>,
}

impl SecurityMiddleware {
    /// Settings for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        let strict = !environment.is_development();
        log::info!(
            "Security middleware configured: enforce_https={}, add_headers={}",
            environment.is_production(),
            strict
        );
        Self {
            enforce_https: environment.is_production(),
            add_security_headers: strict,
            trusted_proxies: Rc::new(Vec::new()),
        }
    }

    /// No HTTPS enforcement, no extra headers
    pub fn development() -> Self {
        Self {
            enforce_https: false,
            add_security_headers: false,
            trusted_proxies: Rc::new(vec!["127.0.0.1".to_string(), "::1".to_string()]),
        }
    }

    /// Trust `X-Forwarded-Proto` from the given proxy addresses
    pub fn with_trusted_proxies(mut self, proxies: Vec<String>) -> Self {
        self.trusted_proxies = Rc::new(proxies);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            add_security_headers: self.add_security_headers,
            trusted_proxies: Rc::clone(&self.trusted_proxies),
        }))
    }
}

/// Security middleware service implementation
pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Rc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
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
        let enforce_https = self.enforce_https;
        let add_security_headers = self.add_security_headers;
        let trusted_proxies = Rc::clone(&self.trusted_proxies);

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req, &trusted_proxies) {
                log::warn!("Insecure request blocked: {} {}", req.method(), req.path());
                let response = ErrorResponse::new(error_codes::BAD_REQUEST, "HTTPS required")
                    .to_response(StatusCode::FORBIDDEN);
                return Ok(req.into_response(response).map_into_right_body());
            }

            let mut response = service.call(req).await?;
            if add_security_headers {
                let headers = response.headers_mut();
                for (name, value) in SECURITY_HEADERS {
                    headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
                }
            }
            Ok(response.map_into_left_body())
        })
    }
}

/// HTTPS, a trusted proxy that terminated TLS, or a loopback host
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[String]) -> bool {
    let conn_info = req.connection_info();
    if conn_info.scheme() == "https" {
        return true;
    }

    if let Some(proto) = req
        .headers()
        .get(HeaderName::from_static("x-forwarded-proto"))
        .and_then(|v| v.to_str().ok())
    {
        let peer = req.peer_addr().map(|addr| addr.ip().to_string()).unwrap_or_default();
        if proto == "https" && trusted_proxies.iter().any(|p| *p == peer) {
            return true;
        }
    }

    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_else(|| conn_info.host());
    host.starts_with("localhost") || host.starts_with("127.0.0.1") || host.starts_with("[::1]")
}
