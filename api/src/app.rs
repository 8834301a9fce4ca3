//! Application state and factory
//!
//! This module wires the core services over the configured infrastructure
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    middleware::Logger,
    web, App, HttpRequest, HttpResponse,
};
use gp_core::errors::DomainError;
use gp_core::services::{
    AdminTokenVerifier, Clock, NotificationDispatcher, StudentService, TokenIssuer, TokenRegistry,
    TokenServiceConfig, TokenValidator,
};
use gp_infra::InfrastructureServices;
use gp_shared::{error_codes, types::HealthResponse, AppConfig, ErrorResponse};

use crate::handlers::ApiError;
use crate::middleware::{create_cors, SecurityMiddleware};
use crate::routes;

/// Shared services handed to every handler
pub struct AppState {
    pub issuer: TokenIssuer,
    pub validator: TokenValidator,
    pub registry: TokenRegistry,
    pub students: StudentService,
    pub verifier: AdminTokenVerifier,
    pub infrastructure: InfrastructureServices,
    pub config: AppConfig,
}

impl AppState {
    /// Build the services over `infrastructure`, reading time from `clock`
    pub fn new(config: AppConfig, infrastructure: InfrastructureServices, clock: Arc<dyn Clock>) -> Self {
        let token_config = TokenServiceConfig::from(&config.tokens);
        let dispatcher = Arc::new(NotificationDispatcher::new(
            infrastructure.email.clone(),
            infrastructure.sms.clone(),
        ));

        Self {
            issuer: TokenIssuer::new(
                infrastructure.tokens.clone(),
                infrastructure.students.clone(),
                dispatcher,
                clock.clone(),
                token_config,
            ),
            validator: TokenValidator::new(
                infrastructure.tokens.clone(),
                infrastructure.students.clone(),
                infrastructure.subjects.clone(),
                clock.clone(),
            ),
            registry: TokenRegistry::new(
                infrastructure.tokens.clone(),
                infrastructure.students.clone(),
                clock,
            ),
            students: StudentService::new(
                infrastructure.students.clone(),
                infrastructure.subjects.clone(),
            ),
            verifier: AdminTokenVerifier::new(&config.auth),
            infrastructure,
            config,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let config = &app_state.config;
    let cors = create_cors(&config.cors, config.environment, &config.tokens.frontend_url);
    let security = SecurityMiddleware::for_environment(config.environment);
    let verifier = web::Data::new(app_state.verifier.clone());
    let json_config = web::JsonConfig::default()
        .limit(config.server.max_payload_size)
        .error_handler(json_error);

    App::new()
        .app_data(app_state)
        .app_data(verifier)
        .app_data(json_config)
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        // Middleware runs in reverse registration order: security, CORS, logging
        .wrap(access_logger())
        .wrap(cors)
        .wrap(security)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(health_check))
                .configure(routes::configure),
        )
        .default_service(web::route().to(not_found))
}

/// Access log without query strings
///
/// Guardian tokens travel in the query of `/tokens/validate`, so the request
/// line is rebuilt from method, path and version instead of `%r`.
fn access_logger() -> Logger {
    Logger::new(r#"%a "%{request_line}xi" %s %b "%{User-Agent}i" %T"#)
        .custom_request_replace("request_line", |req| {
            format!("{} {} {:?}", req.method(), req.path(), req.version())
        })
}

/// Health check endpoint handler
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let healthy = state.infrastructure.is_healthy().await;
    let body = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        service: "guardian-portal-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(format!("Invalid JSON body: {}", err))
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(format!("Invalid query string: {}", err))
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Unmatched path parameter: {}", err);
    ApiError(DomainError::NotFound {
        resource: "resource".to_string(),
    })
    .into()
}

fn bad_request(message: String) -> actix_web::Error {
    ApiError(DomainError::Validation { message }).into()
}
