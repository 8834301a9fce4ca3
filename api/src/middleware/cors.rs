//! CORS middleware configuration for the admin dashboard and guardian pages.
//!
//! Development allows any origin. Other environments only allow the origins
//! listed in `cors.allowed_origins` plus the guardian frontend origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use gp_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance configured for the given environment.
pub fn create_cors(config: &CorsConfig, environment: Environment, frontend_url: &str) -> Cors {
    if environment.is_development() {
        create_development_cors(config.max_age)
    } else {
        create_production_cors(config, frontend_url)
    }
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::OPTIONS,
    ]
}

/// Permissive configuration for local frontends and tools
fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::CACHE_CONTROL,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(max_age)
        .supports_credentials()
}

fn create_production_cors(config: &CorsConfig, frontend_url: &str) -> Cors {
    log::info!("Configuring CORS for production environment");

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    let origins = config.origins();
    if origins.is_empty() && config.allowed_origins.trim() == "*" {
        log::warn!("CORS allows any origin");
        return cors.allow_any_origin();
    }

    for origin in origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(&origin);
    }

    let frontend = frontend_url.trim_end_matches('/');
    if !frontend.is_empty() {
        cors = cors.allowed_origin(frontend);
    }

    cors
}
