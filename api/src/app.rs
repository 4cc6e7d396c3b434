//! Application state and factory
//!
//! This module holds the shared application state and provides the
//! factory for creating the Actix-web application.

use std::sync::Arc;
use actix_web::{middleware::Logger, web, App, HttpResponse, ResponseError};

use ps_core::repositories::ProfileRepository;
use ps_core::services::{ProfileService, TokenService};
use ps_shared::config::{AuthConfig, CorsConfig, SessionConfig};

use crate::handlers::error::{json_error_handler, ApiError};
use crate::middleware::{auth::SessionGate, cors::create_cors};
use crate::routes::{auth, profile};

/// Application state shared by all handlers
pub struct AppState<R>
where
    R: ProfileRepository,
{
    /// Profile use cases over the configured store
    pub profile_service: ProfileService<R>,
    /// Token issuance and verification
    pub token_service: Arc<TokenService>,
    /// Session cookie attributes
    pub session: SessionConfig,
    /// Issuer written into tokens minted by this service
    pub issuer: String,
    /// Whether `POST /api/auth/token` is served
    pub allow_token_issuance: bool,
}

impl<R> AppState<R>
where
    R: ProfileRepository,
{
    pub fn new(repository: Arc<R>, token_service: Arc<TokenService>, auth: &AuthConfig) -> Self {
        Self {
            profile_service: ProfileService::new(repository),
            token_service,
            session: auth.session.clone(),
            issuer: auth.jwt.issuer.clone(),
            allow_token_issuance: auth.allow_token_issuance,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<R>(
    app_state: web::Data<AppState<R>>,
    cors_config: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: ProfileRepository + 'static,
{
    let gate = SessionGate::new(
        Arc::clone(&app_state.token_service),
        app_state.session.cookie_name.clone(),
    );
    let cors = create_cors(cors_config);

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))

        // Logger outermost so rejected and preflight requests are logged too
        .wrap(cors)
        .wrap(Logger::default())

        // Health check endpoint
        .route("/health", web::get().to(health_check))

        .service(
            web::scope("/api")
                // Session issuance and teardown
                .service(
                    web::scope("/auth")
                        .route("/token", web::post().to(auth::issue_token::<R>))
                        .route("/logout", web::post().to(auth::logout::<R>)),
                )
                // Everything below requires a valid session cookie
                .service(
                    web::resource("/me")
                        .wrap(gate.clone())
                        .route(web::get().to(auth::me)),
                )
                .service(
                    web::resource("/profile/basic-info")
                        .wrap(gate)
                        .route(web::get().to(profile::get_basic_info::<R>))
                        .route(web::put().to(profile::update_basic_info::<R>)),
                ),
        )

        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "profile-system-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ApiError::not_found().error_response()
}
