//! CORS middleware configuration for cross-origin requests.
//!
//! Browsers call the profile API from the frontend origin with the session
//! cookie attached, so credentials are supported unless disabled in config.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use ps_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
///
/// An empty `allowed_origins` list (or one containing `*`) accepts any
/// origin. Preflight `OPTIONS` requests are answered here and never reach
/// the session gate.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::info!("Configuring CORS for any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in config.allowed_origins.iter().map(|s| s.trim()) {
            if !origin.is_empty() {
                log::info!("Adding allowed origin: {}", origin);
                cors = cors.allowed_origin(origin);
            }
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    fn preflight(origin: &str) -> test::TestRequest {
        test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/profile/basic-info")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PUT"))
    }

    #[actix_web::test]
    async fn test_any_origin_preflight() {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&CorsConfig::default()))
                .route("/api/profile/basic-info", web::put().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let resp = test::call_service(&app, preflight("http://localhost:3000").to_request()).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn test_restricted_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["https://profile.example.com".to_string()],
            ..Default::default()
        };
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/api/profile/basic-info", web::put().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let allowed = test::call_service(&app, preflight("https://profile.example.com").to_request()).await;
        assert!(allowed.status().is_success());

        let denied = test::try_call_service(&app, preflight("https://evil.example.com").to_request()).await;
        let denied_ok = match denied {
            Ok(resp) => !resp.status().is_success(),
            Err(_) => true,
        };
        assert!(denied_ok);
    }
}
