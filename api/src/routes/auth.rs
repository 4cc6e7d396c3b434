use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{web, HttpResponse};
use validator::Validate;

use ps_core::repositories::ProfileRepository;
use ps_shared::config::{SameSitePolicy, SessionConfig};

use crate::app::AppState;
use crate::dto::auth::{IssueTokenRequest, LogoutResponse, SessionResponse, TokenResponse};
use crate::handlers::error::ApiError;
use crate::middleware::auth::SessionContext;

/// Session cookie carrying `value` with the configured attributes
fn session_cookie(session: &SessionConfig, value: String) -> Cookie<'static> {
    let same_site = match session.same_site {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    };

    Cookie::build(session.cookie_name.clone(), value)
        .path(session.path.clone())
        .http_only(session.http_only)
        .secure(session.secure)
        .same_site(same_site)
        .finish()
}

/// Handler for POST /api/auth/token
///
/// Issues a session token for `user_id` and sets it as the session cookie.
/// Answers 404 unless token issuance is enabled in configuration.
///
/// # Request Body
///
/// ```json
/// { "user_id": "alice" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 3600,
///     "expires_at": "2025-01-01T01:00:00Z"
/// }
/// ```
pub async fn issue_token<R>(
    state: web::Data<AppState<R>>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError>
where
    R: ProfileRepository + 'static,
{
    // The body is only looked at once issuance is known to be enabled.
    if !state.allow_token_issuance {
        return Err(ApiError::not_found());
    }

    let request: IssueTokenRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))?;
    request.validate()?;

    let issued = state.token_service.issue(&request.user_id, &state.issuer)?;
    log::info!("Issued session token for {}", request.user_id);

    let mut cookie = session_cookie(&state.session, issued.token.clone());
    cookie.set_max_age(Duration::seconds(issued.expires_in));

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(TokenResponse::from(issued)))
}

/// Handler for POST /api/auth/logout
///
/// Clears the session cookie. Tokens are not revoked server-side; a copied
/// token stays valid until it expires.
pub async fn logout<R>(state: web::Data<AppState<R>>) -> HttpResponse
where
    R: ProfileRepository + 'static,
{
    let mut cookie = session_cookie(&state.session, String::new());
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    })
}

/// Handler for GET /api/me
///
/// Echoes the identity attached by the session gate.
pub async fn me(session: SessionContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        user_id: session.user_id,
    })
}
