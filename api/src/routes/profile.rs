use actix_web::{web, HttpResponse};
use validator::Validate;

use ps_core::repositories::ProfileRepository;

use crate::app::AppState;
use crate::dto::profile::{BasicInfoRequest, BasicInfoResponse};
use crate::handlers::error::ApiError;
use crate::middleware::auth::SessionContext;

/// Handler for GET /api/profile/basic-info
///
/// Returns the stored profile, or a record of empty strings when nothing
/// has been written yet.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "student_id": "24X1234",
///     "faculty": "Engineering",
///     "last_name": "Yamada",
///     "first_name": "Taro",
///     "nickname": "taro",
///     "self_introduction": "Hello"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid session cookie
/// - 500 Internal Server Error: Profile store failure
pub async fn get_basic_info<R>(
    state: web::Data<AppState<R>>,
    session: SessionContext,
) -> Result<HttpResponse, ApiError>
where
    R: ProfileRepository + 'static,
{
    log::debug!("Reading basic info for {}", session.user_id);

    let profile = state.profile_service.get_basic_info().await?;
    Ok(HttpResponse::Ok().json(BasicInfoResponse::from(profile)))
}

/// Handler for PUT /api/profile/basic-info
///
/// Overwrites the stored profile with the request body and echoes it back.
///
/// # Errors
/// - 400 Bad Request: Malformed JSON, missing fields or over-long values
/// - 401 Unauthorized: Missing or invalid session cookie
/// - 500 Internal Server Error: Profile store failure
pub async fn update_basic_info<R>(
    state: web::Data<AppState<R>>,
    session: SessionContext,
    request: web::Json<BasicInfoRequest>,
) -> Result<HttpResponse, ApiError>
where
    R: ProfileRepository + 'static,
{
    let request = request.into_inner();
    request.validate()?;

    let saved = state
        .profile_service
        .update_basic_info(&session.user_id, request.into())
        .await?;

    Ok(HttpResponse::Ok().json(BasicInfoResponse::from(saved)))
}
