//! Session gate protecting the profile endpoints.
//!
//! The gate reads the session token from the configured cookie, verifies
//! it with the core `TokenService` and injects the caller's identity into
//! the request. Requests without a valid session are answered with 401 and
//! never reach the handler.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use ps_core::services::token::TokenService;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::error::ApiError;

/// Identity of an authenticated caller, injected into request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// User ID taken from the verified token
    pub user_id: String,
}

/// Session gate middleware factory
#[derive(Clone)]
pub struct SessionGate {
    token_service: Arc<TokenService>,
    cookie_name: Rc<str>,
}

impl SessionGate {
    /// Creates a gate verifying tokens carried in `cookie_name`
    pub fn new(token_service: Arc<TokenService>, cookie_name: impl Into<String>) -> Self {
        Self {
            token_service,
            cookie_name: Rc::from(cookie_name.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
            cookie_name: Rc::clone(&self.cookie_name),
        }))
    }
}

/// Session gate middleware service
pub struct SessionGateMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
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

        let session = match authenticate(&req, &self.token_service, &self.cookie_name) {
            Ok(session) => session,
            Err(reason) => {
                log::debug!("Rejected {} {}: {}", req.method(), req.path(), reason);
                let response = ApiError::Unauthorized.error_response();
                return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
            }
        };

        req.extensions_mut().insert(session);

        Box::pin(async move {
            let response = service.call(req).await?;
            Ok(response.map_into_left_body())
        })
    }
}

/// Verifies the session cookie, returning the reason on failure
fn authenticate(
    req: &ServiceRequest,
    token_service: &TokenService,
    cookie_name: &str,
) -> Result<SessionContext, String> {
    let cookie = req
        .cookie(cookie_name)
        .ok_or_else(|| format!("no {} cookie", cookie_name))?;

    let claims = token_service.verify(cookie.value()).map_err(|e| e.to_string())?;

    Ok(SessionContext {
        user_id: claims.user_id,
    })
}

/// Extractor for the authenticated session
impl FromRequest for SessionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<SessionContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized.into());

        ready(result)
    }
}
