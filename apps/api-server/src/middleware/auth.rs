//! Session authentication extractor.
//!
//! Resolves the bearer token from the `Authorization` header against the
//! server-side session store. Identity is always passed on explicitly to
//! repositories and gate checks; there is no ambient current user.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use grove_core::domain::User;
use grove_core::ports::AuthError;
use grove_shared::ErrorResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated session identity.
///
/// Carries only the resolved user id plus the raw token (so logout can end
/// the session); handlers load the full account when a gate check needs it.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub token: String,
}

impl Identity {
    /// Load the full user record behind this session.
    ///
    /// A session pointing at a deleted account resolves to `Unauthorized`.
    pub async fn load(&self, state: &AppState) -> AppResult<User> {
        state
            .users
            .find_by_id(self.user_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::MissingSession | AuthError::InvalidCredentials => {
                actix_web::http::StatusCode::UNAUTHORIZED
            }
            _ => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::MissingSession => ErrorResponse::new(401, "Authentication Required")
                .with_detail("Provide a valid session token in the Authorization header."),
            AuthError::InvalidCredentials => ErrorResponse::unauthorized(),
            _ => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| {
                    tracing::error!("AppState not found in app data");
                    AuthenticationError(AuthError::MissingSession)
                })?
                .clone();

            let token = bearer_token(&req)?.to_owned();

            // Absent or expired tokens resolve to anonymous, which on a
            // protected route means a 401.
            let user_id = state
                .sessions
                .resolve(&token)
                .await
                .ok_or(AuthenticationError(AuthError::MissingSession))?;

            Ok(Identity { user_id, token })
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthenticationError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthenticationError(AuthError::MissingSession))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthenticationError(AuthError::MissingSession))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or(AuthenticationError(AuthError::MissingSession))
}
