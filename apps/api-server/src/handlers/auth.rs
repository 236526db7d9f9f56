//! Registration, login and profile handlers.

use actix_web::{HttpResponse, web};

use grove_core::domain::{Role, User};
use grove_core::validate;
use grove_shared::dto::{
    LoginRequest, RegisterRequest, SessionResponse, UpdateProfileRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        bio: user.bio,
        role: match user.role {
            Role::Admin => "admin".to_string(),
            Role::Member => "member".to_string(),
        },
        created_at: user.created_at.to_rfc3339(),
    }
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    validate::registration(&req.username, &req.password, &req.email)?;

    // Friendlier than relying on the unique index alone: report which
    // field collided.
    if state.users.find_by_username(&req.username).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "User {} is already registered",
            req.username
        )));
    }
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Mail {} is already registered",
            req.email
        )));
    }

    let password_hash = state.passwords.hash(&req.password)?;
    let user = state
        .users
        .create(User::new(req.username, req.email, password_hash))
        .await?;

    tracing::info!(user_id = %user.id, "Registered user");
    Ok(HttpResponse::Created().json(user_response(user)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = state.passwords.verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    // Starting a session invalidates any previous token for this user.
    let token = state.sessions.start(user.id).await;

    Ok(HttpResponse::Ok().json(SessionResponse {
        token,
        user: user_response(user),
    }))
}

/// POST /api/auth/logout
pub async fn logout(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    state.sessions.end(&identity.token).await;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/auth/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = identity.load(&state).await?;
    Ok(HttpResponse::Ok().json(user_response(user)))
}

/// PUT /api/auth/me
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let user = identity.load(&state).await?;
    let updated = state.users.update_bio(user.id, body.into_inner().bio).await?;

    Ok(HttpResponse::Ok().json(user_response(updated)))
}
