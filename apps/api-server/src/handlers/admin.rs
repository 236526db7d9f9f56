//! Admin moderation handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use grove_core::DomainError;
use grove_core::authz;
use grove_core::page::PageRequest;
use grove_shared::dto::PageResponse;

use super::auth::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
}

/// GET /api/admin/users
pub async fn list_users(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<UserListQuery>,
) -> AppResult<HttpResponse> {
    let admin = identity.load(&state).await?;
    if !authz::can_moderate(&admin) {
        return Err(DomainError::Unauthorized.into());
    }

    let q = query.into_inner();
    let page = PageRequest::new(q.page, q.per_page.unwrap_or(20));
    let users = state.users.list(page).await?;

    Ok(HttpResponse::Ok().json(PageResponse {
        items: users.items.into_iter().map(user_response).collect::<Vec<_>>(),
        total: users.total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// DELETE /api/admin/users/{id}
///
/// Cascades over the user's posts, comments and attachments.
pub async fn delete_user(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let admin = identity.load(&state).await?;
    if !authz::can_moderate(&admin) {
        return Err(DomainError::Unauthorized.into());
    }

    let id = path.into_inner();
    state.users.delete(id).await?;

    tracing::info!(user_id = %id, admin_id = %admin.id, "Deleted user");
    Ok(HttpResponse::NoContent().finish())
}
