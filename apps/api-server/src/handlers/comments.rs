//! Comment handlers, scoped to one post.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use grove_core::DomainError;
use grove_core::authz;
use grove_core::domain::Comment;
use grove_core::validate;
use grove_shared::dto::{CommentRequest, CommentResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        body: comment.body,
        created_at: comment.created_at.to_rfc3339(),
    }
}

/// GET /api/posts/{id}/comments
pub async fn list(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let comments = state.comments.list_for_post(post_id).await?;

    Ok(HttpResponse::Ok().json(
        comments
            .into_iter()
            .map(comment_response)
            .collect::<Vec<_>>(),
    ))
}

/// POST /api/posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();
    let author = identity.load(&state).await?;

    validate::comment_input(&req.body)?;

    // No orphan creation: the post must exist at comment time.
    state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    let comment = state
        .comments
        .create(Comment::new(post_id, author.id, req.body))
        .await?;

    Ok(HttpResponse::Created().json(comment_response(comment)))
}

/// DELETE /api/posts/{post_id}/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, id) = path.into_inner();
    let user = identity.load(&state).await?;

    let comment = state
        .comments
        .find_by_id(id)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or_else(|| AppError::NotFound(format!("Comment {id} not found")))?;

    if !authz::can_delete_comment(&user, &comment) {
        return Err(DomainError::Unauthorized.into());
    }

    state.comments.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}
