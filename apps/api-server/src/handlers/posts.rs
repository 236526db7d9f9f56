//! Post and tag handlers.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use grove_core::DomainError;
use grove_core::authz;
use grove_core::domain::{Post, Tag};
use grove_core::page::{Page, PageRequest};
use grove_core::validate;
use grove_shared::dto::{PageResponse, PostDetailResponse, PostRequest, PostResponse, TagRequest, TagResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn post_response(post: Post, comment_count: u64) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        body: post.body,
        views: post.views,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
        comment_count,
    }
}

pub(crate) fn tag_response(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id,
        title: tag.title,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: u64,
    pub per_page: Option<u64>,
    /// Case-insensitive substring search over title and body.
    pub q: Option<String>,
    /// Filter by tag association instead of searching.
    pub tag_id: Option<Uuid>,
}

/// GET /api/posts?page=&per_page=&q=&tag_id=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();
    let page = PageRequest::new(q.page, q.per_page.unwrap_or(10));

    let result: Page<Post> = match (&q.q, q.tag_id) {
        (Some(text), _) if !text.trim().is_empty() => {
            state.posts.search(text.trim(), page).await?
        }
        (_, Some(tag_id)) => state.posts.list_by_tag(tag_id, page).await?,
        _ => state.posts.list(page).await?,
    };

    // The index page shows a comment total per post.
    let mut items = Vec::with_capacity(result.items.len());
    for post in result.items {
        let comment_count = state.comments.count_for_post(post.id).await?;
        items.push(post_response(post, comment_count));
    }

    Ok(HttpResponse::Ok().json(PageResponse {
        items,
        total: result.total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// GET /api/posts/{id}
///
/// Fetching the detail view counts as a view and bumps the counter.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state.posts.view(id).await?;
    let tags = state.posts.tags_of(id).await?;
    let comments = state.comments.list_for_post(id).await?;
    let comment_count = comments.len() as u64;

    let author_username = state
        .users
        .find_by_id(post.author_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(post, comment_count),
        author_username,
        tags: tags.into_iter().map(tag_response).collect(),
        comments: comments
            .into_iter()
            .map(super::comments::comment_response)
            .collect(),
    }))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let author = identity.load(&state).await?;

    validate::post_input(&req.title, &req.body)?;

    let post = state
        .posts
        .create(Post::new(author.id, req.title, req.body), &req.tag_ids)
        .await?;

    tracing::info!(post_id = %post.id, author_id = %author.id, "Created post");
    Ok(HttpResponse::Created().json(post_response(post, 0)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let user = identity.load(&state).await?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if !authz::can_edit_post(&user, &post) {
        return Err(DomainError::Unauthorized.into());
    }

    validate::post_input(&req.title, &req.body)?;

    let updated = state
        .posts
        .update(id, req.title, req.body, &req.tag_ids)
        .await?;
    let comment_count = state.comments.count_for_post(id).await?;

    Ok(HttpResponse::Ok().json(post_response(updated, comment_count)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let user = identity.load(&state).await?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    if !authz::can_delete_post(&user, &post) {
        return Err(DomainError::Unauthorized.into());
    }

    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, user_id = %user.id, "Deleted post");
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/tags
pub async fn list_tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.list().await?;
    Ok(HttpResponse::Ok().json(
        tags.into_iter().map(tag_response).collect::<Vec<_>>(),
    ))
}

/// POST /api/tags
///
/// Tags have an independent lifecycle and are curated by moderators.
pub async fn create_tag(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<TagRequest>,
) -> AppResult<HttpResponse> {
    let user = identity.load(&state).await?;
    if !authz::can_moderate(&user) {
        return Err(DomainError::Unauthorized.into());
    }

    let title = body.into_inner().title;
    if title.trim().is_empty() {
        return Err(AppError::Validation("Tag title is required".to_string()));
    }

    let tag = state.tags.create(Tag::new(title.trim().to_string())).await?;
    Ok(HttpResponse::Created().json(tag_response(tag)))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = identity.load(&state).await?;
    if !authz::can_moderate(&user) {
        return Err(DomainError::Unauthorized.into());
    }

    state.tags.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
