//! File attachment handlers.
//!
//! Bytes are written to the file store before the metadata row is inserted;
//! if the row insert fails the written file is removed again, so a committed
//! row never references a missing file.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use grove_core::DomainError;
use grove_core::authz;
use grove_core::domain::FileAttachment;
use grove_core::validate;
use grove_shared::dto::AttachmentResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn attachment_response(attachment: FileAttachment) -> AttachmentResponse {
    AttachmentResponse {
        id: attachment.id,
        post_id: attachment.post_id,
        filename: attachment.filename,
        created_at: attachment.created_at.to_rfc3339(),
    }
}

/// POST /api/posts/{id}/files/{filename}
///
/// The request body carries the raw bytes.
pub async fn upload(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, String)>,
    bytes: web::Bytes,
) -> AppResult<HttpResponse> {
    let (post_id, raw_filename) = path.into_inner();
    let user = identity.load(&state).await?;

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    // Only the post's author attaches files to it.
    if !authz::can_edit_post(&user, &post) {
        return Err(DomainError::Unauthorized.into());
    }

    let filename = validate::sanitize_filename(&raw_filename)?;
    let attachment = FileAttachment::new(post_id, filename);

    // File first, row second.
    let storage_path = attachment.storage_path();
    state.files.save(&storage_path, &bytes).await?;

    let attachment = match state.attachments.create(attachment).await {
        Ok(attachment) => attachment,
        Err(e) => {
            // Roll the file back; a leftover byte blob is better than a
            // dangling row, but we try to leave neither.
            if let Err(remove_err) = state.files.remove(&storage_path).await {
                tracing::warn!(%storage_path, error = %remove_err, "Orphan file left behind");
            }
            return Err(e.into());
        }
    };

    tracing::info!(attachment_id = %attachment.id, %post_id, "Stored attachment");
    Ok(HttpResponse::Created().json(attachment_response(attachment)))
}

/// GET /api/posts/{id}/files
pub async fn list(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let attachments = state.attachments.list_for_post(post_id).await?;

    Ok(HttpResponse::Ok().json(
        attachments
            .into_iter()
            .map(attachment_response)
            .collect::<Vec<_>>(),
    ))
}

/// DELETE /api/posts/{post_id}/files/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, id) = path.into_inner();
    let user = identity.load(&state).await?;

    let attachment = state
        .attachments
        .find_by_id(id)
        .await?
        .filter(|a| a.post_id == post_id)
        .ok_or_else(|| AppError::NotFound(format!("File {id} not found")))?;

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    if !authz::can_delete_post(&user, &post) {
        return Err(DomainError::Unauthorized.into());
    }

    // Row first; a file with no row is unreachable garbage, a row with no
    // file is a broken download.
    state.attachments.delete(id).await?;
    if let Err(e) = state.files.remove(&attachment.storage_path()).await {
        tracing::warn!(attachment_id = %id, error = %e, "Orphan file left behind");
    }

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/files/{id}
///
/// Attachments are addressed by their stable id, never by filename, so
/// links in post bodies survive renames.
pub async fn download(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let attachment = state
        .attachments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File {id} not found")))?;

    let bytes = state.files.open(&attachment.storage_path()).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", attachment.filename),
        ))
        .body(bytes))
}
