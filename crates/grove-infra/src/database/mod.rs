//! SeaORM/Postgres content repositories.

mod connections;
pub mod entity;

mod attachment_repo;
mod comment_repo;
mod post_repo;
mod tag_repo;
mod user_repo;

pub use attachment_repo::PostgresAttachmentRepository;
pub use comment_repo::PostgresCommentRepository;
pub use connections::{DatabaseConfig, connect};
pub use post_repo::PostgresPostRepository;
pub use tag_repo::PostgresTagRepository;
pub use user_repo::PostgresUserRepository;

use grove_core::error::RepoError;
use sea_orm::DbErr;

/// Map a driver error onto the repository taxonomy.
///
/// SeaORM surfaces constraint failures as strings; unique violations become
/// [`RepoError::Conflict`], everything else a query failure.
pub(crate) fn map_db_err(e: DbErr) -> RepoError {
    let msg = e.to_string();
    if msg.contains("duplicate") || msg.contains("unique") {
        RepoError::Conflict(msg)
    } else {
        RepoError::Query(msg)
    }
}

/// Variant used inside multi-step transactions: a non-unique failure means
/// the compound operation aborted partway.
pub(crate) fn map_step_err(e: DbErr) -> RepoError {
    match map_db_err(e) {
        RepoError::Conflict(msg) => RepoError::Conflict(msg),
        other => RepoError::Constraint(other.to_string()),
    }
}

#[cfg(test)]
mod tests;
