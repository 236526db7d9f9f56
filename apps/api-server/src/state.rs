//! Application state - shared across all handlers.

use std::sync::Arc;

use grove_core::ports::{
    AttachmentRepository, CommentRepository, FileStore, PasswordService, PostRepository,
    SessionStore, TagRepository, UserRepository,
};
use grove_infra::{
    Argon2PasswordService, InMemorySessionStore, LocalFileStore, PostgresAttachmentRepository,
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository, database,
};

use crate::config::AppConfig;

/// Shared application state wired to the Postgres adapters.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub attachments: Arc<dyn AttachmentRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub passwords: Arc<dyn PasswordService>,
    pub files: Arc<dyn FileStore>,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db = database::connect(&config.database).await?;

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            attachments: Arc::new(PostgresAttachmentRepository::new(db)),
            sessions: Arc::new(InMemorySessionStore::new(config.session_ttl)),
            passwords: Arc::new(Argon2PasswordService::new()),
            files: Arc::new(LocalFileStore::new(config.upload_dir.clone())),
        })
    }
}
