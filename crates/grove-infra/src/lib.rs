//! # Grove Infrastructure
//!
//! Concrete implementations of the ports defined in `grove-core`:
//! SeaORM/Postgres repositories, the Argon2 credential store, the in-memory
//! session store and the local-filesystem file store.

pub mod auth;
pub mod database;
pub mod session;
pub mod storage;

pub use auth::Argon2PasswordService;
pub use database::{
    DatabaseConfig, PostgresAttachmentRepository, PostgresCommentRepository,
    PostgresPostRepository, PostgresTagRepository, PostgresUserRepository,
};
pub use session::InMemorySessionStore;
pub use storage::LocalFileStore;
