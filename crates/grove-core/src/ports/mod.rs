//! Ports - the traits infrastructure adapters implement.

mod auth;
mod repository;
mod session;
mod storage;

pub use auth::{AuthError, PasswordService};
pub use repository::{
    AttachmentRepository, CommentRepository, PostRepository, TagRepository, UserRepository,
};
pub use session::SessionStore;
pub use storage::FileStore;
