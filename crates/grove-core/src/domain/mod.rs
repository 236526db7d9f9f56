//! Domain entities - the core business objects.

mod attachment;
mod comment;
mod post;
mod tag;
mod user;

pub use attachment::FileAttachment;
pub use comment::Comment;
pub use post::Post;
pub use tag::Tag;
pub use user::{Role, User};
