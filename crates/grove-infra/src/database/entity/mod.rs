//! SeaORM entities mirroring the logical schema.

pub mod attachment;
pub mod comment;
pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
