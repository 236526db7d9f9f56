use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, FileAttachment, Post, Tag, User};
use crate::error::RepoError;
use crate::page::{Page, PageRequest};

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Duplicate username or email is a [`RepoError::Conflict`].
    async fn create(&self, user: User) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Self-service profile update (biography).
    async fn update_bio(&self, id: Uuid, bio: String) -> Result<User, RepoError>;

    /// Admin user table, newest accounts first.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, RepoError>;

    /// Delete a user and cascade over owned posts (with their dependents)
    /// and authored comments, all in one transaction.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Post repository.
///
/// Listing operations order by creation time descending and return the
/// total row count alongside the page.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert the post and one association row per tag, all-or-nothing.
    async fn create(&self, post: Post, tag_ids: &[Uuid]) -> Result<Post, RepoError>;

    /// Replace title/body, stamp `updated_at`, and reconcile the tag set by
    /// diffing against current associations (insert missing, delete removed).
    async fn update(
        &self,
        id: Uuid,
        title: String,
        body: String,
        tag_ids: &[Uuid],
    ) -> Result<Post, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Fetch a post and bump its view counter by one.
    ///
    /// The increment is read-then-write; concurrent viewers may lose an
    /// update, which is an accepted approximation.
    async fn view(&self, id: Uuid) -> Result<Post, RepoError>;

    /// Delete associations, comments and attachment rows, then the post,
    /// in that dependency order, all in one transaction.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    async fn list(&self, page: PageRequest) -> Result<Page<Post>, RepoError>;

    /// Case-insensitive substring match on title or body.
    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<Post>, RepoError>;

    /// Posts carrying the given tag.
    async fn list_by_tag(&self, tag_id: Uuid, page: PageRequest) -> Result<Page<Post>, RepoError>;

    /// Tags associated with a post, ordered by title.
    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;
}

/// Comment repository, scoped to one post.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: Comment) -> Result<Comment, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError>;

    /// Comments on a post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Insert a new tag. Duplicate title is a [`RepoError::Conflict`].
    async fn create(&self, tag: Tag) -> Result<Tag, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError>;

    /// All tags, ordered by title.
    async fn list(&self) -> Result<Vec<Tag>, RepoError>;

    /// Delete a tag, clearing its association rows first.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Attachment row repository. File bytes live in the [`FileStore`];
/// callers write the file before inserting the row that references it.
///
/// [`FileStore`]: super::FileStore
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    async fn create(&self, attachment: FileAttachment) -> Result<FileAttachment, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileAttachment>, RepoError>;

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<FileAttachment>, RepoError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
