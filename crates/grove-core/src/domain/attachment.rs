use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File attachment - a stored file associated with one post.
///
/// Body markup references the attachment by `id`, never by filename or
/// storage path, so filenames may repeat across posts and storage can be
/// reorganized without breaking links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: Uuid,
    pub post_id: Uuid,
    /// Sanitized original filename, kept for download headers.
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

impl FileAttachment {
    pub fn new(post_id: Uuid, filename: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            filename,
            created_at: Utc::now(),
        }
    }

    /// Store path namespaced by post id to avoid collisions between posts.
    pub fn storage_path(&self) -> String {
        format!("{}/{}", self.post_id, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_path_is_namespaced_by_post() {
        let a = FileAttachment::new(Uuid::new_v4(), "photo.png".into());
        let b = FileAttachment::new(a.post_id, "photo.png".into());

        assert_ne!(a.storage_path(), b.storage_path());
        assert!(a.storage_path().starts_with(&a.post_id.to_string()));
    }
}
