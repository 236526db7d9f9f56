//! PostgreSQL attachment-row repository.
//!
//! Only the metadata rows live here; bytes go through the `FileStore`, and
//! callers write the file before inserting the row that references it.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use grove_core::domain::FileAttachment;
use grove_core::error::RepoError;
use grove_core::ports::AttachmentRepository;

use super::entity::attachment::{self, Entity as AttachmentEntity};
use super::map_db_err;

pub struct PostgresAttachmentRepository {
    db: DbConn,
}

impl PostgresAttachmentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttachmentRepository for PostgresAttachmentRepository {
    async fn create(&self, new_attachment: FileAttachment) -> Result<FileAttachment, RepoError> {
        let model: attachment::ActiveModel = new_attachment.clone().into();
        AttachmentEntity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(new_attachment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileAttachment>, RepoError> {
        let result = AttachmentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<FileAttachment>, RepoError> {
        let attachments = AttachmentEntity::find()
            .filter(attachment::Column::PostId.eq(post_id))
            .order_by_asc(attachment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(attachments.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = AttachmentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
