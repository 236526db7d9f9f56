//! PostgreSQL tag repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use uuid::Uuid;

use grove_core::domain::Tag;
use grove_core::error::RepoError;
use grove_core::ports::TagRepository;

use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::{map_db_err, map_step_err};

pub struct PostgresTagRepository {
    db: DbConn,
}

impl PostgresTagRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn create(&self, new_tag: Tag) -> Result<Tag, RepoError> {
        let model: tag::ActiveModel = new_tag.clone().into();
        TagEntity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(new_tag)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Tag>, RepoError> {
        let tags = TagEntity::find()
            .order_by_asc(tag::Column::Title)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(tags.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        // Association rows go before the tag they reference.
        PostTagEntity::delete_many()
            .filter(post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_step_err)?;

        let result = TagEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_step_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }
}
