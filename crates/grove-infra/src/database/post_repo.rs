//! PostgreSQL post repository.
//!
//! Compound operations (create with tags, delete with dependents) run in a
//! single transaction; nothing partial ever commits.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use grove_core::domain::{Post, Tag};
use grove_core::error::RepoError;
use grove_core::page::{Page, PageRequest};
use grove_core::ports::PostRepository;

use super::entity::attachment::{self, Entity as AttachmentEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::{map_db_err, map_step_err};

pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn page_of(
        &self,
        query: sea_orm::Select<PostEntity>,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let paginator = query
            .order_by_desc(post::Column::CreatedAt)
            .paginate(&self.db, page.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator.fetch_page(page.page).await.map_err(map_db_err)?;

        Ok(Page::new(items.into_iter().map(Into::into).collect(), total))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, new_post: Post, tag_ids: &[Uuid]) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model: post::ActiveModel = new_post.clone().into();
        PostEntity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(map_step_err)?;

        if !tag_ids.is_empty() {
            let rows = tag_ids.iter().map(|tag_id| post_tag::ActiveModel {
                post_id: Set(new_post.id),
                tag_id: Set(*tag_id),
            });
            PostTagEntity::insert_many(rows)
                .exec_without_returning(&txn)
                .await
                .map_err(map_step_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id = %new_post.id, tags = tag_ids.len(), "Created post");
        Ok(new_post)
    }

    async fn update(
        &self,
        id: Uuid,
        title: String,
        body: String,
        tag_ids: &[Uuid],
    ) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let current = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let now = Utc::now();
        PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(title.clone()))
            .col_expr(post::Column::Body, Expr::value(body.clone()))
            .col_expr(
                post::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(now)),
            )
            .filter(post::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(map_step_err)?;

        // Reconcile the tag set by diffing, not delete-all-then-reinsert,
        // so an unchanged set touches no association rows.
        let existing: HashSet<Uuid> = PostTagEntity::find()
            .filter(post_tag::Column::PostId.eq(id))
            .all(&txn)
            .await
            .map_err(map_step_err)?
            .into_iter()
            .map(|row| row.tag_id)
            .collect();
        let requested: HashSet<Uuid> = tag_ids.iter().copied().collect();

        let missing: Vec<Uuid> = requested.difference(&existing).copied().collect();
        let removed: Vec<Uuid> = existing.difference(&requested).copied().collect();

        if !missing.is_empty() {
            let rows = missing.iter().map(|tag_id| post_tag::ActiveModel {
                post_id: Set(id),
                tag_id: Set(*tag_id),
            });
            PostTagEntity::insert_many(rows)
                .exec_without_returning(&txn)
                .await
                .map_err(map_step_err)?;
        }
        if !removed.is_empty() {
            PostTagEntity::delete_many()
                .filter(post_tag::Column::PostId.eq(id))
                .filter(post_tag::Column::TagId.is_in(removed))
                .exec(&txn)
                .await
                .map_err(map_step_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;

        let mut updated: Post = current.into();
        updated.title = title;
        updated.body = body;
        updated.updated_at = now;
        Ok(updated)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn view(&self, id: Uuid) -> Result<Post, RepoError> {
        let current = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        // Read-then-write: concurrent viewers may lose an increment, which
        // is an accepted approximation. The counter never decreases.
        let views = current.views + 1;
        PostEntity::update_many()
            .col_expr(post::Column::Views, Expr::value(views))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut viewed: Post = current.into();
        viewed.views = views;
        Ok(viewed)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        // Dependency order: associations and attached content before the row
        // they reference. The schema restricts, it does not cascade.
        PostTagEntity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_step_err)?;
        CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_step_err)?;
        AttachmentEntity::delete_many()
            .filter(attachment::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_step_err)?;
        PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_step_err)?;

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id = %id, "Deleted post and dependents");
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Post>, RepoError> {
        self.page_of(PostEntity::find(), page).await
    }

    async fn search(&self, query: &str, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let pattern = format!("%{}%", query.to_lowercase());
        let matches = Condition::any()
            .add(
                Expr::expr(Func::lower(Expr::col((post::Entity, post::Column::Title))))
                    .like(&pattern),
            )
            .add(
                Expr::expr(Func::lower(Expr::col((post::Entity, post::Column::Body))))
                    .like(&pattern),
            );

        self.page_of(PostEntity::find().filter(matches), page).await
    }

    async fn list_by_tag(&self, tag_id: Uuid, page: PageRequest) -> Result<Page<Post>, RepoError> {
        let query = PostEntity::find()
            .inner_join(post_tag::Entity)
            .filter(post_tag::Column::TagId.eq(tag_id));

        self.page_of(query, page).await
    }

    async fn tags_of(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let tag_ids: Vec<Uuid> = PostTagEntity::find()
            .filter(post_tag::Column::PostId.eq(post_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|row| row.tag_id)
            .collect();

        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let tags = TagEntity::find()
            .filter(tag::Column::Id.is_in(tag_ids))
            .order_by_asc(tag::Column::Title)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(tags.into_iter().map(Into::into).collect())
    }
}
