//! PostgreSQL user repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use grove_core::domain::User;
use grove_core::error::RepoError;
use grove_core::page::{Page, PageRequest};
use grove_core::ports::UserRepository;

use super::entity::attachment::{self, Entity as AttachmentEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::{map_db_err, map_step_err};

pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

/// Mask an email for logging to avoid PII in logs.
///
/// Counts characters, not bytes; the local part may start with a
/// multi-byte character.
fn mask_email(email: &str) -> String {
    let Some(at_pos) = email.find('@') else {
        return "***".to_string();
    };

    let local = &email[..at_pos];
    match local.chars().next() {
        Some(first) if local.chars().count() > 1 => {
            format!("{first}***{}", &email[at_pos..])
        }
        _ => format!("***{}", &email[at_pos..]),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: User) -> Result<User, RepoError> {
        let model: user::ActiveModel = new_user.clone().into();
        UserEntity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(username = %new_user.username, "Created user");
        Ok(new_user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn update_bio(&self, id: Uuid, bio: String) -> Result<User, RepoError> {
        let current = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let now = Utc::now();
        UserEntity::update_many()
            .col_expr(user::Column::Bio, Expr::value(bio.clone()))
            .col_expr(
                user::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(now)),
            )
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut updated: User = current.into();
        updated.bio = bio;
        updated.updated_at = now;
        Ok(updated)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RepoError> {
        let paginator = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(&self.db, page.per_page);

        let total = paginator.num_items().await.map_err(map_db_err)?;
        let items = paginator.fetch_page(page.page).await.map_err(map_db_err)?;

        Ok(Page::new(items.into_iter().map(Into::into).collect(), total))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        UserEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let post_ids: Vec<Uuid> = PostEntity::find()
            .filter(post::Column::AuthorId.eq(id))
            .all(&txn)
            .await
            .map_err(map_step_err)?
            .into_iter()
            .map(|p| p.id)
            .collect();

        // Dependents of the user's posts go first, then the posts, then the
        // user's own comments elsewhere, then the account itself.
        if !post_ids.is_empty() {
            PostTagEntity::delete_many()
                .filter(post_tag::Column::PostId.is_in(post_ids.clone()))
                .exec(&txn)
                .await
                .map_err(map_step_err)?;
            CommentEntity::delete_many()
                .filter(comment::Column::PostId.is_in(post_ids.clone()))
                .exec(&txn)
                .await
                .map_err(map_step_err)?;
            AttachmentEntity::delete_many()
                .filter(attachment::Column::PostId.is_in(post_ids.clone()))
                .exec(&txn)
                .await
                .map_err(map_step_err)?;
        }

        CommentEntity::delete_many()
            .filter(comment::Column::AuthorId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_step_err)?;

        if !post_ids.is_empty() {
            PostEntity::delete_many()
                .filter(post::Column::Id.is_in(post_ids))
                .exec(&txn)
                .await
                .map_err(map_step_err)?;
        }

        UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_step_err)?;

        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(user_id = %id, "Deleted user and owned content");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn email_masking_keeps_domain_only() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@b.io"), "***@b.io");
        assert_eq!(mask_email("not-a-mail"), "***");
    }

    #[test]
    fn email_masking_handles_multibyte_local_parts() {
        assert_eq!(mask_email("über@example.com"), "ü***@example.com");
        assert_eq!(mask_email("ü@b.io"), "***@b.io");
        assert_eq!(mask_email("日本語@example.jp"), "日***@example.jp");
    }
}
