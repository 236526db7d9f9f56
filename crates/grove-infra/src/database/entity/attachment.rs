//! File attachment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    pub filename: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for grove_core::domain::FileAttachment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            filename: model.filename,
            created_at: model.created_at.into(),
        }
    }
}

impl From<grove_core::domain::FileAttachment> for ActiveModel {
    fn from(attachment: grove_core::domain::FileAttachment) -> Self {
        Self {
            id: Set(attachment.id),
            post_id: Set(attachment.post_id),
            filename: Set(attachment.filename),
            created_at: Set(attachment.created_at.into()),
        }
    }
}
