//! Post entity for SeaORM.
//!
//! The author snapshot is flattened into `author_id` / `author_username`.

use sea_orm::entity::prelude::*;
use sea_orm::{Condition, Set};

use blog_core::domain::{BasicUser, Post};
use blog_core::ports::PostFilter;

use crate::database::postgres_base::{IntoCondition, SoftDeleteEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AuthorId",
        to = "super::account::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDeleteEntity for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }
}

impl IntoCondition for PostFilter {
    fn into_condition(self) -> Condition {
        let mut condition = Condition::all();
        if !self.include_deleted {
            condition = condition.add(Column::DeletedAt.is_null());
        }
        if let Some(username) = self.author_username {
            condition = condition.add(Column::AuthorUsername.eq(username));
        }
        if let Some((from, until)) = self.created_within {
            condition = condition
                .add(Column::CreatedAt.gte(from))
                .add(Column::CreatedAt.lt(until));
        }
        condition
    }
}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author: BasicUser {
                id: model.author_id,
                username: model.author_username,
            },
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            author_id: Set(post.author.id),
            author_username: Set(post.author.username),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
            deleted_at: Set(post.deleted_at.map(Into::into)),
        }
    }
}
