//! Account entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{Condition, Set};

use blog_core::domain::{Account, Role};
use blog_core::ports::AccountFilter;

use crate::database::postgres_base::{IntoCondition, SoftDeleteEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
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

impl IntoCondition for AccountFilter {
    fn into_condition(self) -> Condition {
        let mut condition = Condition::all();
        if !self.include_deleted {
            condition = condition.add(Column::DeletedAt.is_null());
        }
        condition
    }
}

/// Conversion from SeaORM Model to Domain Account.
impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password: model.password,
            role: Role::from(model.role.as_str()),
            created_at: model.created_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

/// Conversion from Domain Account to SeaORM ActiveModel.
impl From<Account> for ActiveModel {
    fn from(account: Account) -> Self {
        Self {
            id: Set(account.id),
            username: Set(account.username),
            password: Set(account.password),
            role: Set(account.role.as_str().to_string()),
            created_at: Set(account.created_at.into()),
            deleted_at: Set(account.deleted_at.map(Into::into)),
        }
    }
}
