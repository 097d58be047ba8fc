use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use blog_core::domain::{ListMetadata, Record};
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Entities stored as soft-deletable documents.
pub trait SoftDeleteEntity: EntityTrait {
    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;
}

/// Translation of a store-agnostic record filter into a SQL condition.
pub trait IntoCondition {
    fn into_condition(self) -> Condition;
}

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

pub(crate) fn map_db_error(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl<E, T, F> BaseRepository<T, F> for PostgresBaseRepository<E>
where
    E: SoftDeleteEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    T: Record + From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
    F: IntoCondition + Send + 'static,
{
    async fn create(&self, entity: T) -> Result<(), RepoError> {
        let active_model: E::ActiveModel = entity.into();
        E::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }

    async fn list(
        &self,
        filter: F,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<T>, ListMetadata), RepoError> {
        let condition = filter.into_condition();

        // Negative skips nothing; non-positive limit takes everything.
        let skip = u64::try_from(offset).ok();
        let take = u64::try_from(limit).ok().filter(|l| *l > 0);

        let models = E::find()
            .filter(condition.clone())
            .order_by_asc(E::created_at_column())
            .offset(skip)
            .limit(take)
            .all(&self.db)
            .await
            .map_err(map_db_error)?;

        let total = E::find()
            .filter(condition)
            .count(&self.db)
            .await
            .map_err(map_db_error)?;

        Ok((
            models.into_iter().map(Into::into).collect(),
            ListMetadata {
                total,
                offset,
                limit,
            },
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<T, RepoError> {
        E::find()
            .filter(E::id_column().eq(id))
            .one(&self.db)
            .await
            .map_err(map_db_error)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn replace(&self, entity: T) -> Result<(), RepoError> {
        let id = entity.id();
        let active_model: E::ActiveModel = entity.into();

        let result = E::update_many()
            .set(active_model)
            .filter(E::id_column().eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected == 0 {
            tracing::debug!(id = %id, "Replace matched no rows");
        }
        Ok(())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<(), RepoError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = E::update_many()
            .col_expr(E::deleted_at_column(), Expr::value(now))
            .filter(E::id_column().eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected == 0 {
            tracing::debug!(id = %id, "Soft delete matched no rows");
        }
        Ok(())
    }
}
