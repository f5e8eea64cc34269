use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::{Query, QueryAs},
    FromRow, PgPool, Postgres,
};
use tracing::debug;

use super::{
    entity::{Entity, ParamValue},
    repository::{RepoResult, Repository},
    sql,
};

/// Postgres-backed [`Repository`] for any mapped entity.
pub struct PgRepository<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn bind_row<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<ParamValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            ParamValue::Text(v) => query.bind(v),
            ParamValue::Int(v) => query.bind(v),
            ParamValue::Float(v) => query.bind(v),
            ParamValue::Date(v) => query.bind(v),
        };
    }
    query
}

fn bind_exec<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    values: Vec<ParamValue>,
) -> Query<'q, Postgres, PgArguments> {
    for value in values {
        query = match value {
            ParamValue::Text(v) => query.bind(v),
            ParamValue::Int(v) => query.bind(v),
            ParamValue::Float(v) => query.bind(v),
            ParamValue::Date(v) => query.bind(v),
        };
    }
    query
}

#[async_trait]
impl<T> Repository<T> for PgRepository<T>
where
    T: Entity + for<'r> FromRow<'r, PgRow>,
{
    async fn add(&self, entity: T) -> RepoResult<T> {
        let stmt = sql::insert::<T>();
        let created = bind_row(sqlx::query_as::<_, T>(&stmt), entity.values())
            .fetch_one(&self.pool)
            .await?;
        debug!(table = T::TABLE, id = created.id(), "row inserted");
        Ok(created)
    }

    async fn get_all(&self) -> RepoResult<Vec<T>> {
        let stmt = sql::select_all::<T>();
        let rows = sqlx::query_as::<_, T>(&stmt).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> RepoResult<Option<T>> {
        let stmt = sql::select_by_id::<T>();
        let row = sqlx::query_as::<_, T>(&stmt)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, entity: &T) -> RepoResult<bool> {
        let stmt = sql::update_by_id::<T>();
        let mut values = entity.values();
        values.push(ParamValue::Int(entity.id()));
        let done = bind_exec(sqlx::query(&stmt), values)
            .execute(&self.pool)
            .await?;
        debug!(table = T::TABLE, id = entity.id(), rows = done.rows_affected(), "row updated");
        Ok(done.rows_affected() > 0)
    }

    async fn delete(&self, entity: &T) -> RepoResult<bool> {
        let stmt = sql::delete_by_id::<T>();
        let done = sqlx::query(&stmt)
            .bind(entity.id())
            .execute(&self.pool)
            .await?;
        debug!(table = T::TABLE, id = entity.id(), rows = done.rows_affected(), "row deleted");
        Ok(done.rows_affected() > 0)
    }
}
