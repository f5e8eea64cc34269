pub mod entity;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod sql;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub use entity::{Entity, ParamValue};
pub use memory::MemoryDb;
pub use postgres::PgRepository;
pub use repository::{RepoError, RepoResult, Repository, UserRepository};

pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("run migrations")?;

    Ok(pool)
}
