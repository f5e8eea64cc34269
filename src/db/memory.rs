use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{
    entity::Entity,
    repository::{RepoError, RepoResult, Repository, UserRepository},
};
use crate::{
    consumption::repo_types::ConsumptionRecord, tips::repo_types::SavingsTip,
    users::repo_types::User,
};

pub struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

#[derive(Default)]
pub struct Tables {
    users: Table<User>,
    consumption: Table<ConsumptionRecord>,
    tips: Table<SavingsTip>,
}

/// Process-local store applying the same rules as the relational schema:
/// unique user email, consumption rows must reference an existing user,
/// and deleting a user removes its consumption rows.
#[derive(Default)]
pub struct MemoryDb {
    tables: RwLock<Tables>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Entities the in-memory store knows how to hold.
pub trait MemoryEntity: Entity {
    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    fn check(&self, _tables: &Tables) -> RepoResult<()> {
        Ok(())
    }

    fn cascade(_id: i32, _tables: &mut Tables) {}

    /// Copy kept in the table; relationship collections are not stored.
    fn stored(&self) -> Self {
        self.clone()
    }
}

impl MemoryEntity for User {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.users
    }
    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.users
    }

    fn check(&self, tables: &Tables) -> RepoResult<()> {
        let taken = tables
            .users
            .rows
            .values()
            .any(|u| u.id != self.id && u.email == self.email);
        if taken {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint \"IX_Usuario_Email\" ({})",
                self.email
            )));
        }
        Ok(())
    }

    fn cascade(id: i32, tables: &mut Tables) {
        tables.consumption.rows.retain(|_, c| c.user_id != id);
    }

    fn stored(&self) -> Self {
        Self {
            consumption_records: Vec::new(),
            ..self.clone()
        }
    }
}

impl MemoryEntity for ConsumptionRecord {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.consumption
    }
    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.consumption
    }

    fn check(&self, tables: &Tables) -> RepoResult<()> {
        if !tables.users.rows.contains_key(&self.user_id) {
            return Err(RepoError::Constraint(format!(
                "insert or update violates foreign key constraint \
                 \"FK_ConsumoEnergetico_Usuario_UsuarioId\" (UsuarioId={})",
                self.user_id
            )));
        }
        Ok(())
    }
}

impl MemoryEntity for SavingsTip {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.tips
    }
    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.tips
    }
}

#[async_trait]
impl<T: MemoryEntity> Repository<T> for MemoryDb {
    async fn add(&self, mut entity: T) -> RepoResult<T> {
        let mut tables = self.tables.write().await;
        entity.check(&tables)?;
        let table = T::table_mut(&mut tables);
        let id = table.next_id;
        table.next_id += 1;
        entity.set_id(id);
        table.rows.insert(id, entity.stored());
        debug!(table = T::TABLE, id, "row inserted");
        Ok(entity)
    }

    async fn get_all(&self) -> RepoResult<Vec<T>> {
        let tables = self.tables.read().await;
        Ok(T::table(&tables).rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> RepoResult<Option<T>> {
        let tables = self.tables.read().await;
        Ok(T::table(&tables).rows.get(&id).cloned())
    }

    async fn update(&self, entity: &T) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if !T::table(&tables).rows.contains_key(&entity.id()) {
            return Ok(false);
        }
        entity.check(&tables)?;
        T::table_mut(&mut tables)
            .rows
            .insert(entity.id(), entity.stored());
        debug!(table = T::TABLE, id = entity.id(), "row updated");
        Ok(true)
    }

    async fn delete(&self, entity: &T) -> RepoResult<bool> {
        let mut tables = self.tables.write().await;
        if T::table_mut(&mut tables).rows.remove(&entity.id()).is_none() {
            return Ok(false);
        }
        T::cascade(entity.id(), &mut tables);
        debug!(table = T::TABLE, id = entity.id(), "row deleted");
        Ok(true)
    }
}

fn with_consumption(user: &User, tables: &Tables) -> User {
    User {
        consumption_records: tables
            .consumption
            .rows
            .values()
            .filter(|c| c.user_id == user.id)
            .cloned()
            .collect(),
        ..user.clone()
    }
}

#[async_trait]
impl UserRepository for MemoryDb {
    async fn get_all_with_consumption(&self) -> RepoResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .rows
            .values()
            .map(|u| with_consumption(u, &tables))
            .collect())
    }

    async fn get_by_id_with_consumption(&self, id: i32) -> RepoResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .rows
            .get(&id)
            .map(|u| with_consumption(u, &tables)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::new("UID1".into(), "Test User".into(), email.into())
    }

    #[tokio::test]
    async fn add_assigns_sequential_ids() {
        let db = MemoryDb::new();
        let a = db.add(user("a@example.com")).await.unwrap();
        let b = db.add(user("b@example.com")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let tip = db
            .add(SavingsTip::new("Luz".into(), "Apague a luz".into()))
            .await
            .unwrap();
        assert_eq!(tip.id, 1);

        let found: Option<User> = db.get_by_id(a.id).await.unwrap();
        assert_eq!(found, Some(a));
    }

    #[tokio::test]
    async fn missing_rows_are_absent_not_errors() {
        let db = MemoryDb::new();
        let found: Option<SavingsTip> = db.get_by_id(42).await.unwrap();
        assert!(found.is_none());

        let mut ghost = SavingsTip::new("x".into(), "y".into());
        ghost.id = 42;
        assert!(!db.update(&ghost).await.unwrap());
        assert!(!db.delete(&ghost).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let db = MemoryDb::new();
        db.add(user("test@example.com")).await.unwrap();
        let err = db.add(user("test@example.com")).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));

        let users: Vec<User> = db.get_all().await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn update_keeps_own_email_but_not_anothers() {
        let db = MemoryDb::new();
        let mut a = db.add(user("a@example.com")).await.unwrap();
        db.add(user("b@example.com")).await.unwrap();

        a.name = "Renamed".into();
        assert!(db.update(&a).await.unwrap());

        a.email = "b@example.com".into();
        assert!(matches!(db.update(&a).await, Err(RepoError::Constraint(_))));

        let stored: Option<User> = db.get_by_id(a.id).await.unwrap();
        let stored = stored.unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.email, "a@example.com");
    }

    #[tokio::test]
    async fn consumption_requires_existing_user() {
        let db = MemoryDb::new();
        let err = db
            .add(ConsumptionRecord::new("Janeiro".into(), 2024, 150.5, 7))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_consumption() {
        let db = MemoryDb::new();
        let owner = db.add(user("owner@example.com")).await.unwrap();
        let other = db.add(user("other@example.com")).await.unwrap();
        for month in ["Janeiro", "Fevereiro", "Março"] {
            db.add(ConsumptionRecord::new(month.into(), 2024, 100.0, owner.id))
                .await
                .unwrap();
        }
        db.add(ConsumptionRecord::new("Janeiro".into(), 2024, 80.0, other.id))
            .await
            .unwrap();

        assert!(db.delete(&owner).await.unwrap());

        let left: Vec<ConsumptionRecord> = db.get_all().await.unwrap();
        assert_eq!(left.len(), 1);
        assert!(left.iter().all(|c| c.user_id == other.id));
    }

    #[tokio::test]
    async fn eager_loading_attaches_only_owned_records() {
        let db = MemoryDb::new();
        let a = db.add(user("a@example.com")).await.unwrap();
        let b = db.add(user("b@example.com")).await.unwrap();
        db.add(ConsumptionRecord::new("Janeiro".into(), 2024, 150.5, a.id))
            .await
            .unwrap();

        let loaded = db.get_by_id_with_consumption(a.id).await.unwrap().unwrap();
        assert_eq!(loaded.consumption_records.len(), 1);
        assert_eq!(loaded.consumption_records[0].consumption_kwh, 150.5);

        let plain: Option<User> = db.get_by_id(a.id).await.unwrap();
        assert!(plain.unwrap().consumption_records.is_empty());

        let all = db.get_all_with_consumption().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().find(|u| u.id == b.id).unwrap().consumption_records.is_empty());
    }
}
