use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{NewPokedex, Pokedex, PokedexChanges};
use crate::database::store::{PokedexStore, StoreError};

/// Process-local store for development and tests. Records live in insertion order.
#[derive(Default)]
pub struct MemoryPokedexStore {
    records: RwLock<Vec<Pokedex>>,
}

impl MemoryPokedexStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PokedexStore for MemoryPokedexStore {
    async fn create(&self, new: NewPokedex) -> Result<Pokedex, StoreError> {
        let now = Utc::now();
        let record = Pokedex {
            id: Uuid::new_v4(),
            title: new.title,
            pokemon: new.pokemon,
            owner: new.owner,
            created_at: now,
            updated_at: now,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Pokedex>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.owner == owner).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pokedex>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, id: Uuid, changes: PokedexChanges) -> Result<Option<Pokedex>, StoreError> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        changes.apply_to(record);
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kanto(owner: Uuid) -> NewPokedex {
        NewPokedex {
            title: "Kanto".into(),
            pokemon: vec![1, 4, 7],
            owner,
        }
    }

    #[tokio::test]
    async fn find_by_owner_returns_only_that_owners_records_in_order() {
        let store = MemoryPokedexStore::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let first = store.create(kanto(a)).await.unwrap();
        store.create(kanto(b)).await.unwrap();
        let second = store.create(kanto(a)).await.unwrap();

        let mine = store.find_by_owner(a).await.unwrap();
        assert_eq!(mine.iter().map(|r| r.id).collect::<Vec<_>>(), vec![first.id, second.id]);
        assert!(store.find_by_owner(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_and_keeps_owner() {
        let store = MemoryPokedexStore::new();
        let owner = Uuid::new_v4();
        let created = store.create(kanto(owner)).await.unwrap();

        let changes = PokedexChanges { title: None, pokemon: Some(vec![1, 4, 7, 25]) };
        let updated = store.update(created.id, changes).await.unwrap().unwrap();

        assert_eq!(updated.title, "Kanto");
        assert_eq!(updated.pokemon, vec![1, 4, 7, 25]);
        assert_eq!(updated.owner, owner);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_record() {
        let store = MemoryPokedexStore::new();
        let missing = Uuid::new_v4();
        assert!(store.update(missing, PokedexChanges::default()).await.unwrap().is_none());
        assert!(!store.delete(missing).await.unwrap());
    }

    #[tokio::test]
    async fn delete_is_final() {
        let store = MemoryPokedexStore::new();
        let created = store.create(kanto(Uuid::new_v4())).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
    }
}
