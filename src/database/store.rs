use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{NewPokedex, Pokedex, PokedexChanges};

/// Errors from a record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Single-record persistence for pokedexes.
///
/// Each call is atomic on its own; nothing here composes calls into a transaction, so two
/// concurrent updates of one record are last-write-wins.
#[async_trait]
pub trait PokedexStore: Send + Sync {
    /// Persist a new record. The store assigns `id` and both timestamps.
    async fn create(&self, new: NewPokedex) -> Result<Pokedex, StoreError>;

    /// Every record owned by `owner`, oldest first
    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Pokedex>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pokedex>, StoreError>;

    /// Merge `changes` into the stored record and bump `updated_at`.
    /// Returns `None` if the record no longer exists.
    async fn update(&self, id: Uuid, changes: PokedexChanges) -> Result<Option<Pokedex>, StoreError>;

    /// Returns whether a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
