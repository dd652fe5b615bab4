use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::models::{NewPokedex, Pokedex, PokedexChanges};
use crate::database::store::{PokedexStore, StoreError};

const COLUMNS: &str = "id, title, pokemon, owner, created_at, updated_at";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pokedexes (
    id          UUID PRIMARY KEY,
    title       TEXT NOT NULL CHECK (title <> ''),
    pokemon     INTEGER[] NOT NULL,
    owner       UUID NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)"#;

const CREATE_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS pokedexes_owner_idx ON pokedexes (owner, created_at)";

/// PostgreSQL-backed store
pub struct PgPokedexStore {
    pool: PgPool,
}

impl PgPokedexStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool ({} max connections)", config.max_connections);
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent DDL, run once at startup
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        // One statement per query; prepared statements reject batches
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_OWNER_INDEX).execute(&self.pool).await?;
        info!("Ensured table 'pokedexes'");
        Ok(())
    }
}

#[async_trait]
impl PokedexStore for PgPokedexStore {
    async fn create(&self, new: NewPokedex) -> Result<Pokedex, StoreError> {
        let sql = format!(
            "INSERT INTO pokedexes (id, title, pokemon, owner) VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        );
        let record = sqlx::query_as::<_, Pokedex>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.title)
            .bind(&new.pokemon)
            .bind(new.owner)
            .fetch_one(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_by_owner(&self, owner: Uuid) -> Result<Vec<Pokedex>, StoreError> {
        let sql = format!(
            "SELECT {} FROM pokedexes WHERE owner = $1 ORDER BY created_at, id",
            COLUMNS
        );
        let records = sqlx::query_as::<_, Pokedex>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pokedex>, StoreError> {
        let sql = format!("SELECT {} FROM pokedexes WHERE id = $1", COLUMNS);
        let record = sqlx::query_as::<_, Pokedex>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn update(&self, id: Uuid, changes: PokedexChanges) -> Result<Option<Pokedex>, StoreError> {
        let sql = format!(
            "UPDATE pokedexes \
             SET title = COALESCE($2, title), pokemon = COALESCE($3, pokemon), updated_at = now() \
             WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        let record = sqlx::query_as::<_, Pokedex>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.pokemon)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM pokedexes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
