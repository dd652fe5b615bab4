// Runs against a live PostgreSQL when DATABASE_URL is set; skipped otherwise.

use anyhow::Result;
use pokedex_api::config::{DatabaseConfig, StoreBackend};
use pokedex_api::database::models::{NewPokedex, PokedexChanges};
use pokedex_api::database::{PgPokedexStore, PokedexStore};
use uuid::Uuid;

async fn connect() -> Result<Option<PgPokedexStore>> {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping PostgreSQL store test");
        return Ok(None);
    };

    let config = DatabaseConfig {
        backend: StoreBackend::Postgres,
        url: Some(url),
        max_connections: 2,
        connection_timeout: 10,
    };
    let store = PgPokedexStore::connect(&config).await?;
    store.ensure_schema().await?;
    Ok(Some(store))
}

fn new_pokedex(title: &str, pokemon: Vec<i32>, owner: Uuid) -> NewPokedex {
    NewPokedex {
        title: title.to_string(),
        pokemon,
        owner,
    }
}

#[tokio::test]
async fn postgres_store_crud() -> Result<()> {
    let Some(store) = connect().await? else {
        return Ok(());
    };
    let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

    // Create assigns id and timestamps
    let kanto = store.create(new_pokedex("Kanto", vec![1, 4, 7], alice)).await?;
    assert_eq!(kanto.owner, alice);
    assert_eq!(kanto.pokemon, vec![1, 4, 7]);
    assert_eq!(kanto.created_at, kanto.updated_at);

    let empty = store.create(new_pokedex("Empty", vec![], alice)).await?;
    assert!(empty.pokemon.is_empty());
    store.create(new_pokedex("Galar", vec![810], bob)).await?;

    // Owner filter happens in the query, oldest first
    let mine = store.find_by_owner(alice).await?;
    assert_eq!(mine.iter().map(|r| r.id).collect::<Vec<_>>(), vec![kanto.id, empty.id]);

    // Partial update keeps the untouched column and bumps updated_at
    let changes = PokedexChanges {
        title: None,
        pokemon: Some(vec![1, 4, 7, 25]),
    };
    let updated = store.update(kanto.id, changes).await?.expect("record exists");
    assert_eq!(updated.title, "Kanto");
    assert_eq!(updated.pokemon, vec![1, 4, 7, 25]);
    assert_eq!(updated.owner, alice);
    assert!(updated.updated_at >= kanto.updated_at);

    let renamed = PokedexChanges {
        title: Some("Kanto Classic".to_string()),
        pokemon: None,
    };
    let updated = store.update(kanto.id, renamed).await?.expect("record exists");
    assert_eq!(updated.title, "Kanto Classic");
    assert_eq!(updated.pokemon, vec![1, 4, 7, 25]);

    let fetched = store.find_by_id(kanto.id).await?.expect("record exists");
    assert_eq!(fetched, updated);

    // Delete is final; deleting again or updating a missing row reports absence
    assert!(store.delete(kanto.id).await?);
    assert!(!store.delete(kanto.id).await?);
    assert!(store.find_by_id(kanto.id).await?.is_none());
    assert!(store.update(kanto.id, PokedexChanges::default()).await?.is_none());

    for owner in [alice, bob] {
        for record in store.find_by_owner(owner).await? {
            store.delete(record.id).await?;
        }
    }
    Ok(())
}

#[tokio::test]
async fn postgres_store_health_and_missing_rows() -> Result<()> {
    let Some(store) = connect().await? else {
        return Ok(());
    };

    store.health_check().await?;
    assert!(store.find_by_id(Uuid::new_v4()).await?.is_none());
    assert!(store.find_by_owner(Uuid::new_v4()).await?.is_empty());
    assert!(!store.delete(Uuid::new_v4()).await?);
    Ok(())
}
