// handlers/protected/pokedex/mod.rs - Owner-scoped pokedex CRUD
//
// Single-record routes run the same sequence:
// fetch by id -> require_found -> require_ownership -> store op -> response.
// Any failure is returned as ApiError and translated in one place.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::auth::Actor;
use crate::database::models::Pokedex;
use crate::database::PokedexStore;
use crate::error::ApiError;
use crate::guards::{require_found, require_ownership};

pub mod create;   // POST /pokedex
pub mod delete;   // DELETE /pokedex/:id
pub mod list;     // GET /pokedex
pub mod show;     // GET /pokedex/:id
pub mod update;   // PATCH /pokedex/:id

pub use create::pokedex_create;
pub use delete::pokedex_delete;
pub use list::pokedex_list;
pub use show::pokedex_show;
pub use update::pokedex_update;

/// `{"pokedex": {...}}` request body for create and update
#[derive(Debug, Deserialize)]
pub struct PokedexBody {
    pub pokedex: Option<Map<String, Value>>,
}

impl PokedexBody {
    pub fn into_fields(self) -> Result<Map<String, Value>, ApiError> {
        self.pokedex
            .ok_or_else(|| ApiError::invalid_field("pokedex", "is required"))
    }
}

#[derive(Debug, Serialize)]
pub struct PokedexEnvelope {
    pub pokedex: Pokedex,
}

#[derive(Debug, Serialize)]
pub struct PokedexList {
    pub pokedexes: Vec<Pokedex>,
}

/// Ids that are not UUIDs cannot name a stored record
pub(crate) fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// Fetch `id` and run both guards: NotFound before Forbidden
pub(crate) async fn fetch_owned(
    store: &dyn PokedexStore,
    actor: &Actor,
    id: &str,
) -> Result<Pokedex, ApiError> {
    let record = match parse_id(id) {
        Some(id) => store.find_by_id(id).await?,
        None => None,
    };
    let record = require_found(record, "Pokedex")?;

    if let Err(e) = require_ownership(actor, &record) {
        tracing::warn!("Actor {} denied access to pokedex {}", actor.id, record.id);
        return Err(e);
    }

    Ok(record)
}
