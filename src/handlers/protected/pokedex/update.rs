// handlers/protected/pokedex/update.rs - PATCH /pokedex/:id

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
};

use crate::auth::Actor;
use crate::database::models::PokedexChanges;
use crate::error::ApiError;
use crate::guards::require_found;
use crate::middleware::AppJson;
use crate::state::AppState;

use super::{fetch_owned, PokedexBody};

/// Field-level merge. `owner` and empty-string fields are dropped before anything is written.
///
/// The body is extracted as a `Result` so that an unreadable body is only reported after
/// the record is known to exist and belong to the actor.
pub async fn pokedex_update(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
    body: Result<AppJson<PokedexBody>, ApiError>,
) -> Result<StatusCode, ApiError> {
    let record = fetch_owned(state.store.as_ref(), &actor, &id).await?;

    let AppJson(body) = body?;
    let fields = body.into_fields()?;
    let changes = PokedexChanges::from_payload(&fields)?;
    if changes.is_empty() {
        return Ok(StatusCode::NO_CONTENT);
    }

    // Deleted between fetch and write
    let updated = state.store.update(record.id, changes).await?;
    require_found(updated, "Pokedex")?;

    tracing::debug!("Updated pokedex {}", record.id);
    Ok(StatusCode::NO_CONTENT)
}
