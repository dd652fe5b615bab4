// handlers/protected/pokedex/delete.rs - DELETE /pokedex/:id

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
};

use crate::auth::Actor;
use crate::error::ApiError;
use crate::state::AppState;

use super::fetch_owned;

/// Hard delete; there is no restore.
pub async fn pokedex_delete(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let record = fetch_owned(state.store.as_ref(), &actor, &id).await?;

    if !state.store.delete(record.id).await? {
        return Err(ApiError::not_found("Pokedex not found"));
    }

    tracing::debug!("Deleted pokedex {}", record.id);
    Ok(StatusCode::NO_CONTENT)
}
