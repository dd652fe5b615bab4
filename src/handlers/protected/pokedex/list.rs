// handlers/protected/pokedex/list.rs - GET /pokedex

use axum::{
    extract::{Extension, State},
    response::Json,
};

use crate::auth::Actor;
use crate::error::ApiError;
use crate::state::AppState;

use super::PokedexList;

/// Every pokedex the actor owns. Always 200, with an empty list when there are none.
pub async fn pokedex_list(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<PokedexList>, ApiError> {
    let pokedexes = state.store.find_by_owner(actor.id).await?;
    tracing::debug!("Listed {} pokedexes for {}", pokedexes.len(), actor.id);
    Ok(Json(PokedexList { pokedexes }))
}
