// handlers/protected/pokedex/show.rs - GET /pokedex/:id

use axum::{
    extract::{Extension, Path, State},
    response::Json,
};

use crate::auth::Actor;
use crate::error::ApiError;
use crate::state::AppState;

use super::{fetch_owned, PokedexEnvelope};

pub async fn pokedex_show(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<String>,
) -> Result<Json<PokedexEnvelope>, ApiError> {
    let pokedex = fetch_owned(state.store.as_ref(), &actor, &id).await?;
    Ok(Json(PokedexEnvelope { pokedex }))
}
