// handlers/protected/pokedex/create.rs - POST /pokedex

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};

use crate::auth::Actor;
use crate::database::models::NewPokedex;
use crate::error::ApiError;
use crate::middleware::AppJson;
use crate::state::AppState;

use super::{PokedexBody, PokedexEnvelope};

/// Owner is always the actor; an `owner` in the body is ignored.
pub async fn pokedex_create(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    AppJson(body): AppJson<PokedexBody>,
) -> Result<(StatusCode, Json<PokedexEnvelope>), ApiError> {
    let fields = body.into_fields()?;
    let new = NewPokedex::from_payload(&fields, actor.id)?;

    let pokedex = state.store.create(new).await?;
    tracing::debug!("Created pokedex {} for {}", pokedex.id, actor.id);

    Ok((StatusCode::CREATED, Json(PokedexEnvelope { pokedex })))
}
