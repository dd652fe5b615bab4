use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;

/// A persisted pokedex. Serialized with the document-store field names clients already use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pokedex {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub pokemon: Vec<i32>,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for a new record; `owner` always comes from the actor, never the body
#[derive(Debug, Clone, PartialEq)]
pub struct NewPokedex {
    pub title: String,
    pub pokemon: Vec<i32>,
    pub owner: Uuid,
}

/// Field-level merge for an update. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PokedexChanges {
    pub title: Option<String>,
    pub pokemon: Option<Vec<i32>>,
}

/// Field name -> problem, collected before anything is persisted
#[derive(Debug, Default)]
pub struct ValidationError {
    pub field_errors: HashMap<String, String>,
}

impl ValidationError {
    fn add(&mut self, field: &str, detail: impl Into<String>) {
        self.field_errors.insert(field.to_string(), detail.into());
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationError> {
        if self.field_errors.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::unprocessable_entity("Pokedex validation failed", err.field_errors)
    }
}

// Keys the client may send but never controls
const SERVER_MANAGED: [&str; 5] = ["owner", "_id", "id", "createdAt", "updatedAt"];

impl NewPokedex {
    pub fn from_payload(payload: &Map<String, Value>, owner: Uuid) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        let title = match payload.get("title") {
            None => {
                errors.add("title", "is required");
                None
            }
            Some(v) => parse_title(v).map_err(|e| errors.add("title", e)).ok(),
        };

        let pokemon = match payload.get("pokemon") {
            None => {
                errors.add("pokemon", "is required");
                None
            }
            Some(v) => parse_pokemon(v).map_err(|e| errors.add("pokemon", e)).ok(),
        };

        errors.into_result(|| NewPokedex {
            title: title.unwrap_or_default(),
            pokemon: pokemon.unwrap_or_default(),
            owner,
        })
    }
}

impl PokedexChanges {
    /// Build a merge from an update body.
    ///
    /// Server-managed keys (including `owner`) are dropped, and so is any key whose value is
    /// the empty string: clients send `""` for "leave unchanged". That convention means a
    /// field can never be explicitly cleared through an update.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();
        let mut changes = PokedexChanges::default();

        for (key, value) in payload {
            if SERVER_MANAGED.contains(&key.as_str()) || is_blank(value) {
                continue;
            }
            match key.as_str() {
                "title" => match parse_title(value) {
                    Ok(title) => changes.title = Some(title),
                    Err(e) => errors.add("title", e),
                },
                "pokemon" => match parse_pokemon(value) {
                    Ok(pokemon) => changes.pokemon = Some(pokemon),
                    Err(e) => errors.add("pokemon", e),
                },
                _ => {}
            }
        }

        errors.into_result(|| changes)
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.pokemon.is_none()
    }

    pub fn apply_to(self, record: &mut Pokedex) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(pokemon) = self.pokemon {
            record.pokemon = pokemon;
        }
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}

fn parse_title(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err("is required".to_string()),
        Value::Null => Err("is required".to_string()),
        _ => Err("must be a string".to_string()),
    }
}

fn parse_pokemon(value: &Value) -> Result<Vec<i32>, String> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => return Err("is required".to_string()),
        _ => return Err("must be an array of integers".to_string()),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| format!("element {} is not a 32-bit integer", i))
        })
        .collect()
}
