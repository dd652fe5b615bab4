// Request preconditions shared by every single-record route.
// Order matters: require_found first, so ownership is never checked against a missing record.

use uuid::Uuid;

use crate::auth::Actor;
use crate::database::models::Pokedex;
use crate::error::ApiError;

/// A record with exactly one owning actor
pub trait Owned {
    fn owner(&self) -> Uuid;
}

impl Owned for Pokedex {
    fn owner(&self) -> Uuid {
        self.owner
    }
}

/// Turn an absent lookup result into `NotFound`
pub fn require_found<T>(record: Option<T>, what: &str) -> Result<T, ApiError> {
    record.ok_or_else(|| ApiError::not_found(format!("{} not found", what)))
}

/// Fail with `Forbidden` unless `actor` owns `record`. Exact id equality, no roles.
pub fn require_ownership<R: Owned>(actor: &Actor, record: &R) -> Result<(), ApiError> {
    if record.owner() == actor.id {
        Ok(())
    } else {
        Err(ApiError::forbidden("You do not own this resource"))
    }
}
