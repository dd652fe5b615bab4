// handlers/mod.rs - Handler tiers
//
// Public (no auth) and protected (bearer token resolved by middleware::require_token).

pub mod public;
pub mod protected;
