pub mod auth;
pub mod json;

pub use auth::{extract_bearer_token, require_token};
pub use json::AppJson;
