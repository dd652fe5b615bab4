use std::sync::Arc;

use crate::auth::Authenticator;
use crate::database::PokedexStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PokedexStore>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(store: Arc<dyn PokedexStore>, authenticator: Arc<dyn Authenticator>) -> Self {
        Self { store, authenticator }
    }
}
