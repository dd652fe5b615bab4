pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use memory::MemoryPokedexStore;
pub use postgres::PgPokedexStore;
pub use store::{PokedexStore, StoreError};
