pub mod pokedex;

pub use pokedex::{NewPokedex, Pokedex, PokedexChanges, ValidationError};
