//! pokedex 固有のドメイン型（型と不変条件）

pub mod catalog;
pub mod command;

pub use catalog::{CatalogQuery, Page};
pub use command::{FetchOverrides, OutputFormat, PokedexCommand};
