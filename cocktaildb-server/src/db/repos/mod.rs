//! Repository implementations for database access
//!
//! - Reads fetch cocktails and ingredients in one LEFT JOIN
//! - Writes that touch both tables run in a transaction

pub mod cocktails;

pub use cocktails::{Cocktail, CocktailRepo, CocktailShort, DbError, Ingredient};
