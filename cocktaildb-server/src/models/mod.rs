//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod cocktail;
pub mod glass;
pub mod name;
pub mod validation;

pub use cocktail::{
    CocktailChanges, CocktailPatch, CocktailRequest, IngredientRequest, NewCocktail,
    NewIngredient,
};
pub use glass::Glass;
pub use name::{title_case, CocktailName, IngredientName};
pub use validation::ValidationError;
