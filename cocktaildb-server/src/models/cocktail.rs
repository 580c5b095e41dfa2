//! Cocktail request payloads and their validated forms
//!
//! Handlers deserialize into the `*Request` / `CocktailPatch` types and
//! call `validate()` before anything reaches the database.

use serde::{Deserialize, Deserializer};

use super::{CocktailName, Glass, IngredientName, ValidationError};

/// Body of POST (as array elements) and PUT requests
#[derive(Debug, Clone, Deserialize)]
pub struct CocktailRequest {
    pub name: String,
    pub glass: Glass,
    pub garnish: Option<String>,
    pub preparation: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientRequest>>,
}

/// One ingredient line of a cocktail request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientRequest {
    pub ingredient: Option<String>,
    pub label: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub special: Option<String>,
}

/// Validated cocktail ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewCocktail {
    pub name: CocktailName,
    pub glass: Glass,
    pub garnish: Option<String>,
    pub preparation: Option<String>,
    pub ingredients: Vec<NewIngredient>,
}

/// Validated ingredient ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewIngredient {
    pub ingredient: Option<IngredientName>,
    pub label: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub special: Option<String>,
}

impl CocktailRequest {
    pub fn validate(self) -> Result<NewCocktail, ValidationError> {
        Ok(NewCocktail {
            name: CocktailName::new(&self.name)?,
            glass: self.glass,
            garnish: self.garnish,
            preparation: self.preparation,
            ingredients: validate_ingredients(self.ingredients.unwrap_or_default())?,
        })
    }
}

impl IngredientRequest {
    pub fn validate(self) -> Result<NewIngredient, ValidationError> {
        if let Some(amount) = self.amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(ValidationError::BadAmount { amount });
            }
        }

        Ok(NewIngredient {
            ingredient: self
                .ingredient
                .as_deref()
                .map(IngredientName::new)
                .transpose()?,
            label: self.label,
            amount: self.amount,
            unit: self.unit,
            special: self.special,
        })
    }
}

fn validate_ingredients(
    items: Vec<IngredientRequest>,
) -> Result<Vec<NewIngredient>, ValidationError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            item.validate()
                .map_err(|e| ValidationError::ingredient(index, e))
        })
        .collect()
}

/// Body of PATCH requests.
///
/// The outer `Option` is "was the key present", the inner one is the JSON
/// value, so `{"garnish": null}` clears the garnish while `{}` leaves it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CocktailPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub glass: Option<Option<Glass>>,
    #[serde(default, deserialize_with = "present")]
    pub garnish: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub preparation: Option<Option<String>>,
    #[serde(default)]
    pub ingredients: Option<Vec<IngredientRequest>>,
}

fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CocktailChanges {
    pub name: Option<CocktailName>,
    pub glass: Option<Glass>,
    pub garnish: Option<Option<String>>,
    pub preparation: Option<Option<String>>,
    pub ingredients: Option<Vec<NewIngredient>>,
}

impl CocktailPatch {
    pub fn validate(self) -> Result<CocktailChanges, ValidationError> {
        let name = match self.name {
            Some(Some(name)) => Some(CocktailName::new(&name)?),
            Some(None) => return Err(ValidationError::NotNullable { field: "name" }),
            None => None,
        };
        let glass = match self.glass {
            Some(Some(glass)) => Some(glass),
            Some(None) => return Err(ValidationError::NotNullable { field: "glass" }),
            None => None,
        };
        let ingredients = self.ingredients.map(validate_ingredients).transpose()?;

        let changes = CocktailChanges {
            name,
            glass,
            garnish: self.garnish,
            preparation: self.preparation,
            ingredients,
        };

        if changes.updated_fields().is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(changes)
    }
}

impl CocktailChanges {
    /// Names of the fields this update touches, in column order.
    pub fn updated_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.glass.is_some() {
            fields.push("glass");
        }
        if self.garnish.is_some() {
            fields.push("garnish");
        }
        if self.preparation.is_some() {
            fields.push("preparation");
        }
        if self.ingredients.is_some() {
            fields.push("ingredients");
        }
        fields
    }

    /// Whether any column of the `cocktails` row changes.
    pub fn touches_row(&self) -> bool {
        self.name.is_some()
            || self.glass.is_some()
            || self.garnish.is_some()
            || self.preparation.is_some()
    }
}
