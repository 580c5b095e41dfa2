//! Cocktail and ingredient names
//!
//! Names are stored title-cased so lookups are insensitive to how the
//! caller capitalised them.

use super::ValidationError;

/// Maximum length for cocktail and ingredient names
const MAX_NAME_LEN: usize = 128;

/// Title-case a string: the first letter of every alphabetic run is
/// upper-cased and the rest of the run lower-cased.
///
/// ```
/// use cocktaildb_server::models::title_case;
///
/// assert_eq!(title_case("old fashioned"), "Old Fashioned");
/// assert_eq!(title_case("DRY VERMOUTH"), "Dry Vermouth");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn normalize(what: &'static str, s: &str) -> Result<String, ValidationError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankName { what });
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            what,
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(title_case(trimmed))
}

/// Validated, title-cased cocktail name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CocktailName(String);

impl CocktailName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        normalize("cocktail name", s).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CocktailName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated, title-cased ingredient name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IngredientName(String);

impl IngredientName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        normalize("ingredient name", s).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for IngredientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
