//! Why a cocktail payload or path parameter was refused

use std::fmt;

use super::Glass;

/// Rejected cocktail input. Every variant becomes a 400.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Cocktail or ingredient name is blank after trimming
    BlankName { what: &'static str },

    /// Name longer than the column allows
    NameTooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// Glass spelling outside `Glass::ALL`
    UnknownGlass { value: String },

    /// Ingredient amount below zero, NaN or infinite
    BadAmount { amount: f64 },

    /// Ingredient line at `index` in the request was refused
    Ingredient {
        index: usize,
        source: Box<ValidationError>,
    },

    /// Cocktail at `index` in a batch was refused
    Cocktail {
        index: usize,
        source: Box<ValidationError>,
    },

    /// POST with an empty array
    EmptyBatch,

    /// PATCH set a column that cannot be NULL to null
    NotNullable { field: &'static str },

    /// PATCH body named no fields
    NothingToUpdate,

    /// Path id is not a positive integer
    BadId { raw: String },

    /// Path segment did not percent-decode to UTF-8
    UndecodablePath { param: &'static str },
}

impl ValidationError {
    pub(crate) fn ingredient(index: usize, source: Self) -> Self {
        Self::Ingredient {
            index,
            source: Box::new(source),
        }
    }

    pub(crate) fn cocktail(index: usize, source: Self) -> Self {
        Self::Cocktail {
            index,
            source: Box::new(source),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName { what } => write!(f, "{} cannot be blank", what),
            Self::NameTooLong { what, len, max } => {
                write!(f, "{} is {} characters long, at most {} allowed", what, len, max)
            }
            Self::UnknownGlass { value } => {
                let known: Vec<&str> = Glass::ALL.iter().map(Glass::as_str).collect();
                write!(f, "unknown glass '{}', expected one of: {}", value, known.join(", "))
            }
            Self::BadAmount { amount } => {
                write!(f, "amount {} is not a non-negative number", amount)
            }
            Self::Ingredient { index, source } => write!(f, "ingredients[{}]: {}", index, source),
            Self::Cocktail { index, source } => write!(f, "cocktails[{}]: {}", index, source),
            Self::EmptyBatch => write!(f, "at least one cocktail is required"),
            Self::NotNullable { field } => write!(f, "cocktail {} cannot be set to null", field),
            Self::NothingToUpdate => write!(f, "request contains no fields to update"),
            Self::BadId { raw } => write!(f, "cocktail id '{}' is not a positive integer", raw),
            Self::UndecodablePath { param } => {
                write!(f, "{} in the path is not valid percent-encoded UTF-8", param)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
