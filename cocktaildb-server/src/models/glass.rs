//! Glassware a cocktail is served in

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Glass types, stored and serialized in kebab-case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Glass {
    OldFashioned,
    Martini,
    Collins,
    Highball,
    ChampagneFlute,
    Margarita,
    ChampagneTulip,
    Hurricane,
    Shot,
    HotDrink,
    WhiteWine,
}

impl Glass {
    pub const ALL: [Glass; 11] = [
        Self::OldFashioned,
        Self::Martini,
        Self::Collins,
        Self::Highball,
        Self::ChampagneFlute,
        Self::Margarita,
        Self::ChampagneTulip,
        Self::Hurricane,
        Self::Shot,
        Self::HotDrink,
        Self::WhiteWine,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OldFashioned => "old-fashioned",
            Self::Martini => "martini",
            Self::Collins => "collins",
            Self::Highball => "highball",
            Self::ChampagneFlute => "champagne-flute",
            Self::Margarita => "margarita",
            Self::ChampagneTulip => "champagne-tulip",
            Self::Hurricane => "hurricane",
            Self::Shot => "shot",
            Self::HotDrink => "hot-drink",
            Self::WhiteWine => "white-wine",
        }
    }
}

impl FromStr for Glass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|glass| glass.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownGlass {
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for Glass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_serde_spelling() {
        for glass in Glass::ALL {
            let json = serde_json::to_string(&glass).unwrap();
            assert_eq!(json, format!("\"{}\"", glass.as_str()));
            assert_eq!(glass.as_str().parse::<Glass>().unwrap(), glass);
        }
    }

    #[test]
    fn rejects_unknown_glass() {
        let err = "tiki-mug".parse::<Glass>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownGlass {
                value: "tiki-mug".into()
            }
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("Martini".parse::<Glass>().is_err());
    }
}
