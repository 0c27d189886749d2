use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::catalog::CatalogError;

/// A named template group selecting which opener and continuation
/// pools a story samples from.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Genre {
    #[default]
    Fantasy,
    Mystery,
    SciFi,
    Horror,
    Adventure,
}

impl Genre {
    /// Every genre, in selector order.
    pub const ALL: [Genre; 5] = [
        Genre::Fantasy,
        Genre::Mystery,
        Genre::SciFi,
        Genre::Horror,
        Genre::Adventure,
    ];

    /// Display name, also used in export filenames (e.g. "Sci-Fi").
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fantasy => "Fantasy",
            Self::Mystery => "Mystery",
            Self::SciFi => "Sci-Fi",
            Self::Horror => "Horror",
            Self::Adventure => "Adventure",
        }
    }

    /// Position of this genre in `Genre::ALL`.
    pub fn index(&self) -> usize {
        match self {
            Self::Fantasy => 0,
            Self::Mystery => 1,
            Self::SciFi => 2,
            Self::Horror => 3,
            Self::Adventure => 4,
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Genre {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fantasy" => Ok(Self::Fantasy),
            "mystery" => Ok(Self::Mystery),
            "scifi" | "sci-fi" | "sci_fi" => Ok(Self::SciFi),
            "horror" => Ok(Self::Horror),
            "adventure" => Ok(Self::Adventure),
            _ => Err(CatalogError::UnknownGenre(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_selector_labels() {
        let names: Vec<&str> = Genre::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(names, vec!["Fantasy", "Mystery", "Sci-Fi", "Horror", "Adventure"]);
    }

    #[test]
    fn default_is_fantasy() {
        assert_eq!(Genre::default(), Genre::Fantasy);
    }

    #[test]
    fn index_follows_all_order() {
        for (i, genre) in Genre::ALL.iter().enumerate() {
            assert_eq!(genre.index(), i);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("HORROR".parse::<Genre>().unwrap(), Genre::Horror);
        assert_eq!(" mystery ".parse::<Genre>().unwrap(), Genre::Mystery);
    }

    #[test]
    fn parse_sci_fi_spellings() {
        for s in ["Sci-Fi", "scifi", "sci_fi"] {
            assert_eq!(s.parse::<Genre>().unwrap(), Genre::SciFi);
        }
    }

    #[test]
    fn parse_display_round_trips() {
        for genre in Genre::ALL {
            assert_eq!(genre.to_string().parse::<Genre>().unwrap(), genre);
        }
    }

    #[test]
    fn parse_unknown_genre() {
        let err = "western".parse::<Genre>().unwrap_err();
        assert!(matches!(err, CatalogError::UnknownGenre(ref name) if name == "western"));
    }
}
