/// Template catalog — genre-keyed opener/continuation pools and the
/// genre-independent twist pool, loaded from RON.

use rand::rngs::StdRng;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::genre::Genre;

/// The catalog shipped with the crate.
pub const BUILTIN_CATALOG: &str = include_str!("../../genre_data/catalog.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("template pool is empty")]
    EmptyPool,
    #[error("template pool entry {0} is blank")]
    BlankEntry(usize),
    #[error("catalog is missing genre: {0}")]
    MissingGenre(Genre),
    #[error("catalog has no twists")]
    MissingTwists,
    #[error("unknown genre: {0}")]
    UnknownGenre(String),
}

/// A non-empty list of trimmed, non-blank candidate strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Pool(Vec<String>);

impl Pool {
    pub fn new(entries: Vec<String>) -> Result<Pool, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::EmptyPool);
        }
        let mut trimmed = Vec::with_capacity(entries.len());
        for (i, entry) in entries.into_iter().enumerate() {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(CatalogError::BlankEntry(i));
            }
            trimmed.push(entry.to_string());
        }
        Ok(Pool(trimmed))
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.0.iter().any(|e| e == candidate)
    }

    /// Pick one entry uniformly at random.
    pub fn pick(&self, rng: &mut StdRng) -> &str {
        // Never empty: enforced by `Pool::new`.
        &self.0[rng.gen_range(0..self.0.len())]
    }
}

impl TryFrom<Vec<String>> for Pool {
    type Error = CatalogError;

    fn try_from(entries: Vec<String>) -> Result<Self, Self::Error> {
        Pool::new(entries)
    }
}

impl From<Pool> for Vec<String> {
    fn from(pool: Pool) -> Self {
        pool.0
    }
}

/// Opener and continuation pools for one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreTemplates {
    pub openers: Pool,
    pub continuations: Pool,
}

/// A partial catalog as it appears in a RON file. Genres present here
/// replace the matching genre pools wholesale; an empty `twists` list
/// leaves the twist pool untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogOverrides {
    #[serde(default)]
    pub genres: FxHashMap<Genre, GenreTemplates>,
    #[serde(default)]
    pub twists: Vec<String>,
}

impl CatalogOverrides {
    /// Load catalog overrides from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<CatalogOverrides, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse catalog overrides from a RON string.
    pub fn parse_ron(input: &str) -> Result<CatalogOverrides, CatalogError> {
        Ok(ron::from_str(input)?)
    }
}

/// The complete, read-only template catalog. Every genre is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    /// Indexed by `Genre::index`.
    genres: Vec<GenreTemplates>,
    twists: Pool,
}

impl TemplateCatalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<TemplateCatalog, CatalogError> {
        Self::parse_ron(BUILTIN_CATALOG)
    }

    /// Load a complete catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<TemplateCatalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a complete catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<TemplateCatalog, CatalogError> {
        Self::from_overrides(CatalogOverrides::parse_ron(input)?)
    }

    /// Build a catalog from a file that covers every genre and has twists.
    pub fn from_overrides(mut file: CatalogOverrides) -> Result<TemplateCatalog, CatalogError> {
        let mut genres = Vec::with_capacity(Genre::ALL.len());
        for genre in Genre::ALL {
            let templates = file
                .genres
                .remove(&genre)
                .ok_or(CatalogError::MissingGenre(genre))?;
            genres.push(templates);
        }
        if file.twists.is_empty() {
            return Err(CatalogError::MissingTwists);
        }
        let twists = Pool::new(file.twists)?;
        Ok(TemplateCatalog { genres, twists })
    }

    /// Merge overrides into this catalog. Pools from `overrides` replace
    /// the pools in `self` for the same genre.
    pub fn merge(&mut self, overrides: CatalogOverrides) -> Result<(), CatalogError> {
        if !overrides.twists.is_empty() {
            self.twists = Pool::new(overrides.twists)?;
            log::debug!("catalog: twists overridden ({})", self.twists.entries().len());
        }
        for (genre, templates) in overrides.genres {
            log::debug!("catalog: genre {} overridden", genre);
            self.genres[genre.index()] = templates;
        }
        Ok(())
    }

    pub fn lookup(&self, genre: Genre) -> &GenreTemplates {
        &self.genres[genre.index()]
    }

    /// Look up a genre by its display or config name.
    pub fn lookup_name(&self, name: &str) -> Result<&GenreTemplates, CatalogError> {
        let genre: Genre = name.parse()?;
        Ok(self.lookup(genre))
    }

    pub fn twists(&self) -> &Pool {
        &self.twists
    }

    pub fn iter(&self) -> impl Iterator<Item = (Genre, &GenreTemplates)> {
        Genre::ALL.into_iter().zip(self.genres.iter())
    }
}
