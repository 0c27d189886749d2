/// The story session: one catalog, one story, one seeded RNG.
///
/// Every user action goes through exactly one method here, which reads
/// the catalog, mutates the story, and leaves the caller to re-render.

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::catalog::{CatalogError, CatalogOverrides, TemplateCatalog};
use crate::core::export::StoryExport;
use crate::core::stats::StoryStats;
use crate::core::story::{Notice, StoryState};
use crate::schema::genre::Genre;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// A user-triggered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    Continue,
    Twist,
    AddCustomText(String),
    Clear,
}

pub struct StorySession {
    catalog: TemplateCatalog,
    genre: Genre,
    state: StoryState,
    rng: StdRng,
    seed: u64,
}

/// Builder for constructing a `StorySession`.
pub struct StorySessionBuilder {
    seed: Option<u64>,
    genre: Genre,
    catalog_path: Option<PathBuf>,
    /// Directly provided catalog (for testing without files).
    catalog: Option<TemplateCatalog>,
}

impl StorySession {
    pub fn builder() -> StorySessionBuilder {
        StorySessionBuilder {
            seed: None,
            genre: Genre::default(),
            catalog_path: None,
            catalog: None,
        }
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Change the genre used by later actions. The story is untouched.
    pub fn select_genre(&mut self, genre: Genre) {
        log::debug!("genre selected: {}", genre);
        self.genre = genre;
    }

    pub fn state(&self) -> &StoryState {
        &self.state
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the random sequence from `seed`. The story is untouched.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn stats(&self) -> StoryStats {
        StoryStats::of(&self.state)
    }

    pub fn start(&mut self) -> &str {
        let opener = self.state.start(self.catalog.lookup(self.genre), &mut self.rng);
        log::debug!("start ({}): {}", self.genre, opener);
        opener
    }

    pub fn continue_story(&mut self) -> Result<&str, Notice> {
        let fragment = self
            .state
            .continue_story(self.catalog.lookup(self.genre), &mut self.rng)?;
        log::debug!("continue ({}): {}", self.genre, fragment);
        Ok(fragment)
    }

    pub fn twist(&mut self) -> Result<&str, Notice> {
        let fragment = self.state.twist(self.catalog.twists(), &mut self.rng)?;
        log::debug!("twist: {}", fragment);
        Ok(fragment)
    }

    pub fn add_custom_text(&mut self, raw: &str) -> Result<&str, Notice> {
        let fragment = self.state.add_custom_text(raw)?;
        log::debug!("custom text: {}", fragment);
        Ok(fragment)
    }

    pub fn clear(&mut self) {
        self.state.clear();
        log::debug!("story cleared");
    }

    /// Run one action against the story.
    pub fn apply(&mut self, action: Action) -> Result<(), Notice> {
        let result = match action {
            Action::Start => {
                self.start();
                Ok(())
            }
            Action::Continue => self.continue_story().map(drop),
            Action::Twist => self.twist().map(drop),
            Action::AddCustomText(raw) => self.add_custom_text(&raw).map(drop),
            Action::Clear => {
                self.clear();
                Ok(())
            }
        };
        if let Err(notice) = result {
            log::debug!("action left story unchanged: {:?}", notice);
        }
        result
    }

    /// Export the current story. There is nothing to export before a
    /// story has been started.
    pub fn export(&self, at: NaiveDateTime) -> Result<StoryExport, Notice> {
        if self.state.is_empty() {
            return Err(Notice::NoActiveStory);
        }
        Ok(StoryExport::new(self.state.text(), self.genre, at))
    }
}

impl StorySessionBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    /// Catalog overrides file merged over the base catalog.
    pub fn catalog_path(mut self, path: impl AsRef<Path>) -> Self {
        self.catalog_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Provide the base catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: TemplateCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> Result<StorySession, SessionError> {
        let mut catalog = match self.catalog {
            Some(catalog) => catalog,
            None => TemplateCatalog::builtin()?,
        };

        if let Some(ref path) = self.catalog_path {
            let overrides = CatalogOverrides::load_from_ron(path)?;
            log::info!(
                "applying catalog overrides from {} ({} genres)",
                path.display(),
                overrides.genres.len()
            );
            catalog.merge(overrides)?;
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        log::info!("story session ready: genre={}, seed={}", self.genre, seed);

        Ok(StorySession {
            catalog,
            genre: self.genre,
            state: StoryState::new(),
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64) -> StorySession {
        StorySession::builder().seed(seed).build().unwrap()
    }

    #[test]
    fn builder_defaults() {
        let s = session(42);
        assert_eq!(s.genre(), Genre::Fantasy);
        assert_eq!(s.seed(), 42);
        assert!(s.state().is_empty());
    }

    #[test]
    fn select_genre_leaves_story_alone() {
        let mut s = session(1);
        s.start();
        let before = s.state().clone();
        s.select_genre(Genre::Horror);
        assert_eq!(s.state(), &before);
        assert_eq!(s.genre(), Genre::Horror);
    }

    #[test]
    fn continue_uses_selected_genre() {
        let mut s = session(2);
        s.start();
        s.select_genre(Genre::SciFi);
        let added = s.continue_story().unwrap().to_string();
        assert!(s.catalog().lookup(Genre::SciFi).continuations.contains(&added));
    }

    #[test]
    fn apply_dispatches_each_action() {
        let mut s = session(3);
        assert_eq!(s.apply(Action::Continue), Err(Notice::NoActiveStory));
        s.apply(Action::Start).unwrap();
        s.apply(Action::Continue).unwrap();
        s.apply(Action::Twist).unwrap();
        s.apply(Action::AddCustomText("  the end ".to_string())).unwrap();
        assert_eq!(
            s.apply(Action::AddCustomText(" ".to_string())),
            Err(Notice::EmptyCustomText)
        );
        assert_eq!(s.stats().continuations, 3);
        assert!(s.state().text().ends_with(" the end"));
        s.apply(Action::Clear).unwrap();
        assert!(s.state().is_empty());
    }

    #[test]
    fn same_seed_same_story() {
        let mut a = session(99);
        let mut b = session(99);
        for s in [&mut a, &mut b] {
            s.start();
            s.continue_story().unwrap();
            s.twist().unwrap();
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut s = session(5);
        s.start();
        let first = s.state().clone();
        s.reseed(5);
        s.start();
        assert_eq!(s.state(), &first);
    }

    #[test]
    fn export_requires_a_story() {
        let at = chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let mut s = session(6);
        assert_eq!(s.export(at), Err(Notice::NoActiveStory));
        s.start();
        let export = s.export(at).unwrap();
        assert_eq!(export.content, s.state().text());
        assert_eq!(export.filename, "story_Fantasy_20250102_030405.txt");
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let result = StorySession::builder()
            .catalog_path("does/not/exist.ron")
            .build();
        assert!(matches!(
            result,
            Err(SessionError::Catalog(CatalogError::Io(_)))
        ));
    }
}
