/// Story state — the assembled text and the log of appended fragments.

use rand::rngs::StdRng;
use thiserror::Error;

use crate::core::catalog::{GenreTemplates, Pool};

/// Separator placed between consecutive fragments.
pub const FRAGMENT_SEPARATOR: &str = " ";

/// Advisory conditions surfaced to the user. State is unchanged whenever
/// an operation returns one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Notice {
    #[error("Start a story first!")]
    NoActiveStory,
    #[error("Nothing to add: the text is empty.")]
    EmptyCustomText,
}

impl Notice {
    /// Whether the presentation layer should show this notice. Empty
    /// custom text is a silent no-op.
    pub fn is_visible(&self) -> bool {
        matches!(self, Notice::NoActiveStory)
    }
}

/// The mutable per-session story.
///
/// `text` is always `fragments` joined with a single space; both are
/// empty together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryState {
    text: String,
    fragments: Vec<String>,
}

impl StoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Replace the story with a single random opener.
    pub fn start(&mut self, templates: &GenreTemplates, rng: &mut StdRng) -> &str {
        let opener = templates.openers.pick(rng).to_string();
        self.fragments = vec![opener];
        self.rebuild_text();
        &self.fragments[0]
    }

    /// Append a random continuation from the genre's pool.
    pub fn continue_story(
        &mut self,
        templates: &GenreTemplates,
        rng: &mut StdRng,
    ) -> Result<&str, Notice> {
        self.append_from(&templates.continuations, rng)
    }

    /// Append a random genre-independent twist.
    pub fn twist(&mut self, twists: &Pool, rng: &mut StdRng) -> Result<&str, Notice> {
        self.append_from(twists, rng)
    }

    /// Append user-typed text after trimming it.
    pub fn add_custom_text(&mut self, raw: &str) -> Result<&str, Notice> {
        self.require_active()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Notice::EmptyCustomText);
        }
        Ok(self.append(trimmed.to_string()))
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
        self.text.clear();
    }

    fn append_from(&mut self, pool: &Pool, rng: &mut StdRng) -> Result<&str, Notice> {
        self.require_active()?;
        let fragment = pool.pick(rng).to_string();
        Ok(self.append(fragment))
    }

    fn require_active(&self) -> Result<(), Notice> {
        if self.is_empty() {
            Err(Notice::NoActiveStory)
        } else {
            Ok(())
        }
    }

    fn append(&mut self, fragment: String) -> &str {
        self.fragments.push(fragment);
        self.rebuild_text();
        self.fragments.last().map(String::as_str).unwrap_or_default()
    }

    fn rebuild_text(&mut self) {
        self.text = self.fragments.join(FRAGMENT_SEPARATOR);
    }
}
