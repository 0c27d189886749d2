/// Story statistics — pure projections of the current story.

use serde::Serialize;

use crate::core::story::StoryState;

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length of the text in characters (not bytes).
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Fragments appended after the opener.
pub fn continuation_count(fragments: &[String]) -> usize {
    fragments.len().saturating_sub(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoryStats {
    pub words: usize,
    pub characters: usize,
    pub continuations: usize,
}

impl StoryStats {
    pub fn of(state: &StoryState) -> Self {
        Self {
            words: word_count(state.text()),
            characters: char_count(state.text()),
            continuations: continuation_count(state.fragments()),
        }
    }
}
