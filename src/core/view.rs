/// Presentation snapshot — everything a front end needs to draw the
/// current story, recomputed from scratch after every action.

use serde::Serialize;

use crate::core::session::StorySession;
use crate::core::stats::StoryStats;

/// Log entries longer than this many characters are cut short.
pub const LOG_PREVIEW_CHARS: usize = 50;

pub const PLACEHOLDER: &str = "Start your story with the 'start' action!";

/// One line of the build log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// 1-based position in the story.
    pub step: usize,
    pub preview: String,
}

/// Cut `fragment` to `LOG_PREVIEW_CHARS` characters, adding "..." when
/// anything was removed.
pub fn truncate_fragment(fragment: &str) -> String {
    match fragment.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &fragment[..cut]),
        None => fragment.to_string(),
    }
}

pub fn build_log(fragments: &[String]) -> Vec<LogEntry> {
    fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| LogEntry {
            step: i + 1,
            preview: truncate_fragment(fragment),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryView {
    pub genre: String,
    pub heading: String,
    /// `None` until a story has been started.
    pub text: Option<String>,
    pub placeholder: Option<&'static str>,
    /// Only shown while a story exists.
    pub stats: Option<StoryStats>,
    pub log: Vec<LogEntry>,
}

impl StoryView {
    pub fn render(session: &StorySession) -> Self {
        let state = session.state();
        let genre = session.genre();
        let active = !state.is_empty();
        Self {
            genre: genre.name().to_string(),
            heading: format!("Your {} Story", genre),
            text: active.then(|| state.text().to_string()),
            placeholder: (!active).then_some(PLACEHOLDER),
            stats: active.then(|| StoryStats::of(state)),
            log: build_log(state.fragments()),
        }
    }
}
