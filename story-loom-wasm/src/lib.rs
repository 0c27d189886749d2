//! WASM bindings for story-loom — powers the browser front end.
//!
//! Every action returns a JSON snapshot of the story so the page can
//! redraw from the latest state without keeping any of its own.

use chrono::{DateTime, NaiveDateTime};
use wasm_bindgen::prelude::*;

use story_loom::core::session::{Action, StorySession};
use story_loom::core::view::StoryView;
use story_loom::schema::genre::Genre;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct ActionResult {
    /// Message to show the user, if the action changed nothing.
    notice: Option<String>,
    view: StoryView,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("JSON error: {e}")))
}

fn parse_genre(name: &str) -> Result<Genre, JsError> {
    name.parse::<Genre>()
        .map_err(|e| JsError::new(&e.to_string()))
}

// ---------------------------------------------------------------------------
// StoryLoom — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct StoryLoom {
    session: StorySession,
}

#[wasm_bindgen]
impl StoryLoom {
    /// Create a new session for the given genre and seed.
    #[wasm_bindgen(constructor)]
    pub fn new(genre: &str, seed: u64) -> Result<StoryLoom, JsError> {
        let session = StorySession::builder()
            .genre(parse_genre(genre)?)
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Session build error: {e}")))?;
        Ok(StoryLoom { session })
    }

    /// Select the genre used by later actions. The story is untouched.
    pub fn set_genre(&mut self, genre: &str) -> Result<String, JsError> {
        self.session.select_genre(parse_genre(genre)?);
        self.view()
    }

    pub fn start(&mut self) -> Result<String, JsError> {
        self.run(Action::Start)
    }

    pub fn continue_story(&mut self) -> Result<String, JsError> {
        self.run(Action::Continue)
    }

    pub fn twist(&mut self) -> Result<String, JsError> {
        self.run(Action::Twist)
    }

    pub fn add_custom_text(&mut self, text: &str) -> Result<String, JsError> {
        self.run(Action::AddCustomText(text.to_string()))
    }

    pub fn clear(&mut self) -> Result<String, JsError> {
        self.run(Action::Clear)
    }

    /// Current snapshot as JSON.
    ///
    /// Shape:
    /// ```json
    /// {
    ///   "genre": "Fantasy",
    ///   "heading": "Your Fantasy Story",
    ///   "text": "Deep in the enchanted forest, there lies a hidden a portal to another realm",
    ///   "placeholder": null,
    ///   "stats": { "words": 14, "characters": 75, "continuations": 1 },
    ///   "log": [
    ///     { "step": 1, "preview": "Deep in the enchanted forest, there lies a hidden" },
    ///     { "step": 2, "preview": "a portal to another realm" }
    ///   ]
    /// }
    /// ```
    pub fn view(&self) -> Result<String, JsError> {
        to_json(&StoryView::render(&self.session))
    }

    /// Build the download payload for the current story, stamped with
    /// `timestamp_ms` (milliseconds since the Unix epoch, UTC).
    pub fn export(&self, timestamp_ms: f64) -> Result<String, JsError> {
        let at = timestamp_from_millis(timestamp_ms)
            .ok_or_else(|| JsError::new("Timestamp must be a finite, in-range number"))?;
        let export = self
            .session
            .export(at)
            .map_err(|notice| JsError::new(&notice.to_string()))?;
        to_json(&export)
    }

    pub fn available_genres() -> String {
        let names: Vec<&str> = Genre::ALL.iter().map(|g| g.name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Restart the random sequence with a new seed (same genre, same story).
    pub fn reset(&mut self, seed: u64) {
        self.session.reseed(seed);
    }
}

// Private helpers
impl StoryLoom {
    fn run(&mut self, action: Action) -> Result<String, JsError> {
        let notice = match self.session.apply(action) {
            Ok(()) => None,
            Err(notice) if notice.is_visible() => Some(notice.to_string()),
            Err(_) => None,
        };
        to_json(&ActionResult {
            notice,
            view: StoryView::render(&self.session),
        })
    }
}

/// UTC time for a JS millisecond timestamp; `None` for NaN, infinities, or
/// values chrono cannot represent.
fn timestamp_from_millis(ms: f64) -> Option<NaiveDateTime> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64).map(|at| at.naive_utc())
}
