/// Story export — a plain-text file named after the genre and time.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::genre::Genre;

pub const EXPORT_MIME: &str = "text/plain";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `story_<genre>_<YYYYMMDD_HHMMSS>.txt`
pub fn export_filename(genre: Genre, at: NaiveDateTime) -> String {
    format!("story_{}_{}.txt", genre.name(), at.format(TIMESTAMP_FORMAT))
}

/// A ready-to-write export of the story text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryExport {
    pub filename: String,
    pub mime: &'static str,
    pub content: String,
}

impl StoryExport {
    pub fn new(text: &str, genre: Genre, at: NaiveDateTime) -> Self {
        Self {
            filename: export_filename(genre, at),
            mime: EXPORT_MIME,
            content: text.to_string(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Write the export into `dir`, returning the full path of the file.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, self.bytes()).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("exported story to {}", path.display());
        Ok(path)
    }
}
