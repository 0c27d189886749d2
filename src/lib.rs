//! Story Loom — an interactive story builder.
//!
//! Starts a passage from a genre opener, then grows it one fragment at a
//! time with genre continuations, genre-independent twists, or text the
//! user types in. No models, no persistence: one seeded session, one
//! story buffer, and a plain-text export.

pub mod core;
pub mod schema;
