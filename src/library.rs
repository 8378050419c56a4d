//! Library data model and folder synchronization.
//!
//! `model` holds the persisted document types (`Track`, `Playlist`, `User`),
//! `scan` lists a folder and reads per-file metadata, and `sync` reconciles a
//! stored track list against the current folder contents.

mod model;
mod scan;
mod sync;

pub use model::{Playlist, Track, User};
pub(crate) use model::total_duration;
pub use scan::{audio_files, build_tracks, read_track};
pub use sync::{refresh, refresh_user};
