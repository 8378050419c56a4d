//! Persisted document types: `Track`, `Playlist` and `User`.
//!
//! These mirror the on-disk `user.json` document one-to-one. Durations are
//! stored as floating-point seconds under the `duration_seconds` key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One audio file's metadata plus its path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    #[serde(rename = "duration_seconds")]
    pub duration_secs: f64,
    /// Unique within a playlist.
    pub file_path: String,
}

/// A named, ordered collection of tracks sourced from one folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    /// Stable identifier assigned at creation. All references resolve by id,
    /// never by structural equality. Documents written before ids existed
    /// get a fresh one on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Unique among a user's playlists.
    pub title: String,
    /// Always equals the sum of `tracks[..].duration_secs`; maintained by
    /// the synchronizer and the registry only.
    #[serde(rename = "duration_seconds")]
    pub duration_secs: f64,
    /// Unique among a user's playlists.
    pub folder_path: String,
    pub tracks: Vec<Track>,
}

/// The root of one user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
    /// Playlist titles, most-recent-last, at most [`RECENT_LIMIT`] entries,
    /// no duplicates.
    #[serde(default)]
    pub recently_played_playlists: Vec<String>,
}

/// Maximum number of recently-played entries kept per user.
pub const RECENT_LIMIT: usize = 5;

impl User {
    /// Fresh user with no playlists; what `Store::load` hands back when no
    /// document exists yet.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            playlists: Vec::new(),
            recently_played_playlists: Vec::new(),
        }
    }

    /// Record `title` as the most recently played playlist.
    ///
    /// An already-present title is relocated to the most-recent end rather
    /// than duplicated; overflow evicts the oldest (front) entries.
    pub fn push_recent(&mut self, title: &str) {
        self.recently_played_playlists.retain(|t| t != title);
        self.recently_played_playlists.push(title.to_string());
        while self.recently_played_playlists.len() > RECENT_LIMIT {
            self.recently_played_playlists.remove(0);
        }
    }
}

/// Sum of track durations, in seconds.
pub(crate) fn total_duration(tracks: &[Track]) -> f64 {
    tracks.iter().map(|t| t.duration_secs).sum()
}
