//! Playlist registry: the session context owning the in-memory library.
//!
//! Created once at startup from the loaded [`User`] and passed by ownership;
//! nothing reads process-wide state. Every mutation is copy-on-write: a
//! candidate `User` is built, persisted, and only swapped in on success, so
//! a failed save leaves the visible state exactly as it was.

use std::path::Path;

use tracing::{error, info};
use uuid::Uuid;

use crate::config::LibrarySettings;
use crate::error::{Error, Result};
use crate::library::{self, Playlist, User};
use crate::store::Store;

pub struct Registry {
    user: User,
    store: Store,
    library: LibrarySettings,
}

impl Registry {
    pub fn new(user: User, store: Store, library: LibrarySettings) -> Self {
        Self {
            user,
            store,
            library,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Resolve a playlist by its stable identifier.
    pub fn playlist(&self, id: Uuid) -> Option<&Playlist> {
        self.user.playlists.iter().find(|p| p.id == id)
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.user
            .playlists
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::NotFound { id })
    }

    /// Persist `candidate` and make it the visible state.
    ///
    /// On failure the current state is untouched and the candidate is
    /// dropped; there is no separate rollback step that could itself fail.
    fn commit(&mut self, candidate: User) -> Result<()> {
        match self.store.save(&candidate) {
            Ok(()) => {
                self.user = candidate;
                Ok(())
            }
            Err(e) => {
                error!("failed to persist library, discarding changes: {e}");
                Err(e)
            }
        }
    }

    /// Create a playlist from the audio files in `folder_path`.
    ///
    /// Title and folder path must both be unused by every existing playlist.
    /// A folder with zero supported files yields a valid empty playlist.
    pub fn create_playlist(&mut self, title: &str, folder_path: &str) -> Result<Uuid> {
        info!(%title, %folder_path, "creating playlist");

        for playlist in &self.user.playlists {
            if playlist.title == title {
                return Err(Error::validation(format!(
                    "a playlist titled '{title}' already exists"
                )));
            }
            if playlist.folder_path == folder_path {
                return Err(Error::validation(format!(
                    "a playlist already uses folder '{folder_path}'"
                )));
            }
        }

        let tracks = library::build_tracks(Path::new(folder_path), &self.library);
        let duration_secs = library::total_duration(&tracks);
        let playlist = Playlist {
            id: Uuid::new_v4(),
            title: title.to_string(),
            duration_secs,
            folder_path: folder_path.to_string(),
            tracks,
        };
        let id = playlist.id;

        let mut candidate = self.user.clone();
        candidate.playlists.push(playlist);
        self.commit(candidate)?;

        info!(%title, "playlist created");
        Ok(id)
    }

    pub fn rename_playlist(&mut self, id: Uuid, new_title: &str) -> Result<()> {
        let index = self.position(id)?;
        info!(old = %self.user.playlists[index].title, new = %new_title, "renaming playlist");

        let mut candidate = self.user.clone();
        candidate.playlists[index].title = new_title.to_string();
        self.commit(candidate)
    }

    pub fn remove_playlist(&mut self, id: Uuid) -> Result<()> {
        let index = self.position(id)?;
        info!(title = %self.user.playlists[index].title, "removing playlist");

        let mut candidate = self.user.clone();
        candidate.playlists.remove(index);
        self.commit(candidate)
    }

    /// Move the track at `from` so it ends up at `to` (splice, not swap).
    pub fn move_track(&mut self, id: Uuid, from: usize, to: usize) -> Result<()> {
        let index = self.position(id)?;
        let len = self.user.playlists[index].tracks.len();
        if from >= len || to >= len {
            return Err(Error::validation(format!(
                "track indices {from} -> {to} out of range for {len} tracks"
            )));
        }

        info!(playlist = %self.user.playlists[index].title, from, to, "moving track");

        let mut candidate = self.user.clone();
        let track = candidate.playlists[index].tracks.remove(from);
        candidate.playlists[index].tracks.insert(to, track);
        self.commit(candidate)
    }

    /// Record the referenced playlist as most recently played.
    pub fn add_to_recently_played(&mut self, id: Uuid) -> Result<()> {
        let index = self.position(id)?;
        let title = self.user.playlists[index].title.clone();
        info!(%title, "adding playlist to recently played");

        let mut candidate = self.user.clone();
        candidate.push_recent(&title);
        self.commit(candidate)
    }
}
