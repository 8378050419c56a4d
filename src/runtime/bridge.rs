//! The request/response bridge exposed to the presentation layer.
//!
//! One method per boundary operation. Mutating and playback operations fold
//! their errors into a boolean success flag after logging; queries return
//! values. Calls arrive strictly one at a time via the serve loop.

use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PickerSettings;
use crate::player::Player;
use crate::registry::Registry;

use super::picker;
use super::request::Request;

pub struct Bridge {
    registry: Registry,
    player: Player,
    picker: PickerSettings,
}

impl Bridge {
    pub fn new(registry: Registry, player: Player, picker: PickerSettings) -> Self {
        Self {
            registry,
            player,
            picker,
        }
    }

    pub fn pick_folder(&self) -> String {
        picker::pick_folder(&self.picker).unwrap_or_default()
    }

    pub fn create_playlist(&mut self, title: &str, folder_path: &str) -> bool {
        match self.registry.create_playlist(title, folder_path) {
            Ok(_) => true,
            Err(e) => {
                warn!("create_playlist rejected: {e}");
                false
            }
        }
    }

    pub fn rename_playlist(&mut self, id: Uuid, new_title: &str) -> bool {
        match self.registry.rename_playlist(id, new_title) {
            Ok(()) => true,
            Err(e) => {
                warn!("rename_playlist rejected: {e}");
                false
            }
        }
    }

    pub fn remove_playlist(&mut self, id: Uuid) -> bool {
        match self.registry.remove_playlist(id) {
            Ok(()) => true,
            Err(e) => {
                warn!("remove_playlist rejected: {e}");
                false
            }
        }
    }

    pub fn move_track(&mut self, id: Uuid, from: usize, to: usize) -> bool {
        match self.registry.move_track(id, from, to) {
            Ok(()) => true,
            Err(e) => {
                warn!("move_track rejected: {e}");
                false
            }
        }
    }

    pub fn add_to_recently_played(&mut self, id: Uuid) -> bool {
        match self.registry.add_to_recently_played(id) {
            Ok(()) => true,
            Err(e) => {
                warn!("add_to_recently_played rejected: {e}");
                false
            }
        }
    }

    /// Load the referenced playlist into the player and start playback.
    ///
    /// The player receives a detached clone; the registry remains free to
    /// mutate or delete the original afterwards.
    pub fn play_playlist(&mut self, id: Uuid) -> bool {
        let Some(playlist) = self.registry.playlist(id).cloned() else {
            warn!(%id, "play_playlist: unknown playlist");
            return false;
        };

        match self.player.load_playlist(playlist) {
            Ok(()) => {
                self.player.play();
                true
            }
            Err(e) => {
                warn!("play_playlist failed: {e}");
                false
            }
        }
    }

    pub fn set_volume(&mut self, level: f32) {
        self.player.set_volume(level);
    }

    pub fn resume_current_track(&mut self) {
        self.player.resume();
    }

    pub fn pause_current_track(&mut self) {
        self.player.pause();
    }

    /// Switch to the next track and, on success, re-issue play: a track
    /// switch alone never auto-resumes.
    pub fn next_track(&mut self) -> bool {
        if self.player.next() {
            self.player.play();
            return true;
        }
        false
    }

    pub fn prev_track(&mut self) -> bool {
        if self.player.prev() {
            self.player.play();
            return true;
        }
        false
    }

    /// Current track record, or an empty object when nothing is loaded.
    pub fn get_current_track_info(&self) -> Value {
        match self.player.current_track_info() {
            Some(info) => json!(info),
            None => json!({}),
        }
    }

    pub fn get_current_track_position(&self) -> f64 {
        self.player.position()
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    pub fn get_user_data(&self) -> Value {
        info!("retrieving user data");
        json!(self.registry.user())
    }

    /// Dispatch one boundary request to its handler.
    pub fn dispatch(&mut self, request: Request) -> Value {
        match request {
            Request::PickFolder => json!(self.pick_folder()),
            Request::CreatePlaylist { title, folder_path } => {
                json!(self.create_playlist(&title, &folder_path))
            }
            Request::RenamePlaylist {
                playlist_id,
                new_title,
            } => json!(self.rename_playlist(playlist_id, &new_title)),
            Request::RemovePlaylist { playlist_id } => json!(self.remove_playlist(playlist_id)),
            Request::MoveTrack {
                playlist_id,
                from_index,
                to_index,
            } => json!(self.move_track(playlist_id, from_index, to_index)),
            Request::AddToRecentlyPlayed { playlist_id } => {
                json!(self.add_to_recently_played(playlist_id))
            }
            Request::PlayPlaylist { playlist_id } => json!(self.play_playlist(playlist_id)),
            Request::SetVolume { level } => {
                self.set_volume(level);
                json!(null)
            }
            Request::ResumeCurrentTrack => {
                self.resume_current_track();
                json!(null)
            }
            Request::PauseCurrentTrack => {
                self.pause_current_track();
                json!(null)
            }
            Request::NextTrack => json!(self.next_track()),
            Request::PrevTrack => json!(self.prev_track()),
            Request::GetCurrentTrackInfo => self.get_current_track_info(),
            Request::GetCurrentTrackPosition => json!(self.get_current_track_position()),
            Request::IsPlaying => json!(self.is_playing()),
            Request::GetUserData => self.get_user_data(),
        }
    }

    #[cfg(test)]
    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }
}
