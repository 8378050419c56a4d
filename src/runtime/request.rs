//! Wire types for the presentation-layer bridge.
//!
//! One request per line of JSON on stdin, one response per line on stdout.
//! Playlist references travel as stable ids, never as whole objects.

use serde::Deserialize;
use uuid::Uuid;

/// A boundary operation, tagged by `"op"`.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    PickFolder,
    CreatePlaylist {
        title: String,
        folder_path: String,
    },
    RenamePlaylist {
        playlist_id: Uuid,
        new_title: String,
    },
    RemovePlaylist {
        playlist_id: Uuid,
    },
    MoveTrack {
        playlist_id: Uuid,
        from_index: usize,
        to_index: usize,
    },
    AddToRecentlyPlayed {
        playlist_id: Uuid,
    },
    PlayPlaylist {
        playlist_id: Uuid,
    },
    SetVolume {
        level: f32,
    },
    ResumeCurrentTrack,
    PauseCurrentTrack,
    NextTrack,
    PrevTrack,
    GetCurrentTrackInfo,
    GetCurrentTrackPosition,
    IsPlaying,
    GetUserData,
}
