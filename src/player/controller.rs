use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::{EngineError, Error, Result};
use crate::library::Playlist;

use super::engine::AudioEngine;

/// Factory producing a fresh engine instance for each track load.
pub type EngineFactory = Box<dyn Fn() -> Box<dyn AudioEngine>>;

/// Sequences tracks within a loaded playlist and delegates audio I/O to the
/// engine capability.
///
/// Two states: Empty (`playlist` is `None`) and Loaded (a playlist snapshot
/// plus a current index). The snapshot is a detached clone owned here; the
/// registry deleting the original playlist cannot dangle it.
pub struct Player {
    engine: Box<dyn AudioEngine>,
    new_engine: EngineFactory,
    playlist: Option<Playlist>,
    current_index: usize,
    volume: f32,
}

/// Snapshot of the current track returned to the boundary.
#[derive(Debug, Clone, Serialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub file_path: String,
    #[serde(rename = "duration_seconds")]
    pub duration_secs: f64,
    pub position: f64,
    pub is_playing: bool,
    pub current_index: usize,
}

impl Player {
    pub fn new(new_engine: EngineFactory) -> Self {
        let engine = new_engine();
        Self {
            engine,
            new_engine,
            playlist: None,
            current_index: 0,
            volume: 1.0,
        }
    }

    /// Load a detached playlist snapshot and prepare its first track.
    ///
    /// A playlist with zero tracks cannot be loaded; the player returns to
    /// the Empty state and reports [`Error::EmptyPlaylist`].
    pub fn load_playlist(&mut self, playlist: Playlist) -> Result<()> {
        info!(title = %playlist.title, "loading playlist into player");

        if playlist.tracks.is_empty() {
            warn!(title = %playlist.title, "cannot load playlist, it contains no tracks");
            self.playlist = None;
            self.current_index = 0;
            return Err(Error::EmptyPlaylist);
        }

        self.playlist = Some(playlist);
        self.current_index = 0;
        self.load_current_track()?;
        Ok(())
    }

    /// Stop and discard the current engine instance, then load the file at
    /// the current index into a fresh one.
    ///
    /// The engine has no unload primitive, so one instance per track keeps
    /// decoder state simple; the brief gap on track change is accepted. On
    /// engine failure the player stays Loaded with an undefined position.
    fn load_current_track(&mut self) -> std::result::Result<(), EngineError> {
        let track = match self
            .playlist
            .as_ref()
            .and_then(|p| p.tracks.get(self.current_index))
        {
            Some(t) => t.clone(),
            None => {
                warn!("no valid track to load");
                return Err(EngineError("no track at the current index".into()));
            }
        };

        info!(title = %track.title, file = %track.file_path, "loading track");

        self.engine.stop();
        self.engine = (self.new_engine)();
        self.engine.set_volume(self.volume);

        if let Err(e) = self.engine.load(Path::new(&track.file_path)) {
            error!(title = %track.title, "failed to load track: {e}");
            return Err(e);
        }
        Ok(())
    }

    /// Start playback; a no-op while already playing.
    pub fn play(&mut self) {
        if !self.engine.is_playing() {
            self.engine.play();
        }
    }

    /// Pause playback; a no-op while already paused.
    pub fn pause(&mut self) {
        if self.engine.is_playing() {
            self.engine.pause();
        }
    }

    /// Unconditional resume, no playing-flag guard.
    pub fn resume(&mut self) {
        self.engine.resume();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.engine.set_volume(volume);
    }

    /// Step to the next track. No wraparound: at the last track this is a
    /// no-op returning `false`. Playback does not auto-resume.
    pub fn next(&mut self) -> bool {
        match &self.playlist {
            Some(p) if self.current_index + 1 < p.tracks.len() => {
                self.current_index += 1;
                self.load_current_track().is_ok()
            }
            _ => false,
        }
    }

    /// Step to the previous track. No wraparound: at the first track this is
    /// a no-op returning `false`.
    pub fn prev(&mut self) -> bool {
        match &self.playlist {
            Some(_) if self.current_index > 0 => {
                self.current_index -= 1;
                self.load_current_track().is_ok()
            }
            _ => false,
        }
    }

    /// Snapshot of the current track, or `None` when no playlist is loaded
    /// or the index is out of range.
    pub fn current_track_info(&self) -> Option<NowPlaying> {
        let playlist = self.playlist.as_ref()?;
        let track = playlist.tracks.get(self.current_index)?;

        Some(NowPlaying {
            title: track.title.clone(),
            artist: track.artist.clone(),
            file_path: track.file_path.clone(),
            duration_secs: track.duration_secs,
            position: self.engine.position(),
            is_playing: self.engine.is_playing(),
            current_index: self.current_index,
        })
    }

    pub fn position(&self) -> f64 {
        self.engine.position()
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    #[cfg(test)]
    pub(crate) fn is_loaded(&self) -> bool {
        self.playlist.is_some()
    }
}
