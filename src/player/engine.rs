use std::path::Path;

use crate::error::EngineError;

/// Minimal capability interface over an audio decoding/output backend.
///
/// The controller's state machine talks only to this trait, so it can be
/// exercised against a fake implementation independent of audio hardware.
/// The backend has no unload primitive; callers discard the whole instance
/// and construct a fresh one per track.
pub trait AudioEngine {
    /// Prepare `path` for playback, paused at position zero.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;
    /// Start playback of the loaded file.
    fn play(&mut self);
    /// Pause playback.
    fn pause(&mut self);
    /// Resume playback.
    fn resume(&mut self);
    /// Stop playback and release the output.
    fn stop(&mut self);
    /// Set the output volume (1.0 = unity gain).
    fn set_volume(&mut self, volume: f32);
    /// Current playback position in seconds.
    fn position(&self) -> f64;
    /// Whether audio is currently playing.
    fn is_playing(&self) -> bool;
}
