//! Playback: the engine capability boundary and the sequencing controller.
//!
//! `engine` defines the minimal capability an audio backend must provide,
//! `sink` implements it on top of rodio, and `controller` owns the playback
//! state machine over a loaded playlist.

mod controller;
mod engine;
mod sink;

pub use controller::{EngineFactory, NowPlaying, Player};
pub use engine::AudioEngine;
pub use sink::RodioEngine;
