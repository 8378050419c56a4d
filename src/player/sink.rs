//! rodio-backed [`AudioEngine`] implementation.
//!
//! Each instance owns its output stream and a single sink. `load` opens and
//! decodes the file and leaves the sink paused, mirroring how sinks are
//! prepared elsewhere in the ecosystem.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::error::EngineError;

use super::engine::AudioEngine;

pub struct RodioEngine {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioEngine {
    pub fn new() -> Self {
        Self {
            stream: None,
            sink: None,
            volume: 1.0,
        }
    }
}

impl Default for RodioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError(format!("no audio output device: {e}")))?;
        // rodio logs to stderr when an OutputStream is dropped; engines are
        // replaced per track, so silence that.
        stream.log_on_drop(false);

        let file = File::open(path)
            .map_err(|e| EngineError(format!("failed to open {}: {e}", path.display())))?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| EngineError(format!("failed to decode {}: {e}", path.display())))?;

        let sink = Sink::connect_new(stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();

        self.stream = Some(stream);
        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.stream = None;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|s| s.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map(|s| !s.is_paused() && !s.empty())
            .unwrap_or(false)
    }
}
