//! Session startup and the serialized request/response loop.
//!
//! `run` wires settings, storage, the registry and the player together, then
//! serves one JSON request per line on stdin, answering on stdout. Every
//! operation runs to completion before the next line is read; logs go to
//! stderr so stdout stays a clean protocol channel.

use std::io::{self, BufRead, Write};

use serde_json::json;
use tracing::{info, warn};

use crate::library;
use crate::player::{AudioEngine, Player, RodioEngine};
use crate::registry::Registry;
use crate::store::Store;

mod bridge;
mod picker;
mod request;
mod settings;

pub use bridge::Bridge;
pub use request::Request;

#[cfg(test)]
mod tests;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let store = Store::new(settings.storage.data_dir.clone());
    let mut user = store.load(&settings.storage.username)?;
    library::refresh_user(&mut user, &settings.library);

    let registry = Registry::new(user, store, settings.library.clone());
    let player = Player::new(Box::new(|| {
        Box::new(RodioEngine::new()) as Box<dyn AudioEngine>
    }));
    let mut bridge = Bridge::new(registry, player, settings.picker.clone());

    info!(username = %settings.storage.username, "session ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(stdin.lock(), stdout.lock(), &mut bridge)
}

/// Read JSON requests line by line and answer each with one JSON line.
///
/// Malformed lines get an `{"error": ...}` response and do not end the
/// session; end of input does.
pub fn serve<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    bridge: &mut Bridge,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => bridge.dispatch(request),
            Err(e) => {
                warn!("rejecting malformed request: {e}");
                json!({ "error": e.to_string() })
            }
        };

        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }

    info!("input closed, shutting down");
    Ok(())
}
