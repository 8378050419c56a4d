use std::process::Command;

use tracing::{info, warn};

use crate::config::PickerSettings;

/// Ask the external folder-selection dialog for a path.
///
/// The dialog is a standalone process; its trimmed stdout is the chosen
/// path. A cancelled dialog, an empty answer or a failed spawn all yield
/// `None` — picking nothing is not an error.
pub fn pick_folder(settings: &PickerSettings) -> Option<String> {
    let (program, args) = settings.command.split_first()?;
    info!(%program, "launching folder picker");

    let output = match Command::new(program).args(args).output() {
        Ok(o) => o,
        Err(e) => {
            warn!(%program, "failed to launch folder picker: {e}");
            return None;
        }
    };

    if !output.status.success() {
        warn!(status = %output.status, "folder picker exited without a selection");
        return None;
    }

    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() { None } else { Some(path) }
}
