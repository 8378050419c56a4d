use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use crate::config::LibrarySettings;

use super::model::{Track, User, total_duration};
use super::scan;

/// Reconcile `existing` against the current contents of `folder`.
///
/// Additive-only: tracks whose `file_path` is already present are kept
/// untouched (stale entries whose file disappeared persist until manually
/// removed), newly discovered files are appended with freshly read metadata.
/// The aggregate duration is recomputed as the sum over the returned set.
///
/// Returns `None` when the folder no longer exists; the caller must treat
/// the playlist as unrefreshable for this cycle without deleting its
/// persisted definition.
pub fn refresh(
    existing: &[Track],
    folder: &Path,
    settings: &LibrarySettings,
) -> Option<(Vec<Track>, f64)> {
    if !folder.is_dir() {
        return None;
    }

    let mut updated = existing.to_vec();
    let known: HashSet<&str> = updated.iter().map(|t| t.file_path.as_str()).collect();

    let new_tracks: Vec<Track> = scan::audio_files(folder, settings)
        .iter()
        .filter(|p| !known.contains(p.to_string_lossy().as_ref()))
        .filter_map(|p| scan::read_track(p))
        .collect();

    for track in new_tracks {
        info!(title = %track.title, "discovered new track");
        updated.push(track);
    }

    let duration = total_duration(&updated);
    Some((updated, duration))
}

/// Refresh every playlist in `user` against its source folder.
///
/// Run once at session start, before the registry takes ownership. Playlists
/// whose folder is missing are skipped for this cycle and left untouched, so
/// their persisted definition survives subsequent saves.
pub fn refresh_user(user: &mut User, settings: &LibrarySettings) {
    info!(
        username = %user.username,
        playlists = user.playlists.len(),
        "refreshing library"
    );

    for playlist in &mut user.playlists {
        match refresh(&playlist.tracks, Path::new(&playlist.folder_path), settings) {
            Some((tracks, duration)) => {
                playlist.tracks = tracks;
                playlist.duration_secs = duration;
            }
            None => {
                warn!(
                    title = %playlist.title,
                    folder = %playlist.folder_path,
                    "playlist folder is missing, skipping refresh"
                );
            }
        }
    }
}
