use std::path::{Path, PathBuf};

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Track;

/// Artist recorded when a file carries no artist tag.
const UNKNOWN_ARTIST: &str = "Unknown";

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// List the supported audio files directly inside `folder`.
///
/// Only the folder's own entries are considered (no recursion), and the
/// result is sorted by path so repeated scans of an unchanged folder produce
/// identical sequences regardless of directory-iteration order.
pub fn audio_files(folder: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p, settings))
        .collect();

    files.sort();
    files
}

/// Read one file's tags into a [`Track`].
///
/// Missing tag fields fall back to the file stem / [`UNKNOWN_ARTIST`]. A file
/// whose tag data cannot be read at all is skipped: the failure is logged and
/// `None` is returned so the surrounding scan still succeeds.
pub fn read_track(path: &Path) -> Option<Track> {
    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            warn!(file = %path.display(), "skipping file, unreadable metadata: {e}");
            return None;
        }
    };

    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist = UNKNOWN_ARTIST.to_string();
    let duration_secs = tagged.properties().duration().as_secs_f64();

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
            if !v.trim().is_empty() {
                title = v.trim().to_string();
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
            if !v.trim().is_empty() {
                artist = v.trim().to_string();
            }
        }
    }

    Some(Track {
        title,
        artist,
        duration_secs,
        file_path: path.to_string_lossy().into_owned(),
    })
}

/// Scan `folder` into a fresh track list.
///
/// Unsupported and unreadable files are skipped; a folder with zero supported
/// files yields a valid empty list, not an error.
pub fn build_tracks(folder: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let files = audio_files(folder, settings);
    debug!(folder = %folder.display(), files = files.len(), "scanning folder");

    files.iter().filter_map(|p| read_track(p)).collect()
}
