//! Persistence store for the per-user library document.
//!
//! One JSON document per username, pure load/save with no business rules.
//! Saves are atomic from the caller's point of view: the document is written
//! to a temporary sibling and renamed over the real file, so a partial write
//! is never observable.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::library::User;

const USER_FILE: &str = "user.json";
const USER_FILE_TMP: &str = "user.json.tmp";

pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn user_dir(&self, username: &str) -> PathBuf {
        self.data_dir.join(username)
    }

    /// Load a user's library document.
    ///
    /// An absent document is not an error: a fresh empty [`User`] is
    /// returned. A present but unreadable/corrupt document is.
    pub fn load(&self, username: &str) -> Result<User> {
        let path = self.user_dir(username).join(USER_FILE);

        if !path.is_file() {
            warn!(%username, "no library document yet, starting empty");
            return Ok(User::new(username));
        }

        let raw = fs::read_to_string(&path)?;
        let user: User = serde_json::from_str(&raw)?;
        info!(%username, playlists = user.playlists.len(), "loaded library document");
        Ok(user)
    }

    /// Write the full library document back to disk.
    pub fn save(&self, user: &User) -> Result<()> {
        let dir = self.user_dir(&user.username);
        fs::create_dir_all(&dir)?;

        let body = serde_json::to_string_pretty(user)?;
        let tmp = dir.join(USER_FILE_TMP);
        fs::write(&tmp, body)?;
        fs::rename(&tmp, dir.join(USER_FILE))?;

        info!(username = %user.username, "saved library document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Playlist, Track};
    use tempfile::tempdir;
    use uuid::Uuid;

    fn sample_user() -> User {
        let tracks = vec![
            Track {
                title: "One".into(),
                artist: "Somebody".into(),
                duration_secs: 181.5,
                file_path: "/music/road/one.mp3".into(),
            },
            Track {
                title: "Two".into(),
                artist: "Unknown".into(),
                duration_secs: 200.25,
                file_path: "/music/road/two.flac".into(),
            },
        ];
        let mut user = User::new("casey");
        user.playlists.push(Playlist {
            id: Uuid::new_v4(),
            title: "Road Trip".into(),
            duration_secs: 381.75,
            folder_path: "/music/road".into(),
            tracks,
        });
        user.recently_played_playlists.push("Road Trip".into());
        user
    }

    #[test]
    fn load_returns_empty_user_when_document_is_absent() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().to_path_buf());

        let user = store.load("nobody").unwrap();
        assert_eq!(user.username, "nobody");
        assert!(user.playlists.is_empty());
        assert!(user.recently_played_playlists.is_empty());
    }

    #[test]
    fn save_then_load_round_trips_all_fields() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().to_path_buf());

        let user = sample_user();
        store.save(&user).unwrap();

        let loaded = store.load("casey").unwrap();
        assert_eq!(loaded, user);
    }

    #[test]
    fn save_leaves_no_temporary_file_behind() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().to_path_buf());

        store.save(&sample_user()).unwrap();

        let user_dir = dir.path().join("casey");
        assert!(user_dir.join(USER_FILE).is_file());
        assert!(!user_dir.join(USER_FILE_TMP).exists());
    }

    #[test]
    fn load_rejects_corrupt_documents() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().to_path_buf());

        let user_dir = dir.path().join("casey");
        std::fs::create_dir_all(&user_dir).unwrap();
        std::fs::write(user_dir.join(USER_FILE), "{ not json").unwrap();

        assert!(store.load("casey").is_err());
    }

    #[test]
    fn documents_without_playlist_ids_still_load() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().to_path_buf());

        let user_dir = dir.path().join("casey");
        std::fs::create_dir_all(&user_dir).unwrap();
        std::fs::write(
            user_dir.join(USER_FILE),
            r#"{
                "username": "casey",
                "playlists": [
                    { "title": "Old", "duration_seconds": 0.0,
                      "folder_path": "/music/old", "tracks": [] }
                ],
                "recently_played_playlists": []
            }"#,
        )
        .unwrap();

        let user = store.load("casey").unwrap();
        assert_eq!(user.playlists.len(), 1);
        assert_eq!(user.playlists[0].title, "Old");
    }
}
