use std::fs;
use std::io::Cursor;
use std::path::Path;

use serde_json::Value;
use uuid::Uuid;

use crate::config::{LibrarySettings, PickerSettings};
use crate::error::EngineError;
use crate::player::{AudioEngine, Player};
use crate::registry::Registry;
use crate::store::Store;

use super::bridge::Bridge;
use super::picker;
use super::request::Request;
use super::serve;

/// Engine stand-in that accepts every file and tracks the playing flag.
#[derive(Default)]
struct SilentEngine {
    playing: bool,
}

impl AudioEngine for SilentEngine {
    fn load(&mut self, _path: &Path) -> Result<(), EngineError> {
        self.playing = false;
        Ok(())
    }
    fn play(&mut self) {
        self.playing = true;
    }
    fn pause(&mut self) {
        self.playing = false;
    }
    fn resume(&mut self) {
        self.playing = true;
    }
    fn stop(&mut self) {
        self.playing = false;
    }
    fn set_volume(&mut self, _volume: f32) {}
    fn position(&self) -> f64 {
        0.0
    }
    fn is_playing(&self) -> bool {
        self.playing
    }
}

// Minimal but valid PCM WAV so lofty can actually parse duration:
// 8 kHz mono 16-bit, `secs` seconds of silence.
fn write_wav(path: &Path, secs: f64) {
    const SAMPLE_RATE: u32 = 8000;
    let data_len = (secs * f64::from(SAMPLE_RATE)) as u32 * 2;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);

    fs::write(path, bytes).unwrap();
}

fn bridge_in(dir: &Path) -> Bridge {
    let store = Store::new(dir.to_path_buf());
    let user = store.load("casey").unwrap();
    let registry = Registry::new(user, store, LibrarySettings::default());
    let player = Player::new(Box::new(|| {
        Box::new(SilentEngine::default()) as Box<dyn AudioEngine>
    }));
    Bridge::new(registry, player, PickerSettings::default())
}

fn road_trip_folder(dir: &Path) -> String {
    let folder = dir.join("road-trip");
    fs::create_dir_all(&folder).unwrap();
    write_wav(&folder.join("01 - Opening.wav"), 0.5);
    write_wav(&folder.join("02 - Highway.wav"), 0.25);
    write_wav(&folder.join("03 - Sunset.wav"), 0.75);
    fs::write(folder.join("liner-notes.txt"), b"not audio").unwrap();
    folder.to_string_lossy().into_owned()
}

#[test]
fn requests_parse_from_op_tagged_json() {
    let req: Request =
        serde_json::from_str(r#"{"op": "create_playlist", "title": "X", "folder_path": "/m"}"#)
            .unwrap();
    assert!(matches!(req, Request::CreatePlaylist { .. }));

    let id = Uuid::new_v4();
    let raw = format!(
        r#"{{"op": "move_track", "playlist_id": "{id}", "from_index": 0, "to_index": 2}}"#
    );
    let req: Request = serde_json::from_str(&raw).unwrap();
    match req {
        Request::MoveTrack {
            playlist_id,
            from_index,
            to_index,
        } => {
            assert_eq!(playlist_id, id);
            assert_eq!((from_index, to_index), (0, 2));
        }
        other => panic!("parsed wrong variant: {other:?}"),
    }

    assert!(serde_json::from_str::<Request>(r#"{"op": "no_such_op"}"#).is_err());
}

#[test]
fn road_trip_scenario_creates_one_playlist_with_three_tracks() {
    let dir = tempfile::tempdir().unwrap();
    let folder = road_trip_folder(dir.path());
    let mut bridge = bridge_in(dir.path());

    assert!(bridge.create_playlist("Road Trip", &folder));

    let data = bridge.get_user_data();
    let playlists = data["playlists"].as_array().unwrap();
    assert_eq!(playlists.len(), 1);
    assert_eq!(playlists[0]["title"], "Road Trip");

    let tracks = playlists[0]["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 3);

    let sum: f64 = tracks
        .iter()
        .map(|t| t["duration_seconds"].as_f64().unwrap())
        .sum();
    assert!((playlists[0]["duration_seconds"].as_f64().unwrap() - sum).abs() < 1e-9);
}

#[test]
fn play_playlist_with_no_tracks_returns_false_and_stays_empty() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty");
    fs::create_dir_all(&empty).unwrap();
    let mut bridge = bridge_in(dir.path());

    assert!(bridge.create_playlist("Nothing", empty.to_str().unwrap()));
    let id = bridge.registry().user().playlists[0].id;

    assert!(!bridge.play_playlist(id));
    assert_eq!(bridge.get_current_track_info(), serde_json::json!({}));
    assert!(!bridge.is_playing());
}

#[test]
fn playback_survives_removal_of_the_loaded_playlist() {
    let dir = tempfile::tempdir().unwrap();
    let folder = road_trip_folder(dir.path());
    let mut bridge = bridge_in(dir.path());

    bridge.create_playlist("Road Trip", &folder);
    let id = bridge.registry().user().playlists[0].id;

    assert!(bridge.play_playlist(id));
    assert!(bridge.is_playing());

    // The player holds a detached snapshot; deleting the playlist from the
    // library must not dangle the current track.
    assert!(bridge.remove_playlist(id));
    let info = bridge.get_current_track_info();
    assert_eq!(info["current_index"], 0);
    assert!(info["title"].as_str().is_some());
}

#[test]
fn next_track_reissues_play_and_stops_at_the_last_track() {
    let dir = tempfile::tempdir().unwrap();
    let folder = road_trip_folder(dir.path());
    let mut bridge = bridge_in(dir.path());

    bridge.create_playlist("Road Trip", &folder);
    let id = bridge.registry().user().playlists[0].id;
    assert!(bridge.play_playlist(id));

    assert!(bridge.next_track());
    assert!(bridge.is_playing());
    assert!(bridge.next_track());
    assert!(!bridge.next_track());
    assert_eq!(bridge.get_current_track_info()["current_index"], 2);

    assert!(bridge.prev_track());
    assert!(bridge.prev_track());
    assert!(!bridge.prev_track());
    assert_eq!(bridge.get_current_track_info()["current_index"], 0);
}

#[test]
fn serve_answers_each_line_and_survives_malformed_requests() {
    let dir = tempfile::tempdir().unwrap();
    let folder = road_trip_folder(dir.path());
    let mut bridge = bridge_in(dir.path());

    let input = format!(
        "this is not json\n\
         {{\"op\": \"create_playlist\", \"title\": \"Road Trip\", \"folder_path\": {}}}\n\
         \n\
         {{\"op\": \"is_playing\"}}\n\
         {{\"op\": \"get_user_data\"}}\n",
        serde_json::to_string(&folder).unwrap()
    );

    let mut output = Vec::new();
    serve(Cursor::new(input), &mut output, &mut bridge).unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0]["error"].as_str().is_some());
    assert_eq!(lines[1], Value::Bool(true));
    assert_eq!(lines[2], Value::Bool(false));
    assert_eq!(lines[3]["playlists"].as_array().unwrap().len(), 1);
}

#[test]
fn picker_reads_the_selected_path_from_stdout() {
    let settings = PickerSettings {
        command: vec!["echo".into(), "/music/chosen".into()],
    };
    assert_eq!(picker::pick_folder(&settings), Some("/music/chosen".into()));

    let cancelled = PickerSettings {
        command: vec!["echo".into(), "".into()],
    };
    assert_eq!(picker::pick_folder(&cancelled), None);

    let missing = PickerSettings {
        command: vec!["attacca-no-such-dialog".into()],
    };
    assert_eq!(picker::pick_folder(&missing), None);
}
