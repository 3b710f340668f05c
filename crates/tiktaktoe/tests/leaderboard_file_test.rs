//! Tests for reading and writing the leaderboard JSON file.

use std::collections::HashMap;
use std::fs;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use tiktaktoe::{DriverConfig, Leaderboard};
use tiktaktoe_core::PlayerRecord;

fn records(pairs: &[(&str, u32, u32, u32)]) -> HashMap<String, PlayerRecord> {
    pairs
        .iter()
        .map(|(n, w, l, t)| (n.to_string(), PlayerRecord::new(*w, *l, *t)))
        .collect()
}

#[test]
fn test_missing_file_is_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let board = Leaderboard::load(dir.path().join("leaderboard.json")).expect("Load failed");
    assert!(board.is_empty());
    assert_eq!(board.render_top(5), "No games recorded yet");
}

#[test]
fn test_save_then_reload() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("leaderboard.json");

    let mut board = Leaderboard::empty(&path);
    let played = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    board.merge_session_at(&records(&[("ann", 2, 1, 0), ("MediumAi", 1, 2, 0)]), played);
    board.save().expect("Save failed");

    let reloaded = Leaderboard::load(&path).expect("Reload failed");
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.record("ann"), Some(&PlayerRecord::new(2, 1, 0)));
    assert_eq!(*reloaded.entry("MediumAi").unwrap().last_played(), Some(played));
}

#[test]
fn test_sessions_accumulate_across_saves() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("leaderboard.json");

    for _ in 0..3 {
        let mut board = Leaderboard::load(&path).expect("Load failed");
        board.merge_session(&records(&[("ann", 1, 0, 1), ("bob", 0, 1, 1)]));
        board.save().expect("Save failed");
    }

    let board = Leaderboard::load(&path).expect("Load failed");
    assert_eq!(board.record("ann"), Some(&PlayerRecord::new(3, 0, 3)));
    assert_eq!(board.record("bob"), Some(&PlayerRecord::new(0, 3, 3)));
    assert_eq!(
        board.render_top(1),
        "1. ann\n   Wins: 3 Losses: 0 Ties: 3"
    );
}

#[test]
fn test_reads_file_without_timestamps() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("leaderboard.json");
    fs::write(
        &path,
        r#"[{"username":"ann","wins":4,"loss":1,"tie":2},{"username":"EasyAi","wins":1,"loss":4,"tie":2}]"#,
    )
    .expect("Failed to write leaderboard");

    let board = Leaderboard::load(&path).expect("Load failed");
    let names: Vec<&str> = board.top(5).iter().map(|e| e.username().as_str()).collect();
    assert_eq!(names, ["ann", "EasyAi"]);
    assert!(board.entry("ann").unwrap().last_played().is_none());
}

#[test]
fn test_duplicate_entries_combined() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("leaderboard.json");
    fs::write(
        &path,
        r#"[{"username":"ann","wins":1,"loss":0,"tie":0},{"username":"ann","wins":2,"loss":1,"tie":0}]"#,
    )
    .expect("Failed to write leaderboard");

    let board = Leaderboard::load(&path).expect("Load failed");
    assert_eq!(board.len(), 1);
    assert_eq!(board.record("ann"), Some(&PlayerRecord::new(3, 1, 0)));
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("leaderboard.json");
    fs::write(&path, "{not json").expect("Failed to write leaderboard");

    let err = Leaderboard::load(&path).unwrap_err();
    assert!(err.message.contains("JSON"));
}

#[test]
fn test_config_file_points_at_leaderboard() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = dir.path().join("tiktaktoe.toml");
    let board_path = dir.path().join("scores.json");
    fs::write(
        &config_path,
        format!(
            "leaderboard_path = {:?}\nleaderboard_size = 3\n",
            board_path.display().to_string()
        ),
    )
    .expect("Failed to write config");

    let config = DriverConfig::load_or_default(&config_path).expect("Config failed");
    assert_eq!(config.leaderboard_path(), &board_path);
    assert_eq!(*config.leaderboard_size(), 3);
}

#[test]
fn test_back_up_moves_file_aside() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("leaderboard.json");
    fs::write(&path, "{not json").expect("Failed to write leaderboard");

    let backup = Leaderboard::back_up(&path).expect("Backup failed");
    assert_eq!(backup, dir.path().join("leaderboard.json.bak"));
    assert!(!path.exists());
    assert_eq!(fs::read_to_string(&backup).expect("Read failed"), "{not json");
    assert!(Leaderboard::load(&path).expect("Load failed").is_empty());
}
