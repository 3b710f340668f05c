//! All-time leaderboard persisted as a JSON array.
//!
//! The file is a list of objects with `username`, `wins`, `loss`, `tie`
//! and an optional RFC 3339 `last_played` timestamp. The whole file is read
//! at load time and rewritten on save.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tiktaktoe_core::PlayerRecord;
use tracing::{debug, info, instrument, warn};

/// Leaderboard error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Leaderboard error: {} at {}:{}", message, file, line)]
pub struct LeaderboardError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LeaderboardError {
    /// Creates a new leaderboard error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for LeaderboardError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for LeaderboardError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

/// One player's all-time record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct LeaderboardEntry {
    username: String,
    #[serde(flatten)]
    record: PlayerRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_played: Option<DateTime<Utc>>,
}

/// All-time records keyed by username.
#[derive(Debug, Clone, Getters)]
pub struct Leaderboard {
    path: PathBuf,
    #[getter(skip)]
    entries: BTreeMap<String, LeaderboardEntry>,
}

impl Leaderboard {
    /// Creates an empty leaderboard that will be saved to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Reads the leaderboard file. A missing file is an empty leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] if the file cannot be read or is not a
    /// valid leaderboard.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LeaderboardError> {
        let path = path.as_ref();
        let mut board = Self::empty(path);
        if !path.exists() {
            info!("No leaderboard file yet, starting empty");
            return Ok(board);
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            warn!("Leaderboard file is blank, starting empty");
            return Ok(board);
        }
        let entries: Vec<LeaderboardEntry> = serde_json::from_str(&content)?;

        for entry in entries {
            match board.entries.get_mut(&entry.username) {
                Some(existing) => {
                    warn!(username = %entry.username, "Duplicate leaderboard entry, combining");
                    existing.record.absorb(&entry.record);
                    existing.last_played = existing.last_played.max(entry.last_played);
                }
                None => {
                    board.entries.insert(entry.username.clone(), entry);
                }
            }
        }

        info!(players = board.entries.len(), "Leaderboard loaded");
        Ok(board)
    }

    /// Moves an unreadable leaderboard file aside to `<path>.bak` and
    /// returns the backup path.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] if the file cannot be renamed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn back_up(path: impl AsRef<Path>) -> Result<PathBuf, LeaderboardError> {
        let path = path.as_ref();
        let mut backup = path.as_os_str().to_owned();
        backup.push(".bak");
        let backup = PathBuf::from(backup);
        std::fs::rename(path, &backup)?;
        warn!(backup = %backup.display(), "Unreadable leaderboard moved aside");
        Ok(backup)
    }

    /// Adds a finished session's records, inserting new players.
    #[instrument(skip(self, records), fields(players = records.len()))]
    pub fn merge_session(&mut self, records: &HashMap<String, PlayerRecord>) {
        self.merge_session_at(records, Utc::now());
    }

    /// Same as [`Leaderboard::merge_session`] with an explicit timestamp.
    pub fn merge_session_at(
        &mut self,
        records: &HashMap<String, PlayerRecord>,
        played_at: DateTime<Utc>,
    ) {
        for (username, record) in records {
            debug!(username = %username, ?record, "Merging session record");
            let entry = self
                .entries
                .entry(username.clone())
                .or_insert_with(|| LeaderboardEntry::new(username.clone(), PlayerRecord::default(), None));
            entry.record.absorb(record);
            entry.last_played = Some(played_at);
        }
    }

    /// Overwrites the file with the full leaderboard, ordered by username.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] if the directory or file cannot be written.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<(), LeaderboardError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let entries: Vec<&LeaderboardEntry> = self.entries.values().collect();
        let json = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, json)?;
        info!(players = entries.len(), "Leaderboard saved");
        Ok(())
    }

    /// The `n` players with the most wins, ties broken by username.
    pub fn top(&self, n: usize) -> Vec<&LeaderboardEntry> {
        let mut ranked: Vec<&LeaderboardEntry> = self.entries.values().collect();
        // BTreeMap order is by username, so a stable sort keeps it for equal wins.
        ranked.sort_by(|a, b| b.record.wins().cmp(a.record.wins()));
        ranked.truncate(n);
        ranked
    }

    /// Formats the top `n` entries as numbered lines.
    pub fn render_top(&self, n: usize) -> String {
        let top = self.top(n);
        if top.is_empty() {
            return "No games recorded yet".to_string();
        }
        top.iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "{}. {}\n   Wins: {} Losses: {} Ties: {}",
                    i + 1,
                    e.username,
                    e.record.wins(),
                    e.record.losses(),
                    e.record.ties()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All-time record of one player.
    pub fn record(&self, username: &str) -> Option<&PlayerRecord> {
        self.entries.get(username).map(|e| &e.record)
    }

    /// Entry of one player.
    pub fn entry(&self, username: &str) -> Option<&LeaderboardEntry> {
        self.entries.get(username)
    }

    /// Number of players on the leaderboard.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nobody has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
