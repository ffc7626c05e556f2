use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MAX_HIGH_SCORES;

const APP_DIR_NAME: &str = "snake-sim";
const SCORE_FILE_NAME: &str = "scores.json";

/// One finished game, as handed to the persistence sink.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u32,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
}

impl ScoreRecord {
    /// Stamps `score` with the current wall-clock time.
    #[must_use]
    pub fn now(score: u32) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        Self { score, timestamp }
    }
}

/// Best scores, highest first, capped at [`MAX_HIGH_SCORES`].
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<ScoreRecord>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a finished game and returns its 1-based rank.
    ///
    /// Equal scores keep their arrival order. Returns `None` when the record
    /// falls off the end of a full board.
    pub fn record(&mut self, record: ScoreRecord) -> Option<usize> {
        let index = self
            .entries
            .iter()
            .position(|entry| record.score > entry.score)
            .unwrap_or(self.entries.len());
        if index >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(index, record);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    /// Returns the entries, best first.
    #[must_use]
    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    /// Returns the best recorded score, or zero on an empty board.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.entries.first().map_or(0, |entry| entry.score)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads a leaderboard from `path`.
    ///
    /// A missing file is a first run and yields an empty board. A file that
    /// exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ScoreError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(ScoreError::Read(e)),
        };

        let mut board: Self = serde_json::from_str(&raw).map_err(ScoreError::Parse)?;
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));
        board.entries.truncate(MAX_HIGH_SCORES);
        Ok(board)
    }

    /// Saves the leaderboard to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ScoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(ScoreError::Write)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(ScoreError::Serialize)?;
        fs::write(path, json).map_err(ScoreError::Write)
    }
}

/// Returns the platform-correct leaderboard path.
pub fn scores_path() -> Result<PathBuf, ScoreError> {
    let mut base = dirs::data_local_dir().ok_or(ScoreError::NoPath)?;
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    Ok(base)
}

/// Persistence sink for finished games.
///
/// Without a path the board lives in memory only.
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    path: Option<PathBuf>,
    board: Leaderboard,
}

impl ScoreStore {
    /// Opens the store at `path`, loading whatever is already there.
    pub fn open(path: PathBuf) -> Result<Self, ScoreError> {
        let board = Leaderboard::load(&path)?;
        log::info!(
            "loaded {} high scores from {}",
            board.entries().len(),
            path.display()
        );
        Ok(Self {
            path: Some(path),
            board,
        })
    }

    /// Opens an empty store that will write to `path`.
    ///
    /// Used when the existing file is unreadable, so a broken file is replaced
    /// by the next save rather than blocking play.
    #[must_use]
    pub fn empty(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            board: Leaderboard::new(),
        }
    }

    /// Creates a store that never touches the disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.board
    }

    /// Records a finished game and writes the board to disk.
    ///
    /// The in-memory board is updated even when the write fails.
    pub fn submit(&mut self, record: ScoreRecord) -> Result<Option<usize>, ScoreError> {
        let rank = self.board.record(record);
        if let (Some(_), Some(path)) = (rank, &self.path) {
            self.board.save(path)?;
        }
        Ok(rank)
    }
}

/// Failures of the leaderboard store.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read high scores file")]
    Read(#[source] io::Error),
    #[error("failed to parse high scores file")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores file")]
    Write(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{Leaderboard, ScoreError, ScoreRecord, ScoreStore};
    use crate::config::MAX_HIGH_SCORES;

    fn record(score: u32, timestamp: u64) -> ScoreRecord {
        ScoreRecord { score, timestamp }
    }

    #[test]
    fn records_are_sorted_best_first() {
        let mut board = Leaderboard::new();

        assert_eq!(board.record(record(3, 1)), Some(1));
        assert_eq!(board.record(record(7, 2)), Some(1));
        assert_eq!(board.record(record(5, 3)), Some(2));

        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![7, 5, 3]);
        assert_eq!(board.high_score(), 7);
    }

    #[test]
    fn ties_keep_arrival_order() {
        let mut board = Leaderboard::new();
        board.record(record(4, 1));

        assert_eq!(board.record(record(4, 2)), Some(2));
        assert_eq!(board.entries()[0].timestamp, 1);
        assert_eq!(board.entries()[1].timestamp, 2);
    }

    #[test]
    fn zero_scores_are_kept_while_there_is_room() {
        let mut board = Leaderboard::new();

        assert_eq!(board.record(record(0, 1)), Some(1));
        assert_eq!(board.high_score(), 0);
        assert!(!board.is_empty());
    }

    #[test]
    fn board_is_capped() {
        let mut board = Leaderboard::new();
        for score in 1..=u32::try_from(MAX_HIGH_SCORES).expect("small constant") {
            board.record(record(score, u64::from(score)));
        }

        assert_eq!(board.record(record(0, 99)), None);
        assert_eq!(board.record(record(1, 100)), None);
        assert_eq!(board.record(record(50, 101)), Some(1));
        assert_eq!(board.entries().len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries().last().map(|e| e.score), Some(2));
    }

    #[test]
    fn leaderboard_round_trips_through_disk() {
        let path = unique_test_path("round_trip");
        let mut board = Leaderboard::new();
        board.record(record(12, 1_700_000_000));
        board.record(record(3, 1_700_000_100));

        board.save(&path).expect("save should succeed");
        let loaded = Leaderboard::load(&path).expect("load should succeed");

        assert_eq!(loaded, board);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_file_loads_empty_board() {
        let path = unique_test_path("missing");

        let loaded = Leaderboard::load(&path).expect("missing file should load as empty");

        assert!(loaded.is_empty());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(matches!(
            Leaderboard::load(&path),
            Err(ScoreError::Parse(_))
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn store_persists_each_submission() {
        let path = unique_test_path("store");
        let mut store = ScoreStore::open(path.clone()).expect("fresh store should open");

        let rank = store
            .submit(record(9, 5))
            .expect("submit should write the board");

        assert_eq!(rank, Some(1));
        let reopened = ScoreStore::open(path.clone()).expect("store should reopen");
        assert_eq!(reopened.leaderboard().high_score(), 9);
        cleanup_test_path(&path);
    }

    #[test]
    fn in_memory_store_keeps_scores_without_disk() {
        let mut store = ScoreStore::in_memory();

        assert_eq!(store.submit(record(2, 1)).ok(), Some(Some(1)));
        assert_eq!(store.submit(record(6, 2)).ok(), Some(Some(1)));
        assert_eq!(store.leaderboard().high_score(), 6);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("snake-sim-score-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &Path) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
