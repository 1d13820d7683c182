//! Persisted best scores (fewest moves to win) per difficulty.
//!
//! The score file is plain JSON, `{"easy": 12, "hard": null}`. Loading is
//! deliberately forgiving: a missing file, unreadable bytes or values of the
//! wrong type all degrade to "no best recorded". Saves happen on every
//! update and failures are logged and swallowed.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::deck::Difficulty;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct BestScores {
    easy: Option<u32>,
    hard: Option<u32>,
}

#[derive(Debug)]
pub struct ScoreBook {
    path: PathBuf,
    scores: BestScores,
}

impl ScoreBook {
    /// Loads the score book from `path`, degrading to empty on any problem.
    pub fn load(path: PathBuf) -> Self {
        let scores = match fs::read_to_string(&path) {
            Ok(raw) => parse_scores(&raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BestScores::default(),
            Err(err) => {
                warn!(path = %path.display(), %err, "could not read score file");
                BestScores::default()
            }
        };
        Self { path, scores }
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<u32> {
        match difficulty {
            Difficulty::Easy => self.scores.easy,
            Difficulty::Hard => self.scores.hard,
        }
    }

    /// Records a finished game. The best is replaced only when none exists
    /// yet or `moves` is strictly lower; ties never overwrite. Returns
    /// whether a new best was stored.
    pub fn record(&mut self, difficulty: Difficulty, moves: u32) -> bool {
        let slot = match difficulty {
            Difficulty::Easy => &mut self.scores.easy,
            Difficulty::Hard => &mut self.scores.hard,
        };
        match *slot {
            Some(best) if moves >= best => return false,
            _ => *slot = Some(moves),
        }
        debug!(%difficulty, moves, "new best score");
        self.save();
        true
    }

    fn save(&self) {
        let json = match serde_json::to_string_pretty(&self.scores) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, "could not serialize scores");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), %err, "could not create score directory");
                return;
            }
        }
        if let Err(err) = fs::write(&self.path, json) {
            warn!(path = %self.path.display(), %err, "could not write score file");
        }
    }
}

/// Parses a score file, treating malformed JSON as empty and non-number
/// values per difficulty as absent.
fn parse_scores(raw: &str) -> BestScores {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(%err, "score file is not valid JSON, starting fresh");
            return BestScores::default();
        }
    };
    let number = |key: &str| {
        value
            .get(key)
            .and_then(serde_json::Value::as_u64)
            .map(|n| n as u32)
    };
    BestScores {
        easy: number("easy"),
        hard: number("hard"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn book_in(dir: &tempfile::TempDir) -> ScoreBook {
        ScoreBook::load(dir.path().join("scores.json"))
    }

    #[test]
    fn missing_file_means_no_bests() {
        let dir = tempfile::tempdir().unwrap();
        let book = book_in(&dir);
        assert_eq!(book.best(Difficulty::Easy), None);
        assert_eq!(book.best(Difficulty::Hard), None);
    }

    #[test]
    fn lower_move_counts_overwrite_ties_do_not() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = book_in(&dir);

        assert!(book.record(Difficulty::Easy, 14));
        assert!(!book.record(Difficulty::Easy, 14));
        assert!(!book.record(Difficulty::Easy, 20));
        assert!(book.record(Difficulty::Easy, 9));
        assert_eq!(book.best(Difficulty::Easy), Some(9));
        // The other difficulty is untouched.
        assert_eq!(book.best(Difficulty::Hard), None);
    }

    #[test]
    fn bests_round_trip_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = book_in(&dir);
        book.record(Difficulty::Easy, 11);
        book.record(Difficulty::Hard, 30);

        let reloaded = book_in(&dir);
        assert_eq!(reloaded.best(Difficulty::Easy), Some(11));
        assert_eq!(reloaded.best(Difficulty::Hard), Some(30));
    }

    #[test]
    fn corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("scores.json"), b"not json {").unwrap();
        let book = book_in(&dir);
        assert_eq!(book.best(Difficulty::Easy), None);
        assert_eq!(book.best(Difficulty::Hard), None);
    }

    #[test]
    fn non_number_values_are_treated_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("scores.json"),
            br#"{"easy": "twelve", "hard": 18, "extra": true}"#,
        )
        .unwrap();
        let book = book_in(&dir);
        assert_eq!(book.best(Difficulty::Easy), None);
        assert_eq!(book.best(Difficulty::Hard), Some(18));
    }
}
