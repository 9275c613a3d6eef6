use crate::consts;
use crate::engine::{EventSink, GameEvent};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// High scores keyed by program version
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct HighScores(BTreeMap<String, u32>);

impl HighScores {
    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }

    /// Read high scores from `path`.  A missing file means no high scores.
    pub(crate) fn load(path: &Path) -> Result<HighScores, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HighScores::default()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    pub(crate) fn get(&self, key: &str) -> u32 {
        self.0.get(key).copied().unwrap_or_default()
    }

    /// Record `score` under `key` if it beats the stored score.  Returns
    /// `true` if it did.
    pub(crate) fn record(&mut self, key: &str, score: u32) -> bool {
        if score > self.get(key) {
            self.0.insert(key.to_owned(), score);
            true
        } else {
            false
        }
    }
}

/// The key for this version of the program
pub(crate) fn version_key() -> String {
    format!("{}{}", consts::HIGH_SCORE_KEY_PREFIX, env!("CARGO_PKG_VERSION"))
}

/// The high score for the running version, backed by an optional file.
///
/// Failures to read or write the file are logged and otherwise ignored; the
/// game goes on with whatever is in memory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreBoard {
    scores: HighScores,
    key: String,
    path: Option<PathBuf>,
}

impl HighScoreBoard {
    pub(crate) fn new(path: Option<PathBuf>) -> HighScoreBoard {
        let mut board = HighScoreBoard {
            scores: HighScores::default(),
            key: version_key(),
            path,
        };
        board.reload();
        board
    }

    /// Re-read the file, as happens at the start of every game
    pub(crate) fn reload(&mut self) {
        let Some(path) = self.path.as_deref() else {
            return;
        };
        match HighScores::load(path) {
            Ok(scores) => self.scores = scores,
            Err(e) => tracing::warn!(error = %e, path = %path.display(), "Could not load high scores"),
        }
    }

    pub(crate) fn best(&self) -> u32 {
        self.scores.get(&self.key)
    }

    /// Record a finished game's score, saving if it is a new best
    pub(crate) fn submit(&mut self, score: u32) {
        if !self.scores.record(&self.key, score) {
            return;
        }
        tracing::info!(score, "New high score");
        if let Some(path) = self.path.as_deref() {
            if let Err(e) = self.scores.save(path) {
                tracing::warn!(error = %e, path = %path.display(), "Could not save high scores");
            }
        }
    }
}

impl EventSink for HighScoreBoard {
    fn handle(&mut self, event: &GameEvent) {
        if let GameEvent::GameOver { score, .. } = *event {
            self.submit(score);
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high scores to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high scores to disk")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high scores from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high scores")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GameOverCause;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_only_improvements() {
        let mut scores = HighScores::default();
        assert_eq!(scores.get("v1"), 0);
        assert!(!scores.record("v1", 0));
        assert!(scores.record("v1", 7));
        assert!(!scores.record("v1", 7));
        assert!(!scores.record("v1", 3));
        assert!(scores.record("v2", 1));
        assert_eq!(scores.get("v1"), 7);
        assert_eq!(scores.get("v2"), 1);
    }

    #[test]
    fn json_format() {
        let mut scores = HighScores::default();
        scores.record("snakeHighScore_v2.7", 12);
        assert_eq!(
            serde_json::to_string(&scores).expect("serialization should succeed"),
            r#"{"snakeHighScore_v2.7":12}"#
        );
    }

    #[test]
    fn save_and_load() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a temp dir");
        let path = tmpdir.path().join("nested").join("highscores.json");
        assert_eq!(
            HighScores::load(&path).expect("missing file should load as empty"),
            HighScores::default()
        );
        let mut scores = HighScores::default();
        scores.record("a", 3);
        scores.save(&path).expect("save should succeed");
        assert_eq!(
            HighScores::load(&path).expect("load should succeed"),
            scores
        );
    }

    #[test]
    fn load_garbage() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a temp dir");
        let path = tmpdir.path().join("highscores.json");
        fs_err::write(&path, "not json").expect("write should succeed");
        assert!(HighScores::load(&path).is_err());
    }

    #[test]
    fn board_submits_on_game_over() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a temp dir");
        let path = tmpdir.path().join("highscores.json");
        let mut board = HighScoreBoard::new(Some(path.clone()));
        assert_eq!(board.best(), 0);
        board.handle(&GameEvent::FoodEaten { score: 9, level: 2 });
        assert_eq!(board.best(), 0);
        board.handle(&GameEvent::GameOver {
            score: 9,
            cause: GameOverCause::Wall,
        });
        assert_eq!(board.best(), 9);
        board.handle(&GameEvent::GameOver {
            score: 4,
            cause: GameOverCause::SelfCollision,
        });
        assert_eq!(board.best(), 9);
        let reopened = HighScoreBoard::new(Some(path));
        assert_eq!(reopened.best(), 9);
    }

    #[test]
    fn board_without_file() {
        let mut board = HighScoreBoard::new(None);
        board.submit(5);
        assert_eq!(board.best(), 5);
        board.reload();
        assert_eq!(board.best(), 5);
    }

    #[test]
    fn key_carries_version() {
        assert!(version_key().starts_with("snakeHighScore_v"));
        assert!(version_key().ends_with(env!("CARGO_PKG_VERSION")));
    }
}
