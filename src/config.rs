use crate::options::Options;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Options for new games, before command-line overrides
    #[serde(default)]
    pub(crate) options: Options,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    #[serde(default)]
    pub(crate) logging: LogConfig,

    #[serde(default)]
    pub(crate) feedback: FeedbackConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("autosnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which high scores should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// scores file path.  Return `None` if saving is turned off or if no
    /// path is configured and the default path could not be computed.
    pub(crate) fn high_scores_file(&self) -> Option<Cow<'_, Path>> {
        if !self.files.save_high_scores {
            return None;
        }
        self.files
            .high_scores_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| {
                dirs::data_local_dir()
                    .map(|p| Cow::from(p.join("autosnake").join("highscores.json")))
            })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    pub(crate) high_scores_file: Option<PathBuf>,

    /// Whether to load & save high scores at all
    pub(crate) save_high_scores: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_scores_file: None,
            save_high_scores: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    /// File to append log records to.  Without one (and without
    /// `AUTOSNAKE_LOG` in the environment), the interactive game does not log.
    pub(crate) file: Option<PathBuf>,

    /// Filter directives used when `RUST_LOG` is not set
    pub(crate) filter: String,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            filter: String::from("info"),
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FeedbackConfig {
    /// Ring the terminal bell on food, game over, mode toggles and pausing
    pub(crate) bell: bool,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
