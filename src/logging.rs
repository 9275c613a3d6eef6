//! Tracing subscriber setup
use crate::config::LogConfig;
use crate::consts;
use anyhow::Context;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log records go
#[derive(Clone, Debug, Eq, PartialEq)]
enum LogTarget {
    /// Nowhere; no subscriber is installed
    Off,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// The interactive game owns the terminal, so it only logs to a file,
    /// named by `env_file` or else by the configuration
    fn choose(config: &LogConfig, headless: bool, env_file: Option<OsString>) -> LogTarget {
        if headless {
            LogTarget::Stderr
        } else if let Some(path) = env_file.filter(|p| !p.is_empty()) {
            LogTarget::File(PathBuf::from(path))
        } else if let Some(ref path) = config.file {
            LogTarget::File(path.clone())
        } else {
            LogTarget::Off
        }
    }
}

/// Install the global tracing subscriber.  `RUST_LOG` takes precedence over
/// the configured filter.
pub(crate) fn init(config: &LogConfig, headless: bool) -> anyhow::Result<()> {
    let target = LogTarget::choose(config, headless, std::env::var_os(consts::LOG_FILE_ENV));
    if target == LogTarget::Off {
        return Ok(());
    }
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .with_context(|| format!("invalid log filter {:?}", config.filter))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let r = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = fs_err::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context("failed to open log file")?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    r.map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(file: Option<&str>) -> LogConfig {
        LogConfig {
            file: file.map(PathBuf::from),
            ..LogConfig::default()
        }
    }

    #[test]
    fn headless_logs_to_stderr() {
        assert_eq!(
            LogTarget::choose(&config(Some("game.log")), true, None),
            LogTarget::Stderr
        );
    }

    #[test]
    fn interactive_without_file_is_silent() {
        assert_eq!(LogTarget::choose(&config(None), false, None), LogTarget::Off);
        assert_eq!(
            LogTarget::choose(&config(None), false, Some(OsString::new())),
            LogTarget::Off
        );
    }

    #[test]
    fn environment_beats_config() {
        assert_eq!(
            LogTarget::choose(
                &config(Some("config.log")),
                false,
                Some(OsString::from("env.log"))
            ),
            LogTarget::File(PathBuf::from("env.log"))
        );
        assert_eq!(
            LogTarget::choose(&config(Some("config.log")), false, None),
            LogTarget::File(PathBuf::from("config.log"))
        );
    }
}
