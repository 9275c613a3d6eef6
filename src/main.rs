mod app;
mod autopilot;
mod command;
mod config;
mod consts;
mod engine;
mod game;
mod headless;
mod highscores;
mod logging;
mod options;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::options::GridSize;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use lexopt::{Arg, Parser, ValueExt};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
Usage: autosnake [<options>]

Play Snake in the terminal, or let the autopilot play it

Options:
  -c, --config <PATH>  Read configuration from the given file
      --size <N>       Use an N-by-N grid (4 to 19)
      --walls          Start with walls on
      --autopilot      Start with the autopilot steering
      --seed <N>       Seed the random number generator
      --headless       Let the autopilot play one game without a terminal
                       interface and print a JSON summary
      --ticks <N>      Stop a headless game after N ticks
  -h, --help           Display this help message and exit
  -V, --version        Show the program version and exit
";

/// What the command line asks for
#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("size") => args.size = Some(parser.value()?.parse()?),
                Arg::Long("walls") => args.walls = true,
                Arg::Long("autopilot") => args.autopilot = true,
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Long("headless") => args.headless = true,
                Arg::Long("ticks") => args.ticks = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    size: Option<GridSize>,
    walls: bool,
    autopilot: bool,
    seed: Option<u64>,
    headless: bool,
    ticks: Option<u64>,
}

impl Arguments {
    /// Read the configuration file and apply the command-line overrides
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path, false).with_context(|| {
                format!("failed to load configuration from {}", path.display())
            })?,
            None => match Config::default_path() {
                Ok(path) => Config::load(&path, true).with_context(|| {
                    format!("failed to load configuration from {}", path.display())
                })?,
                Err(_) => Config::default(),
            },
        };
        if let Some(size) = self.size {
            config.options.grid_size = size;
        }
        config.options.walls |= self.walls;
        config.options.autopilot |= self.autopilot;
        Ok(config)
    }

    fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        logging::init(&config.logging, self.headless)?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        if self.headless {
            let ticks = self.ticks.unwrap_or(consts::DEFAULT_HEADLESS_TICKS);
            let summary = headless::run(config.options, rng, ticks);
            let src = serde_json::to_string_pretty(&summary)?;
            writeln!(io::stdout().lock(), "{src}")?;
            Ok(())
        } else {
            let terminal = ratatui::init();
            let r = crossterm::execute!(io::stdout(), EnableFocusChange)
                .and_then(|()| App::new(&config, rng).run(terminal));
            let _ = crossterm::execute!(io::stdout(), DisableFocusChange);
            ratatui::restore();
            r.map_err(Into::into)
        }
    }
}

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => exit(args.run()),
        Ok(Invocation::Help) => exit(write_stdout(HELP)),
        Ok(Invocation::Version) => exit(write_stdout(&format!(
            "autosnake {}\n",
            env!("CARGO_PKG_VERSION")
        ))),
        Err(e) => {
            eprintln!("autosnake: {e}");
            ExitCode::from(2)
        }
    }
}

fn write_stdout(s: &str) -> anyhow::Result<()> {
    io::stdout().lock().write_all(s.as_bytes())?;
    Ok(())
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("autosnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Invocation, lexopt::Error> {
        Invocation::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn no_arguments() {
        assert_eq!(
            parse(&[]).expect("empty command line should parse"),
            Invocation::Run(Arguments::default())
        );
    }

    #[test]
    fn all_options() {
        let invocation = parse(&[
            "--config",
            "snake.toml",
            "--size",
            "12",
            "--walls",
            "--autopilot",
            "--seed",
            "42",
            "--headless",
            "--ticks",
            "500",
        ])
        .expect("command line should parse");
        assert_eq!(
            invocation,
            Invocation::Run(Arguments {
                config: Some(PathBuf::from("snake.toml")),
                size: Some(GridSize::new(12).expect("12 is a valid grid size")),
                walls: true,
                autopilot: true,
                seed: Some(42),
                headless: true,
                ticks: Some(500),
            })
        );
    }

    #[rstest]
    #[case(&["-h"], Invocation::Help)]
    #[case(&["--help"], Invocation::Help)]
    #[case(&["--walls", "--help"], Invocation::Help)]
    #[case(&["-V"], Invocation::Version)]
    #[case(&["--version"], Invocation::Version)]
    fn help_and_version(#[case] args: &[&str], #[case] expected: Invocation) {
        assert_eq!(parse(args).expect("command line should parse"), expected);
    }

    #[rstest]
    #[case(&["--size", "3"])]
    #[case(&["--size", "20"])]
    #[case(&["--size", "big"])]
    #[case(&["--seed", "-1"])]
    #[case(&["--ticks"])]
    #[case(&["--bogus"])]
    #[case(&["extra"])]
    fn bad_arguments(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }

    #[test]
    fn overrides_apply_to_config() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a temp dir");
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[options]\ngrid-size = 8\nwalls = false\n")
            .expect("should write config file");
        let args = Arguments {
            config: Some(path),
            size: Some(GridSize::new(10).expect("10 is a valid grid size")),
            walls: true,
            ..Arguments::default()
        };
        let config = args.load_config().expect("config should load");
        assert_eq!(config.options.grid_size.get(), 10);
        assert!(config.options.walls);
        assert!(!config.options.autopilot);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let tmpdir = tempfile::tempdir().expect("should be able to create a temp dir");
        let args = Arguments {
            config: Some(tmpdir.path().join("nope.toml")),
            ..Arguments::default()
        };
        assert!(args.load_config().is_err());
    }
}
