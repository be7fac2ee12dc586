mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod menu;
mod options;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::util::Globals;
use crate::warning::Warning;
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

const HELP: &str = "\
Usage: rivalsnake [<options>]

Play Snake in your terminal against an AI-controlled rival

Options:
  -c <path>, --config <path>
                    Read configuration from the given file instead of the
                    default location

  -h, --help        Display this help message and exit

  -V, --version     Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { config })
    }

    fn run(self) -> ExitCode {
        match self {
            Command::Run { config } => play(config),
            Command::Help => {
                print!("{HELP}");
                ExitCode::SUCCESS
            }
            Command::Version => {
                println!("rivalsnake {}", env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    Ok(Command::from_parser(Parser::from_env())?.run())
}

fn play(config_path: Option<PathBuf>) -> ExitCode {
    let mut errors = Vec::new();
    let config = load_config(config_path).unwrap_or_else(|e| {
        errors.push(e);
        Config::default()
    });
    match logging::init(&config.log) {
        Ok(true) => info!(
            version = env!("CARGO_PKG_VERSION"),
            "rivalsnake starting"
        ),
        Ok(false) => (),
        Err(e) => errors.push(anyhow::Error::new(e)),
    }
    for e in &errors {
        warn!("{e:#}");
    }
    let warnings = errors
        .iter()
        .map(|e| Warning::from_error(&**e))
        .collect::<Vec<_>>();
    let terminal = ratatui::init();
    let r = App::new(Globals::from(&config), warnings).run(terminal);
    ratatui::restore();
    io_exit(r)
}

/// Load the configuration file given on the command line, or else the file at
/// the default location if it exists
fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let (path, allow_missing) = match path {
        Some(p) => (p, false),
        None => (Config::default_path()?, true),
    };
    Config::load(&path, allow_missing)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
