use crate::consts;
use crate::options::Options;
use ratatui::style::Style;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub(crate) struct Config {
    /// Initial gameplay options
    #[serde(default)]
    pub(crate) options: Options,

    /// Tuning for the rival snake
    #[serde(default)]
    pub(crate) ai: AiConfig,

    /// Styles for the things on the level
    #[serde(default)]
    pub(crate) styles: Styles,

    /// Settings for the diagnostic log
    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("rivalsnake").join("config.toml"))
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
}

/// Tuning values for the AI-controlled rival snake
#[derive(Clone, Copy, Deserialize, Debug, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct AiConfig {
    /// Fraction of game ticks on which the rival moves
    pub(crate) speed: AiSpeed,

    /// How many recently-visited cells the rival remembers in order to steer
    /// away from them
    pub(crate) history_capacity: HistoryCapacity,
}

impl Default for AiConfig {
    fn default() -> AiConfig {
        AiConfig {
            speed: AiSpeed::default(),
            history_capacity: HistoryCapacity::default(),
        }
    }
}

/// A movement rate in the half-open range (0, 1], measured in cells per game
/// tick
#[derive(Clone, Copy, Deserialize, Debug, PartialEq)]
#[serde(try_from = "f32")]
pub(crate) struct AiSpeed(f32);

impl AiSpeed {
    pub(crate) const FULL: AiSpeed = AiSpeed(1.0);

    pub(crate) fn new(speed: f32) -> Option<AiSpeed> {
        (speed > 0.0 && speed <= 1.0).then_some(AiSpeed(speed))
    }

    pub(crate) fn get(self) -> f32 {
        self.0
    }
}

impl Default for AiSpeed {
    fn default() -> AiSpeed {
        AiSpeed::FULL
    }
}

impl TryFrom<f32> for AiSpeed {
    type Error = AiSpeedError;

    fn try_from(speed: f32) -> Result<AiSpeed, AiSpeedError> {
        AiSpeed::new(speed).ok_or(AiSpeedError(speed))
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("AI speed must be greater than 0 and at most 1, got {0}")]
pub(crate) struct AiSpeedError(f32);

/// The size of the rival's memory of visited cells, at most
/// [`MAX_HISTORY_CAPACITY`][consts::MAX_HISTORY_CAPACITY].  Zero disables the
/// memory.
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "usize")]
pub(crate) struct HistoryCapacity(usize);

impl HistoryCapacity {
    pub(crate) fn new(capacity: usize) -> Option<HistoryCapacity> {
        (capacity <= consts::MAX_HISTORY_CAPACITY).then_some(HistoryCapacity(capacity))
    }

    pub(crate) fn get(self) -> usize {
        self.0
    }
}

impl Default for HistoryCapacity {
    fn default() -> HistoryCapacity {
        HistoryCapacity(consts::DEFAULT_HISTORY_CAPACITY)
    }
}

impl TryFrom<usize> for HistoryCapacity {
    type Error = HistoryCapacityError;

    fn try_from(capacity: usize) -> Result<HistoryCapacity, HistoryCapacityError> {
        HistoryCapacity::new(capacity).ok_or(HistoryCapacityError(capacity))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("AI history capacity must be at most {max}, got {0}", max = consts::MAX_HISTORY_CAPACITY)]
pub(crate) struct HistoryCapacityError(usize);

/// Styles for drawing the level's contents
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(from = "RawStyles")]
pub(crate) struct Styles {
    pub(crate) player: Style,
    pub(crate) rival: Style,
    pub(crate) fruit: Style,
}

impl Default for Styles {
    fn default() -> Styles {
        Styles {
            player: consts::SNAKE_STYLE,
            rival: consts::RIVAL_STYLE,
            fruit: consts::FRUIT_STYLE,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
struct RawStyles {
    player: Option<parse_style::Style>,
    rival: Option<parse_style::Style>,
    fruit: Option<parse_style::Style>,
}

impl From<RawStyles> for Styles {
    fn from(value: RawStyles) -> Styles {
        let defaults = Styles::default();
        Styles {
            player: value.player.map_or(defaults.player, Style::from),
            rival: value.rival.map_or(defaults.rival, Style::from),
            fruit: value.fruit.map_or(defaults.fruit, Style::from),
        }
    }
}

/// Where and how much to log.  Without a `file`, nothing is logged.
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawLogConfig")]
pub(crate) struct LogConfig {
    pub(crate) file: Option<PathBuf>,
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::INFO,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawLogConfig {
    file: Option<PathBuf>,
    level: String,
}

impl Default for RawLogConfig {
    fn default() -> RawLogConfig {
        RawLogConfig {
            file: None,
            level: String::from("info"),
        }
    }
}

impl TryFrom<RawLogConfig> for LogConfig {
    type Error = LogLevelError;

    fn try_from(value: RawLogConfig) -> Result<LogConfig, LogLevelError> {
        let level = value
            .level
            .parse::<LevelFilter>()
            .map_err(|_| LogLevelError(value.level))?;
        Ok(LogConfig {
            file: value.file,
            level,
        })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid log level {0:?}")]
pub(crate) struct LogLevelError(String);

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::LevelSize;
    use ratatui::style::{Color, Modifier};
    use std::io::Write;

    #[test]
    fn empty() {
        let cfg = toml::from_str::<Config>("").unwrap();
        pretty_assertions::assert_eq!(cfg, Config::default());
    }

    #[test]
    fn full() {
        let src = concat!(
            "[options]\n",
            "wraparound = true\n",
            "rival = false\n",
            "fruits = 2\n",
            "level-size = \"small\"\n",
            "\n",
            "[ai]\n",
            "speed = 0.5\n",
            "history-capacity = 0\n",
            "\n",
            "[styles]\n",
            "rival = \"bold blue\"\n",
            "\n",
            "[log]\n",
            "file = \"/tmp/rivalsnake.log\"\n",
            "level = \"debug\"\n",
        );
        let cfg = toml::from_str::<Config>(src).unwrap();
        assert!(cfg.options.wraparound);
        assert!(!cfg.options.rival);
        assert_eq!(cfg.options.fruits.get(), 2);
        assert_eq!(cfg.options.level_size, LevelSize::Small);
        assert_eq!(cfg.ai.speed, AiSpeed(0.5));
        assert_eq!(cfg.ai.history_capacity.get(), 0);
        assert_eq!(cfg.styles.rival.fg, Some(Color::Blue));
        assert!(cfg.styles.rival.add_modifier.contains(Modifier::BOLD));
        assert_eq!(cfg.styles.player, consts::SNAKE_STYLE);
        assert_eq!(
            cfg.log.file.as_deref(),
            Some(Path::new("/tmp/rivalsnake.log"))
        );
        assert_eq!(cfg.log.level, LevelFilter::DEBUG);
    }

    #[test]
    fn bad_speed() {
        assert!(toml::from_str::<Config>("[ai]\nspeed = 0.0\n").is_err());
        assert!(toml::from_str::<Config>("[ai]\nspeed = 1.5\n").is_err());
        assert!(toml::from_str::<Config>("[ai]\nspeed = -0.25\n").is_err());
    }

    #[test]
    fn bad_history_capacity() {
        assert!(toml::from_str::<Config>("[ai]\nhistory-capacity = -1\n").is_err());
        assert!(toml::from_str::<Config>("[ai]\nhistory-capacity = 257\n").is_err());
        assert!(
            toml::from_str::<Config>("[ai]\nhistory-capacity = 9223372036854775807\n").is_err()
        );
        let cfg = toml::from_str::<Config>("[ai]\nhistory-capacity = 256\n").unwrap();
        assert_eq!(cfg.ai.history_capacity.get(), consts::MAX_HISTORY_CAPACITY);
        assert_eq!(
            HistoryCapacity::try_from(1000_usize).unwrap_err().to_string(),
            "AI history capacity must be at most 256, got 1000"
        );
    }

    #[test]
    fn bad_log_level() {
        assert!(toml::from_str::<Config>("[log]\nlevel = \"chatty\"\n").is_err());
    }

    #[test]
    fn load_missing_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&tmpdir.path().join("config.toml"), true).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_missing_not_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_file() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmpfile, "[ai]\nhistory-capacity = 3").unwrap();
        tmpfile.flush().unwrap();
        let cfg = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(cfg.ai.history_capacity.get(), 3);
        assert_eq!(cfg.ai.speed, AiSpeed::FULL);
    }

    #[test]
    fn load_invalid() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmpfile, "[options]\nfruits = \"lots\"").unwrap();
        tmpfile.flush().unwrap();
        let r = Config::load(tmpfile.path(), true);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }
}
