use crate::config::LogConfig;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Install a global `tracing` subscriber that appends to the configured log
/// file.  Returns `Ok(false)` without installing anything if no log file is
/// configured, as the terminal itself is occupied by the game.
pub(crate) fn init(config: &LogConfig) -> Result<bool, LoggingError> {
    let Some(path) = config.file.as_ref() else {
        return Ok(false);
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(LoggingError::Mkdir)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LoggingError::Open)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.level)
        .try_init()
        .map_err(|e| LoggingError::Install {
            path: path.clone(),
            msg: e.to_string(),
        })?;
    Ok(true)
}

#[derive(Debug, Error)]
pub(crate) enum LoggingError {
    #[error("failed to create directory for log file")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("failed to start logging to {}: {msg}", path.display())]
    Install { path: PathBuf, msg: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_no_subscriber() {
        assert!(!init(&LogConfig::default()).unwrap());
    }

    #[test]
    fn unopenable_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            // A directory cannot be opened for appending
            file: Some(tmpdir.path().to_path_buf()),
            ..LogConfig::default()
        };
        assert!(matches!(init(&config), Err(LoggingError::Open(_))));
    }
}
