use std::env;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use log::*;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;

pub const DEFAULT_PATTERN: &str = "SEEK | {d(%Y-%m-%d %H:%M:%S)} | {({l}):5.5} | {f}:{L} | {m}{n}";

/// Environment variable holding the level filter, e.g. `debug`.
pub const LEVEL_VAR: &str = "SEEK_LOG";

/// Environment variable holding the path of an extra log file.
pub const FILE_VAR: &str = "SEEK_LOG_FILE";

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    pub file: Option<PathBuf>,
    /// log4rs `PatternEncoder` layout used by every appender.
    pub pattern: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Trace,
            file: None,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_vars(env::var(LEVEL_VAR).ok(), env::var(FILE_VAR).ok())
    }

    fn from_vars(level: Option<String>, file: Option<String>) -> Result<Self, LoggingError> {
        let mut config = Self::default();

        if let Some(level) = level {
            config.level = LevelFilter::from_str(level.trim())
                .map_err(|_| LoggingError::InvalidLevel(level))?;
        }

        config.file = file.filter(|f| !f.is_empty()).map(PathBuf::from);
        Ok(config)
    }
}

#[derive(Debug)]
pub enum LoggingError {
    InvalidLevel(String),
    File(io::Error),
    Config(ConfigErrors),
    Install(SetLoggerError),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLevel(level) => write!(f, "{level:?} is not a log level"),
            Self::File(e) => write!(f, "could not open log file: {e}"),
            Self::Config(e) => write!(f, "invalid logging configuration: {e}"),
            Self::Install(e) => write!(f, "could not install logger: {e}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidLevel(_) => None,
            Self::File(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Install(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoggingError {
    fn from(value: io::Error) -> Self {
        Self::File(value)
    }
}

impl From<ConfigErrors> for LoggingError {
    fn from(value: ConfigErrors) -> Self {
        Self::Config(value)
    }
}

impl From<SetLoggerError> for LoggingError {
    fn from(value: SetLoggerError) -> Self {
        Self::Install(value)
    }
}

/// Builds the log4rs configuration without installing it.
pub fn build_config(config: &LoggingConfig) -> Result<Config, LoggingError> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(&config.pattern)))
        .build();

    let mut builder = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .logger(Logger::builder().build("seek_pattern", config.level));
    let mut root = Root::builder().appender("stdout");

    if let Some(path) = &config.file {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(&config.pattern)))
            .build(path)?;

        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    Ok(builder.build(root.build(config.level))?)
}

/// Installs the logger and routes panics through it.
pub fn init(config: &LoggingConfig) -> Result<Handle, LoggingError> {
    let handle = log4rs::init_config(build_config(config)?)?;

    log_panics::init();
    debug!("Logging initialized at {}", config.level);

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use log::LevelFilter;

    use crate::{build_config, LoggingConfig, LoggingError, DEFAULT_PATTERN};

    #[test]
    fn default_config_logs_everything_to_stdout() {
        let config = LoggingConfig::default();

        assert_eq!(config.level, LevelFilter::Trace);
        assert_eq!(config.file, None);
        assert_eq!(config.pattern, DEFAULT_PATTERN);
    }

    #[test]
    fn vars_override_the_defaults() {
        let config = LoggingConfig::from_vars(Some("warn".into()), Some("/tmp/seek.log".into())).unwrap();

        assert_eq!(config.level, LevelFilter::Warn);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/seek.log")));
    }

    #[test]
    fn empty_file_var_is_ignored() {
        let config = LoggingConfig::from_vars(None, Some(String::new())).unwrap();

        assert_eq!(config.file, None);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let result = LoggingConfig::from_vars(Some("loud".into()), None);

        assert!(matches!(result, Err(LoggingError::InvalidLevel(level)) if level == "loud"));
    }

    #[test]
    fn console_only_config_builds() {
        let config = LoggingConfig {
            level: LevelFilter::Info,
            ..Default::default()
        };
        let built = build_config(&config).unwrap();

        assert_eq!(built.appenders().len(), 1);
        assert_eq!(built.root().level(), LevelFilter::Info);
    }

    #[test]
    fn file_config_adds_an_appender() {
        let path = std::env::temp_dir().join(format!("seek-logging-{}.log", std::process::id()));
        let config = LoggingConfig {
            file: Some(path.clone()),
            ..Default::default()
        };
        let built = build_config(&config).unwrap();

        assert_eq!(built.appenders().len(), 2);
        assert_eq!(built.root().appenders(), &["stdout".to_string(), "file".to_string()]);

        let _ = std::fs::remove_file(path);
    }
}
