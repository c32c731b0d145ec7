//! Configuration loading and management.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Get a static error code string for log labeling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "config_io",
            Self::Parse(_) => "config_parse",
        }
    }
}

/// Console configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Console presentation settings.
    #[serde(default)]
    pub console: ConsoleConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Console presentation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Prompt shown before each input line on a terminal (default: "> ").
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Colour output by print level (default: true).
    #[serde(default = "default_color")]
    pub color: bool,
    /// Echo each submitted line back as `> line` (default: true).
    #[serde(default = "default_echo_input")]
    pub echo_input: bool,
    /// Number of submitted lines kept in history (default: 100).
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            color: default_color(),
            echo_input: default_echo_input(),
            history_size: default_history_size(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones (default: false).
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_prompt() -> String {
    "> ".to_string()
}

fn default_color() -> bool {
    true
}

fn default_echo_input() -> bool {
    true
}

fn default_history_size() -> usize {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given; otherwise load `default_path` if it exists,
    /// falling back to built-in defaults.
    pub fn load_or_default(path: Option<&str>, default_path: &str) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(default_path).exists() => Self::load(default_path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_values_are_correct() {
        let config = Config::default();
        assert_eq!(config.console.prompt, "> ");
        assert!(config.console.color);
        assert!(config.console.echo_input);
        assert_eq!(config.console.history_size, 100);
        assert_eq!(config.log.filter, "info");
        assert!(!config.log.json);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.console.history_size, 100);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[console]
color = false

[log]
filter = "devconsole=debug"
"#,
        )
        .unwrap();
        assert!(!config.console.color);
        assert!(config.console.echo_input);
        assert_eq!(config.log.filter, "devconsole=debug");
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[console]\nprompt = \"$ \"\nhistory_size = 5").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.console.prompt, "$ ");
        assert_eq!(config.console.history_size, 5);
    }

    #[test]
    fn load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[console]\ncolor = \"sometimes\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "config_parse");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = Config::load_or_default(Some("/nonexistent/devconsole.toml"), "unused.toml")
            .unwrap_err();
        assert_eq!(err.error_code(), "config_io");
    }

    #[test]
    fn absent_default_file_falls_back() {
        let config = Config::load_or_default(None, "/nonexistent/devconsole.toml").unwrap();
        assert_eq!(config.console.prompt, "> ");
    }
}
