//! Verbosity levels and environment-driven selection.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::ParseLevelError;

/// Name of the environment variable that selects the verbosity threshold.
pub const LOGGING_LEVEL: &str = "LOGGING_LEVEL";

/// Log severity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Debug level - most verbose.
    Debug,
    /// Info level - routine operational records.
    Info,
    /// Warn level.
    Warn,
    /// Error level.
    Error,
    /// Panic level.
    Panic,
    /// Fatal level - least verbose.
    Fatal,
}

impl Default for Level {
    fn default() -> Self {
        Self::Info
    }
}

impl Level {
    /// Returns the upper-case name used in emitted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }

    /// Maps a raw [`LOGGING_LEVEL`] value to a level.
    ///
    /// Recognizes exactly `debug`, `info`, `warn`, `error`, `panic` and
    /// `fatal`, case-sensitively. Every other value, including `None` for an
    /// unset variable, selects [`Level::Info`] without complaint.
    pub fn from_env_value(value: Option<&str>) -> Self {
        value
            .and_then(|raw| raw.parse::<Level>().ok())
            .unwrap_or_default()
    }

    /// Reads the threshold from the [`LOGGING_LEVEL`] environment variable.
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(LOGGING_LEVEL).ok().as_deref())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            _ => Err(ParseLevelError {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Panic);
        assert!(Level::Panic < Level::Fatal);
    }

    #[test]
    fn test_level_default_is_info() {
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn test_level_display_upper_case() {
        assert_eq!(Level::Debug.to_string(), "DEBUG");
        assert_eq!(Level::Warn.to_string(), "WARN");
        assert_eq!(Level::Fatal.to_string(), "FATAL");
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("panic".parse::<Level>().unwrap(), Level::Panic);
    }

    #[test]
    fn test_level_from_str_is_case_sensitive() {
        assert!("INFO".parse::<Level>().is_err());
        assert!("Info".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_from_str_keeps_rejected_value() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err.value, "verbose");
    }

    #[test]
    fn test_from_env_value_recognized() {
        assert_eq!(Level::from_env_value(Some("debug")), Level::Debug);
        assert_eq!(Level::from_env_value(Some("error")), Level::Error);
    }

    #[test]
    fn test_from_env_value_defaults_to_info() {
        assert_eq!(Level::from_env_value(Some("verbose")), Level::Info);
        assert_eq!(Level::from_env_value(Some("WARN")), Level::Info);
        assert_eq!(Level::from_env_value(Some("")), Level::Info);
        assert_eq!(Level::from_env_value(None), Level::Info);
    }

    #[test]
    fn test_level_serializes_upper_case() {
        let value = serde_json::to_value(Level::Error).unwrap();
        assert_eq!(value, serde_json::json!("ERROR"));
    }
}
