use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BANNER: &str = "AI CLI Coder v1.0.0 - Type your coding request";
pub const DEFAULT_DELAY_MS: u64 = 800;
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

const DELAY_VAR: &str = "CODER_DELAY_MS";
const BANNER_VAR: &str = "CODER_BANNER";
const FONT_SIZE_VAR: &str = "CODER_FONT_SIZE";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got {value:?}")]
    InvalidDelay { var: &'static str, value: String },
    #[error("{var} must be a positive number, got {value:?}")]
    InvalidFontSize { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// How long the assistant "thinks" before answering.
    pub delay: Duration,
    pub banner: String,
    pub font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            banner: DEFAULT_BANNER.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Config {
    /// Read settings from the process environment, after loading `.env` if
    /// one exists. Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(err) = dotenv_problem(dotenvy::dotenv()) {
            warn!(%err, "ignoring unreadable .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(DELAY_VAR) {
            let millis = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidDelay {
                    var: DELAY_VAR,
                    value: value.clone(),
                })?;
            config.delay = Duration::from_millis(millis);
        }

        if let Some(value) = lookup(BANNER_VAR) {
            if !value.trim().is_empty() {
                config.banner = value;
            }
        }

        if let Some(value) = lookup(FONT_SIZE_VAR) {
            config.font_size = match value.trim().parse::<f32>() {
                Ok(size) if size.is_finite() && size > 0.0 => size,
                _ => return Err(ConfigError::InvalidFontSize { var: FONT_SIZE_VAR, value }),
            };
        }

        Ok(config)
    }
}

/// A missing `.env` is the normal case; anything else is worth reporting.
fn dotenv_problem(result: Result<PathBuf, dotenvy::Error>) -> Option<dotenvy::Error> {
    match result {
        Ok(_) => None,
        Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => None,
        Err(err) => Some(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.delay, Duration::from_millis(800));
        assert_eq!(config.banner, DEFAULT_BANNER);
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("CODER_DELAY_MS", " 25 "),
            ("CODER_BANNER", "Hi there"),
            ("CODER_FONT_SIZE", "18.5"),
        ])
        .unwrap();
        assert_eq!(config.delay, Duration::from_millis(25));
        assert_eq!(config.banner, "Hi there");
        assert_eq!(config.font_size, 18.5);
    }

    #[test]
    fn zero_delay_is_allowed() {
        let config = load(&[("CODER_DELAY_MS", "0")]).unwrap();
        assert_eq!(config.delay, Duration::ZERO);
    }

    #[test]
    fn blank_banner_keeps_the_default() {
        let config = load(&[("CODER_BANNER", "   ")]).unwrap();
        assert_eq!(config.banner, DEFAULT_BANNER);
    }

    #[test]
    fn rejects_a_malformed_delay() {
        let err = load(&[("CODER_DELAY_MS", "soon")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDelay {
                var: "CODER_DELAY_MS",
                value: "soon".into()
            }
        );
        assert!(err.to_string().contains("CODER_DELAY_MS"));
    }

    #[test]
    fn rejects_non_positive_font_sizes() {
        for bad in ["0", "-3", "NaN", "big"] {
            let err = load(&[("CODER_FONT_SIZE", bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidFontSize { .. }), "{bad}");
        }
    }

    #[test]
    fn missing_dotenv_is_not_a_problem() {
        let missing = dotenvy::Error::Io(io::Error::new(io::ErrorKind::NotFound, "no .env"));
        assert!(dotenv_problem(Err(missing)).is_none());
        assert!(dotenv_problem(Ok(PathBuf::from(".env"))).is_none());
    }

    #[test]
    fn malformed_or_unreadable_dotenv_is_reported() {
        let malformed = dotenvy::Error::LineParse("CODER_DELAY_MS 800".into(), 14);
        assert!(matches!(
            dotenv_problem(Err(malformed)),
            Some(dotenvy::Error::LineParse(..))
        ));

        let denied = dotenvy::Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert!(matches!(
            dotenv_problem(Err(denied)),
            Some(dotenvy::Error::Io(_))
        ));
    }
}
