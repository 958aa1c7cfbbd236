//! Configuration for the producer and consumer loops.
//!
//! Everything comes from environment variables (optionally seeded from a
//! `.env` file by the binaries):
//!
//! | variable                   | meaning                              | default          |
//! |----------------------------|--------------------------------------|------------------|
//! | `MESSAGE_INTERVAL_SECONDS` | pause between events, whole seconds  | 3 producer, 2 consumer |
//! | `BUZZ_SEED`                | RNG seed for reproducible runs       | OS entropy       |
//! | `BUZZ_CATALOG_PATH`        | RON catalog replacing the built-in   | built-in catalog |
//! | `BUZZ_LOG_DIR`             | directory for `buzz.log`             | `logs`           |

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub const INTERVAL_VAR: &str = "MESSAGE_INTERVAL_SECONDS";
pub const SEED_VAR: &str = "BUZZ_SEED";
pub const CATALOG_PATH_VAR: &str = "BUZZ_CATALOG_PATH";
pub const LOG_DIR_VAR: &str = "BUZZ_LOG_DIR";

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative whole number of seconds, got '{value}'")]
    InvalidInterval { var: &'static str, value: String },

    #[error("{var} must be an unsigned integer, got '{value}'")]
    InvalidSeed { var: &'static str, value: String },

    #[error("{var} is set but empty")]
    EmptyPath { var: &'static str },
}

/// Which of the two loops is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Producer,
    Consumer,
}

impl Role {
    pub fn default_interval(&self) -> Interval {
        match self {
            Self::Producer => Interval::from_secs(3),
            Self::Consumer => Interval::from_secs(2),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Producer => "producer",
            Self::Consumer => "consumer",
        }
    }

    /// Name used in the START and END log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Producer => "travel producer",
            Self::Consumer => "consumer",
        }
    }

    /// Verb used when announcing the interval.
    fn cadence_verb(&self) -> &'static str {
        match self {
            Self::Producer => "sent",
            Self::Consumer => "processed",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pause between successive events, in whole seconds. Fixed for the lifetime
/// of a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval(u64);

impl Interval {
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn secs(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Parse a raw interval setting. `None` (unset) yields `default`.
pub fn parse_interval(raw: Option<&str>, default: Interval) -> Result<Interval, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Interval)
            .map_err(|_| ConfigError::InvalidInterval {
                var: INTERVAL_VAR,
                value: value.to_string(),
            }),
    }
}

/// Resolve the interval for `role` from the process environment.
pub fn get_message_interval(role: Role) -> Result<Interval, ConfigError> {
    let interval = interval_from_lookup(role, env_value)?;
    log_interval(role, interval);
    Ok(interval)
}

/// Resolve the interval for `role` through `lookup`, falling back to the
/// role default when the setting is absent.
fn interval_from_lookup<F>(role: Role, lookup: F) -> Result<Interval, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_interval(lookup(INTERVAL_VAR).as_deref(), role.default_interval())
}

fn log_interval(role: Role, interval: Interval) {
    info!(
        role = %role,
        interval_secs = interval.secs(),
        "Messages will be {} every {} seconds.",
        role.cadence_verb(),
        interval.secs()
    );
}

/// Directory the log file goes into.
pub fn log_dir() -> PathBuf {
    log_dir_from(env_value(LOG_DIR_VAR))
}

fn log_dir_from(raw: Option<String>) -> PathBuf {
    match raw {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(default_log_dir()),
    }
}

fn default_log_dir() -> &'static str {
    "logs"
}

/// Everything one loop needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct BuzzConfig {
    pub role: Role,
    pub interval: Interval,
    pub seed: Option<u64>,
    pub catalog_path: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl BuzzConfig {
    /// Load configuration for `role` from the process environment.
    pub fn from_env(role: Role) -> Result<Self, ConfigError> {
        Self::from_lookup(role, env_value)
    }

    /// Load configuration using `lookup` in place of the environment.
    pub fn from_lookup<F>(role: Role, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval = interval_from_lookup(role, &lookup)?;

        let seed = match lookup(SEED_VAR) {
            None => None,
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidSeed {
                    var: SEED_VAR,
                    value: value.clone(),
                }
            })?),
        };

        let catalog_path = match lookup(CATALOG_PATH_VAR) {
            None => None,
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyPath {
                    var: CATALOG_PATH_VAR,
                })
            }
            Some(value) => Some(PathBuf::from(value)),
        };

        Ok(Self {
            role,
            interval,
            seed,
            catalog_path,
            log_dir: log_dir_from(lookup(LOG_DIR_VAR)),
        })
    }

    /// Log the resolved settings.
    pub fn announce(&self) {
        log_interval(self.role, self.interval);
        if let Some(seed) = self.seed {
            info!(seed, "Using fixed RNG seed");
        }
        if let Some(ref path) = self.catalog_path {
            info!(path = %path.display(), "Using catalog override");
        }
    }
}

/// Present-but-not-unicode values are passed through lossily so they fail
/// parsing instead of silently falling back to the default.
fn env_value(var: &str) -> Option<String> {
    match env::var(var) {
        Ok(value) => Some(value),
        Err(env::VarError::NotPresent) => None,
        Err(env::VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
    }
}
