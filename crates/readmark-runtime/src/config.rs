#![forbid(unsafe_code)]

//! Tracker configuration (deterministic, env-overridable).
//!
//! # Environment Variables
//! - `READMARK_MAX_DEPTH` (u8 >= 1): deepest heading level kept as a section
//! - `READMARK_ACTIVE_POLICY` = forward|recount
//! - `READMARK_REMEASURE_ON_RESIZE` (bool)
//! - `READMARK_COALESCE_SCROLL` (bool)
//! - `READMARK_WORDS_PER_MINUTE` (u32 >= 1)
//!
//! Parsing never fails: invalid values keep the default and are reported
//! in [`ConfigParse::errors`].

use std::env;
use std::fmt;

use readmark_outline::{DEFAULT_WORDS_PER_MINUTE, SECTION_MAX_DEPTH};

use crate::tracker::ActivePolicy;

const ENV_MAX_DEPTH: &str = "READMARK_MAX_DEPTH";
const ENV_ACTIVE_POLICY: &str = "READMARK_ACTIVE_POLICY";
const ENV_REMEASURE_ON_RESIZE: &str = "READMARK_REMEASURE_ON_RESIZE";
const ENV_COALESCE_SCROLL: &str = "READMARK_COALESCE_SCROLL";
const ENV_WORDS_PER_MINUTE: &str = "READMARK_WORDS_PER_MINUTE";

/// Outline tracking configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Deepest heading level that becomes a section.
    pub max_depth: u8,
    /// Active section policy.
    pub policy: ActivePolicy,
    /// Re-measure section heights on resize and reflow notifications.
    pub remeasure_on_resize: bool,
    /// Hold scroll and resize notifications until the next
    /// [`Event::Frame`](readmark_core::event::Event::Frame), then apply the latest.
    pub coalesce_scroll: bool,
    /// Reading speed for the reading-time estimate.
    pub words_per_minute: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_depth: SECTION_MAX_DEPTH,
            policy: ActivePolicy::ForwardBiased,
            remeasure_on_resize: false,
            coalesce_scroll: false,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: TrackerConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl TrackerConfig {
    /// Set the section depth cutoff.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the active section policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ActivePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable or disable re-measurement on layout changes.
    #[must_use]
    pub fn with_remeasure_on_resize(mut self, enabled: bool) -> Self {
        self.remeasure_on_resize = enabled;
        self
    }

    /// Enable or disable per-frame batching.
    #[must_use]
    pub fn with_coalesce_scroll(mut self, enabled: bool) -> Self {
        self.coalesce_scroll = enabled;
        self
    }

    /// Set the reading speed.
    #[must_use]
    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.max_depth == 0 {
            errors.push(ConfigError::new(
                "max_depth",
                self.max_depth.to_string(),
                "must be >= 1",
            ));
        }
        if self.words_per_minute == 0 {
            errors.push(ConfigError::new(
                "words_per_minute",
                self.words_per_minute.to_string(),
                "must be >= 1",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn from_env_with<F>(mut get: F) -> ConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = TrackerConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_MAX_DEPTH) {
        match value.trim().parse::<u8>() {
            Ok(parsed) if parsed >= 1 => config.max_depth = parsed,
            _ => errors.push(ConfigError::new(
                "max_depth",
                value,
                "expected integer 1..=255",
            )),
        }
    }

    if let Some(value) = get(ENV_ACTIVE_POLICY) {
        match ActivePolicy::parse(&value) {
            Some(parsed) => config.policy = parsed,
            None => errors.push(ConfigError::new(
                "policy",
                value,
                "expected forward|recount",
            )),
        }
    }

    if let Some(value) = get(ENV_REMEASURE_ON_RESIZE) {
        match parse_bool(&value) {
            Some(parsed) => config.remeasure_on_resize = parsed,
            None => errors.push(ConfigError::new(
                "remeasure_on_resize",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }

    if let Some(value) = get(ENV_COALESCE_SCROLL) {
        match parse_bool(&value) {
            Some(parsed) => config.coalesce_scroll = parsed,
            None => errors.push(ConfigError::new(
                "coalesce_scroll",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }

    if let Some(value) = get(ENV_WORDS_PER_MINUTE) {
        match value.trim().parse::<u32>() {
            Ok(parsed) if parsed >= 1 => config.words_per_minute = parsed,
            _ => errors.push(ConfigError::new(
                "words_per_minute",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Err(mut invalid) = config.validate() {
        errors.append(&mut invalid);
    }

    ConfigParse { config, errors }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
