#![forbid(unsafe_code)]

//! Logging for crates that keep `tracing` optional.
//!
//! `readmark-outline` logs through [`trace!`](crate::trace). With the
//! `tracing` feature the macro is `tracing::trace!`; without it the macro
//! expands to nothing and its arguments are never evaluated.
//!
//! With `tracing-json`, [`init_json`] installs a JSON subscriber filtered by
//! the `READMARK_LOG` environment variable.

#[cfg(feature = "tracing")]
pub use tracing::trace;

/// Environment variable holding the `EnvFilter` directive for [`init_json`].
pub const LOG_ENV: &str = "READMARK_LOG";

/// Stand-in for `tracing::trace!` when the `tracing` feature is off.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Failure to install the global JSON subscriber.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub struct LoggingInitError(String);

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install json subscriber: {}", self.0)
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingInitError {}

/// Install a global JSON subscriber.
///
/// The filter is read from [`LOG_ENV`]; when unset or unparsable the
/// filter defaults to `info`. Fails if a global subscriber is already set.
#[cfg(feature = "tracing-json")]
pub fn init_json() -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| LoggingInitError(err.to_string()))
}
