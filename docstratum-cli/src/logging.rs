//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides the `-v` derived filter.
pub const LOG_ENV: &str = "DOCSTRATUM_LOG";

/// Filter directive for a `-v` count.
#[must_use]
pub const fn directive_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `DOCSTRATUM_LOG` wins over `verbosity` when set. Installing twice is a no-op.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(directive_for(verbosity)));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_for_verbosity() {
        assert_eq!(directive_for(0), "warn");
        assert_eq!(directive_for(1), "info");
        assert_eq!(directive_for(2), "debug");
        assert_eq!(directive_for(3), "trace");
        assert_eq!(directive_for(9), "trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(2);
    }
}
