//! Render configuration for the CLI.
//!
//! The taxonomy itself has no configuration; these options only change how
//! reports are printed.

use std::io::IsTerminal;

use clap::ValueEnum;
use docstratum::Severity;

/// Output format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for terminals.
    #[default]
    Human,
    /// Pretty-printed JSON for scripting.
    Json,
}

/// When to colour human output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Colour when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve the choice against the current environment.
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                std::env::var_os("NO_COLOR").is_none()
                    && std::env::var("TERM").ok().is_none_or(|term| term != "dumb")
                    && std::io::stdout().is_terminal()
            }
        }
    }
}

/// How reports are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Hide diagnostics less severe than this in code listings.
    pub min_severity: Option<Severity>,
}

impl RenderConfig {
    #[must_use]
    pub const fn new(format: OutputFormat, color: ColorChoice) -> Self {
        Self {
            format,
            color,
            min_severity: None,
        }
    }

    /// Same configuration with a severity floor.
    #[must_use]
    pub const fn with_min_severity(mut self, min_severity: Option<Severity>) -> Self {
        self.min_severity = min_severity;
        self
    }

    /// Whether a diagnostic of `severity` passes the severity floor.
    #[must_use]
    pub fn shows(self, severity: Severity) -> bool {
        self.min_severity.is_none_or(|floor| severity <= floor)
    }
}
