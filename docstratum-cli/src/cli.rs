//! Command-line surface of `docstratum`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use docstratum::budget::{ProjectScale, TierKind};
use docstratum::{AntiPatternCategory, Severity, catalog};
use tracing::info;

use crate::config::{ColorChoice, OutputFormat, RenderConfig};
use crate::logging;
use crate::output::{write_json, write_report};
use crate::report::{self, TierSelection};

/// Inspect the DocStratum taxonomy for llms.txt validation.
#[derive(Debug, Parser)]
#[command(name = "docstratum", version, about)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// When to colour human output
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); DOCSTRATUM_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List canonical sections with rank and aliases
    Sections,

    /// Resolve section headings to canonical sections
    Resolve {
        /// Raw headings
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Check that headings follow the canonical order
    Order {
        /// Headings in document order
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Classify a token count against zones and budget tiers
    Budget {
        /// Observed token count
        tokens: u64,

        /// Intended tier (standard, comprehensive, full)
        #[arg(long, conflicts_with_all = ["pages", "features"])]
        tier: Option<TierKind>,

        /// Documentation pages of the project, for the advisory tier
        #[arg(long)]
        pages: Option<u32>,

        /// Product features of the project, for the advisory tier
        #[arg(long)]
        features: Option<u32>,
    },

    /// List the anti-pattern registry with gating rules
    AntiPatterns {
        /// Only this category (critical, structural, content, strategic)
        #[arg(long)]
        category: Option<AntiPatternCategory>,
    },

    /// List diagnostic codes
    Codes {
        /// Hide codes less severe than this (error, warning, info)
        #[arg(long)]
        min_severity: Option<Severity>,
    },

    /// Show full metadata of a diagnostic code or anti-pattern id
    Explain {
        /// `E001`, `AP-STRUCT-004`, ...
        id: String,
    },

    /// Verify catalog invariants; exits non-zero on failure
    Check,

    /// Write the catalog snapshot as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Render configuration implied by the global flags and the subcommand.
    #[must_use]
    pub fn render_config(&self) -> RenderConfig {
        let min_severity = match &self.command {
            Commands::Codes { min_severity } => *min_severity,
            _ => None,
        };
        RenderConfig::new(self.format, self.color).with_min_severity(min_severity)
    }
}

/// Parse arguments, set up logging and run the selected command against stdout.
///
/// # Errors
///
/// Returns an error if the command fails or output cannot be written.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.render_config();
    colored::control::set_override(config.color.enabled());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, config, &mut out)
}

/// Run one command, writing its report to `writer`.
///
/// # Errors
///
/// Returns an error for unknown identifiers, a failed self-check, or I/O failures.
pub fn execute(command: Commands, config: RenderConfig, writer: &mut dyn Write) -> Result<()> {
    let report = match command {
        Commands::Sections => report::sections(),
        Commands::Resolve { names } => report::resolve_names(&names),
        Commands::Order { names } => report::order(&names),
        Commands::Budget {
            tokens,
            tier,
            pages,
            features,
        } => report::budget(tokens, tier_selection(tier, pages, features)),
        Commands::AntiPatterns { category } => report::anti_patterns(category),
        Commands::Codes { .. } => report::codes(config),
        Commands::Explain { id } => report::explain(&id)?,
        Commands::Check => report::check()?,
        Commands::Export { output } => return export(output.as_deref(), writer),
    };
    write_report(&report, config.format, writer)
}

fn tier_selection(
    tier: Option<TierKind>,
    pages: Option<u32>,
    features: Option<u32>,
) -> TierSelection {
    match (tier, pages, features) {
        (Some(kind), _, _) => TierSelection::Key(kind),
        (None, None, None) => TierSelection::Unspecified,
        (None, pages, features) => TierSelection::Scale(ProjectScale::new(
            pages.unwrap_or_default(),
            features.unwrap_or_default(),
        )),
    }
}

fn export(output: Option<&Path>, writer: &mut dyn Write) -> Result<()> {
    let snapshot = catalog::snapshot();
    match output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&snapshot)?;
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write catalog to {}", path.display()))?;
            info!(
                path = %path.display(),
                schema_version = snapshot.schema_version,
                "catalog exported"
            );
            Ok(())
        }
        None => write_json(&snapshot, writer),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_budget_with_tier() {
        let cli = Cli::try_parse_from(["docstratum", "budget", "5000", "--tier", "full"]).unwrap();
        let Commands::Budget { tokens, tier, .. } = cli.command else {
            panic!("expected budget command");
        };
        assert_eq!(tokens, 5_000);
        assert_eq!(tier, Some(TierKind::Full));
    }

    #[test]
    fn test_tier_conflicts_with_scale() {
        let result = Cli::try_parse_from([
            "docstratum", "budget", "5000", "--tier", "full", "--pages", "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let result = Cli::try_parse_from(["docstratum", "budget", "5000", "--tier", "huge"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_tier_selection() {
        assert_eq!(tier_selection(None, None, None), TierSelection::Unspecified);
        assert_eq!(
            tier_selection(None, Some(200), None),
            TierSelection::Scale(ProjectScale::new(200, 0))
        );
        assert_eq!(
            tier_selection(Some(TierKind::Standard), None, None),
            TierSelection::Key(TierKind::Standard)
        );
    }

    #[test]
    fn test_render_config_from_flags() {
        let cli = Cli::try_parse_from([
            "docstratum",
            "--format",
            "json",
            "--color",
            "never",
            "codes",
            "--min-severity",
            "warning",
        ])
        .unwrap();
        let config = cli.render_config();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.color, ColorChoice::Never);
        assert_eq!(config.min_severity, Some(Severity::Warning));
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["docstratum", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
