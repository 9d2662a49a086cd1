//! Report rendering.
//!
//! JSON output is the serde view of a [`Report`]. Human output uses `colored`;
//! whether ANSI codes are emitted is decided once by the caller through
//! `colored::control`.

use std::io::Write;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use docstratum::Severity;
use docstratum::catalog::{DiagnosticView, SectionView};
use docstratum::integrity::CatalogSummary;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::report::{
    AntiPatternReport, BudgetReport, Explanation, OrderReport, Report, ResolveRow,
};

const WIDTH: usize = 80;

/// Write any serializable value as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<T: Serialize + ?Sized>(value: &T, writer: &mut dyn Write) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write a report in the requested format.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_report(report: &Report, format: OutputFormat, writer: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(report, writer),
        OutputFormat::Human => write_human(report, writer),
    }
}

/// Write a report as human-readable text.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &Report, writer: &mut dyn Write) -> Result<()> {
    match report {
        Report::Sections(sections) => write_sections(sections, writer),
        Report::Resolve(rows) => write_resolutions(rows, writer),
        Report::Order(order) => write_order(order, writer),
        Report::Budget(budget) => write_budget(budget, writer),
        Report::AntiPatterns(listing) => write_anti_patterns(listing, writer),
        Report::Codes(codes) => write_codes(codes, writer),
        Report::Explain(explanation) => write_explanation(explanation, writer),
        Report::Check(summary) => write_summary(summary, writer),
    }
}

fn banner(title: &str, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "{}", "=".repeat(WIDTH))?;
    writeln!(writer, "  {}", title.bold())?;
    writeln!(writer, "{}", "=".repeat(WIDTH))?;
    Ok(())
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("{:<7}", severity.as_str());
    match severity {
        Severity::Error => label.red().bold(),
        Severity::Warning => label.yellow().bold(),
        Severity::Info => label.cyan(),
    }
}

fn finding(code: &str, severity: Severity, message: &str, writer: &mut dyn Write) -> Result<()> {
    writeln!(
        writer,
        "  {} {} {message}",
        severity_label(severity),
        code.bold()
    )?;
    Ok(())
}

// ---- sections ----

fn write_sections(sections: &[SectionView], writer: &mut dyn Write) -> Result<()> {
    banner("CANONICAL SECTIONS", writer)?;
    for view in sections {
        let rank = view
            .rank
            .map_or_else(|| "-".to_owned(), |rank| rank.to_string());
        writeln!(writer, "  {rank:>2}. {}", view.section.display_name().bold())?;
        if !view.aliases.is_empty() {
            writeln!(writer, "      aliases: {}", view.aliases.join(", ").dimmed())?;
        }
    }
    Ok(())
}

fn write_resolutions(rows: &[ResolveRow], writer: &mut dyn Write) -> Result<()> {
    for row in rows {
        match row.resolution.section() {
            Some(section) => writeln!(
                writer,
                "{} '{}' -> {}",
                "\u{2713}".green(),
                row.input,
                section.display_name().bold()
            )?,
            None => writeln!(writer, "{} '{}' -> unresolved", "\u{2717}".red(), row.input)?,
        }
        if let Some(code) = row.diagnostic {
            finding(code.as_str(), code.severity(), code.message(), writer)?;
        }
    }
    Ok(())
}

fn write_order(order: &OrderReport, writer: &mut dyn Write) -> Result<()> {
    for name in &order.unresolved {
        writeln!(writer, "{} skipped non-canonical '{name}'", "!".yellow())?;
    }
    let Some(violation) = &order.violation else {
        writeln!(
            writer,
            "{} {} section(s) in canonical order",
            "\u{2713}".green(),
            order.sections.len()
        )?;
        return Ok(());
    };

    if let Some(code) = order.diagnostic {
        finding(code.as_str(), code.severity(), code.message(), writer)?;
    }
    let out_of_order: Vec<&str> = violation
        .out_of_order
        .iter()
        .map(|section| section.display_name())
        .collect();
    let expected: Vec<&str> = violation
        .expected
        .iter()
        .map(|section| section.display_name())
        .collect();
    writeln!(writer, "  out of order: {}", out_of_order.join(", "))?;
    writeln!(writer, "  expected:     {}", expected.join(" > "))?;
    Ok(())
}

// ---- budget ----

fn write_budget(budget: &BudgetReport, writer: &mut dyn Write) -> Result<()> {
    banner("TOKEN BUDGET", writer)?;
    writeln!(writer, "  Tokens:        {}", budget.token_count)?;
    writeln!(writer, "  Zone:          {} ({})", budget.zone, budget.guidance)?;
    if let Some(tier) = budget.tier {
        writeln!(
            writer,
            "  Tier:          {} ({}-{} tokens, {})",
            tier.name, tier.min_tokens, tier.max_tokens, tier.file_strategy
        )?;
    }
    let observed = budget
        .observed_tier
        .map_or_else(|| "outside all tiers".to_owned(), |kind| kind.to_string());
    writeln!(writer, "  Observed tier: {observed}")?;
    if let Some(exceeded) = budget.exceeded {
        writeln!(writer, "  Over budget:   {}", if exceeded { "yes" } else { "no" })?;
    }
    writeln!(writer)?;
    if budget.diagnostics.is_empty() {
        writeln!(writer, "{} within budget", "\u{2713}".green())?;
    }
    for code in &budget.diagnostics {
        finding(code.as_str(), code.severity(), code.message(), writer)?;
    }
    Ok(())
}

// ---- catalogs ----

fn write_anti_patterns(listing: &AntiPatternReport, writer: &mut dyn Write) -> Result<()> {
    banner("ANTI-PATTERNS", writer)?;
    for category in &listing.categories {
        writeln!(writer)?;
        writeln!(
            writer,
            "  {} - {}",
            category.category.as_str().to_uppercase().bold(),
            category.description
        )?;
        writeln!(writer, "{}", "-".repeat(WIDTH))?;
        for entry in listing
            .entries
            .iter()
            .filter(|entry| entry.category == category.category)
        {
            writeln!(
                writer,
                "  {:<14} {:<26} {}",
                entry.id.as_str(),
                entry.name,
                entry.check_id.dimmed()
            )?;
            writeln!(writer, "                 {}", entry.description)?;
        }
    }
    Ok(())
}

fn write_codes(codes: &[DiagnosticView], writer: &mut dyn Write) -> Result<()> {
    banner("DIAGNOSTIC CODES", writer)?;
    for view in codes {
        finding(view.entry.code.as_str(), view.severity, view.entry.message, writer)?;
    }
    writeln!(writer)?;
    writeln!(writer, "  {} code(s)", codes.len())?;
    Ok(())
}

fn write_explanation(explanation: &Explanation, writer: &mut dyn Write) -> Result<()> {
    match explanation {
        Explanation::Diagnostic {
            view,
            related_anti_patterns,
        } => {
            banner(view.entry.code.as_str(), writer)?;
            writeln!(writer, "  Severity:     {} ({})", view.severity, view.validation_levels)?;
            writeln!(writer, "  Message:      {}", view.entry.message)?;
            writeln!(writer, "  Remediation:  {}", view.entry.remediation)?;
            if !view.entry.references.is_empty() {
                writeln!(writer, "  References:   {}", view.entry.references.join(", "))?;
            }
            if let Some(note) = view.entry.note {
                writeln!(writer, "  Note:         {note}")?;
            }
            for entry in related_anti_patterns {
                writeln!(writer, "  Anti-pattern: {} {}", entry.id, entry.name)?;
            }
        }
        Explanation::AntiPattern {
            entry,
            gating_rule,
            related_diagnostics,
        } => {
            banner(entry.id.as_str(), writer)?;
            writeln!(writer, "  Name:         {}", entry.name)?;
            writeln!(writer, "  Category:     {}", entry.category)?;
            writeln!(writer, "  Check:        {}", entry.check_id)?;
            writeln!(writer, "  Description:  {}", entry.description)?;
            writeln!(writer, "  Scoring:      {}", gating_rule.describe())?;
            for code in related_diagnostics {
                writeln!(writer, "  Diagnostic:   {code} {}", code.message())?;
            }
        }
    }
    Ok(())
}

fn write_summary(summary: &CatalogSummary, writer: &mut dyn Write) -> Result<()> {
    banner("TAXONOMY SELF-CHECK", writer)?;
    writeln!(writer, "  Schema version:  {}", summary.schema_version)?;
    writeln!(
        writer,
        "  Sections:        {} ({} ordered)",
        summary.sections, summary.ordered_sections
    )?;
    writeln!(writer, "  Aliases:         {}", summary.aliases)?;
    writeln!(writer, "  Budget tiers:    {}", summary.tiers)?;
    writeln!(writer, "  Zone thresholds: {}", summary.zone_thresholds)?;
    writeln!(writer, "  Anti-patterns:   {}", summary.anti_pattern_count())?;
    writeln!(writer, "  Diagnostics:     {}", summary.diagnostic_count())?;
    writeln!(writer, "{}", "=".repeat(WIDTH))?;
    writeln!(writer, "{} catalog is consistent", "\u{2713}".green())?;
    Ok(())
}
