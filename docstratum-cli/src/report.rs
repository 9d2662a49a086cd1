//! Reports produced by each subcommand.
//!
//! Building a report never prints; rendering lives in [`crate::output`].

use anyhow::{Result, bail};
use docstratum::anti_patterns::{
    AntiPatternCategory, AntiPatternEntry, AntiPatternId, GatingRule, by_check, entries_in,
    scoring_effect,
};
use docstratum::budget::{
    ProjectScale, TOKEN_ZONES, TierKind, TokenBudgetTier, TokenZone, budget_exceeded,
    tier_containing, tier_for, zone_for,
};
use docstratum::catalog::{
    CategoryView, DiagnosticView, SectionView, category_view, diagnostic_view, section_view,
};
use docstratum::diagnostics::{DIAGNOSTICS, DiagnosticCode};
use docstratum::integrity::CatalogSummary;
use docstratum::sections::{
    CanonicalSection, Resolution, SequenceViolation, resolve, validate_sequence,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RenderConfig;

/// Any subcommand's output.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Sections(Vec<SectionView>),
    Resolve(Vec<ResolveRow>),
    Order(OrderReport),
    Budget(BudgetReport),
    AntiPatterns(AntiPatternReport),
    Codes(Vec<DiagnosticView>),
    Explain(Explanation),
    Check(CatalogSummary),
}

/// Resolution of one raw heading.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveRow {
    /// The heading as given.
    pub input: String,
    /// How the heading resolved, if at all.
    pub resolution: Resolution,
    /// W002 for headings that name no canonical section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<DiagnosticCode>,
}

/// Sequence check of a list of headings.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReport {
    /// Resolved sections, in the given order.
    pub sections: Vec<CanonicalSection>,
    /// Headings skipped because they name no canonical section.
    pub unresolved: Vec<String>,
    /// Present when the resolved sections are out of canonical order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<SequenceViolation>,
    /// W008 when the order is violated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<DiagnosticCode>,
}

/// Where the budget tier of a token count comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierSelection {
    /// A tier named explicitly.
    Key(TierKind),
    /// The advisory tier for a project scale.
    Scale(ProjectScale),
    /// No intended tier; only the observed range is reported.
    Unspecified,
}

/// Zone and tier classification of a token count.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    /// The classified count.
    pub token_count: u64,
    /// Zone the count falls into.
    pub zone: TokenZone,
    /// Advice for that zone.
    pub guidance: &'static str,
    /// Intended tier, when one was selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<&'static TokenBudgetTier>,
    /// Tier whose range holds the count, if any.
    pub observed_tier: Option<TierKind>,
    /// Whether the count is over the intended tier's maximum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exceeded: Option<bool>,
    /// E008 and W010, when they apply.
    pub diagnostics: Vec<DiagnosticCode>,
}

/// Registry listing with the gating rule of each listed category.
#[derive(Debug, Clone, Serialize)]
pub struct AntiPatternReport {
    /// Listed categories with their gating rules.
    pub categories: Vec<CategoryView>,
    /// Registry entries of those categories.
    pub entries: Vec<&'static AntiPatternEntry>,
}

/// Full metadata of one identifier.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Explanation {
    Diagnostic {
        #[serde(flatten)]
        view: DiagnosticView,
        /// Anti-patterns produced by the checks this code references.
        related_anti_patterns: Vec<&'static AntiPatternEntry>,
    },
    AntiPattern {
        #[serde(flatten)]
        entry: &'static AntiPatternEntry,
        gating_rule: GatingRule,
        /// Diagnostics that reference this pattern's check.
        related_diagnostics: Vec<DiagnosticCode>,
    },
}

// ---- builders ----

/// All canonical sections.
#[must_use]
pub fn sections() -> Report {
    Report::Sections(CanonicalSection::ALL.into_iter().map(section_view).collect())
}

/// Resolve each heading.
#[must_use]
pub fn resolve_names(names: &[String]) -> Report {
    let rows = names
        .iter()
        .map(|name| {
            let resolution = resolve(name);
            let diagnostic = if resolution.is_resolved() {
                None
            } else {
                warn!(name = name.as_str(), "section name is not canonical");
                Some(DiagnosticCode::W002NonCanonicalSectionName)
            };
            ResolveRow {
                input: name.clone(),
                resolution,
                diagnostic,
            }
        })
        .collect();
    Report::Resolve(rows)
}

/// Resolve headings, then check their sequence.
#[must_use]
pub fn order(names: &[String]) -> Report {
    let mut sections = Vec::with_capacity(names.len());
    let mut unresolved = Vec::new();
    for name in names {
        match resolve(name).section() {
            Some(section) => sections.push(section),
            None => {
                warn!(name = name.as_str(), "skipping non-canonical section name");
                unresolved.push(name.clone());
            }
        }
    }

    let violation = validate_sequence(&sections);
    let diagnostic = violation
        .as_ref()
        .map(|_| DiagnosticCode::W008SectionOrderNonCanonical);
    Report::Order(OrderReport {
        sections,
        unresolved,
        violation,
        diagnostic,
    })
}

/// Classify a token count.
#[must_use]
pub fn budget(token_count: u64, selection: TierSelection) -> Report {
    let zone = zone_for(token_count);
    let tier = match selection {
        TierSelection::Key(kind) => Some(kind.tier()),
        TierSelection::Scale(scale) => Some(tier_for(scale)),
        TierSelection::Unspecified => None,
    };
    let exceeded = tier.map(|tier| budget_exceeded(token_count, tier));

    let mut diagnostics = Vec::new();
    if token_count >= TOKEN_ZONES.degradation {
        diagnostics.push(DiagnosticCode::E008ExceedsSizeLimit);
    }
    if exceeded == Some(true) {
        diagnostics.push(DiagnosticCode::W010TokenBudgetExceeded);
    }
    debug!(token_count, %zone, findings = diagnostics.len(), "budget classified");

    Report::Budget(BudgetReport {
        token_count,
        zone,
        guidance: zone.guidance(),
        tier,
        observed_tier: tier_containing(token_count).map(|tier| tier.kind),
        exceeded,
        diagnostics,
    })
}

/// The registry, optionally narrowed to one category.
#[must_use]
pub fn anti_patterns(category: Option<AntiPatternCategory>) -> Report {
    let categories: Vec<AntiPatternCategory> = match category {
        Some(category) => vec![category],
        None => AntiPatternCategory::ALL.to_vec(),
    };
    Report::AntiPatterns(AntiPatternReport {
        entries: categories
            .iter()
            .flat_map(|category| entries_in(*category))
            .collect(),
        categories: categories.into_iter().map(category_view).collect(),
    })
}

/// Diagnostic catalog, filtered by the configured severity floor.
#[must_use]
pub fn codes(config: RenderConfig) -> Report {
    Report::Codes(
        DIAGNOSTICS
            .iter()
            .filter(|entry| config.shows(entry.severity()))
            .map(diagnostic_view)
            .collect(),
    )
}

/// Explain a diagnostic code or anti-pattern id, in any letter case.
///
/// # Errors
/// Returns an error if `id` names neither.
pub fn explain(id: &str) -> Result<Report> {
    let normalized = id.trim().to_ascii_uppercase();
    if let Ok(code) = normalized.parse::<DiagnosticCode>() {
        let entry = code.entry();
        let related_anti_patterns = entry
            .references
            .iter()
            .filter_map(|reference| by_check(reference))
            .collect();
        return Ok(Report::Explain(Explanation::Diagnostic {
            view: diagnostic_view(entry),
            related_anti_patterns,
        }));
    }

    let pattern = match normalized.parse::<AntiPatternId>() {
        Ok(pattern) => pattern,
        Err(err) => bail!("'{id}' is neither a diagnostic code nor an anti-pattern id: {err}"),
    };
    let entry = pattern.entry();
    let related_diagnostics = DIAGNOSTICS
        .iter()
        .filter(|diagnostic| diagnostic.references.contains(&entry.check_id))
        .map(|diagnostic| diagnostic.code)
        .collect();
    Ok(Report::Explain(Explanation::AntiPattern {
        entry,
        gating_rule: scoring_effect(entry.category),
        related_diagnostics,
    }))
}

/// Self-check result.
///
/// # Errors
/// Returns the first broken catalog invariant.
pub fn check() -> Result<Report> {
    let summary = docstratum::integrity::verify()?;
    Ok(Report::Check(summary))
}
