//! Runtime self-check over every static table.
//!
//! The const assertions next to each table catch format and ordering mistakes
//! at build time. [`verify`] covers the invariants that need iteration over
//! several tables at once: uniqueness, permutation of the canonical order,
//! tier contiguity and cross references between diagnostics and detector
//! checks.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use docstratum_id::{CHECK_PREFIX, parse_anti_pattern_id, parse_check_id};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::TAXONOMY_SCHEMA_VERSION;
use crate::anti_patterns::{ANTI_PATTERN_REGISTRY, AntiPatternCategory, entries_in};
use crate::budget::{TOKEN_BUDGET_TIERS, TOKEN_ZONES, TierKind};
use crate::diagnostics::{DIAGNOSTICS, REMEDIATION_UNAVAILABLE, Severity, codes_with};
use crate::sections::{CANONICAL_SEQUENCE_LEN, CanonicalSection, SECTION_ALIASES, resolve};

pub use crate::error::CatalogError;

/// Identifier grammar of a diagnostic code.
static DIAGNOSTIC_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^[EWI]\d{3}$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid diagnostic id regex: {err}"),
    }
});

/// Sizes of every verified table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct CatalogSummary {
    /// Export schema version of the verified catalog.
    pub schema_version: u32,
    /// Canonical sections, Optional included.
    pub sections: usize,
    /// Sections that take part in the ordering check.
    pub ordered_sections: usize,
    /// Curated alias entries.
    pub aliases: usize,
    /// Token budget tiers.
    pub tiers: usize,
    /// Zone escalation thresholds.
    pub zone_thresholds: usize,
    /// Anti-pattern count per category.
    pub anti_patterns: BTreeMap<AntiPatternCategory, usize>,
    /// Diagnostic count per severity.
    pub diagnostics: BTreeMap<Severity, usize>,
}

impl CatalogSummary {
    /// Total number of anti-patterns.
    #[must_use]
    pub fn anti_pattern_count(&self) -> usize {
        self.anti_patterns.values().sum()
    }

    /// Total number of diagnostic codes.
    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.values().sum()
    }
}

/// Check every catalog invariant.
///
/// # Errors
/// Returns the first [`CatalogError`] found. A released catalog never fails.
pub fn verify() -> Result<CatalogSummary, CatalogError> {
    let ordered_sections = verify_sections()?;
    verify_aliases()?;
    verify_tiers()?;
    verify_zones()?;
    let anti_patterns = verify_anti_patterns()?;
    let diagnostics = verify_diagnostics()?;

    let summary = CatalogSummary {
        schema_version: TAXONOMY_SCHEMA_VERSION,
        sections: CanonicalSection::ALL.len(),
        ordered_sections,
        aliases: SECTION_ALIASES.len(),
        tiers: TOKEN_BUDGET_TIERS.len(),
        zone_thresholds: TOKEN_ZONES.as_array().len(),
        anti_patterns,
        diagnostics,
    };
    info!(
        schema_version = summary.schema_version,
        anti_patterns = summary.anti_pattern_count(),
        diagnostics = summary.diagnostic_count(),
        "catalog verified"
    );
    Ok(summary)
}

fn expect_count(
    table: impl Into<String>,
    expected: usize,
    found: usize,
) -> Result<(), CatalogError> {
    if expected == found {
        Ok(())
    } else {
        Err(CatalogError::Count {
            table: table.into(),
            expected,
            found,
        })
    }
}

fn unique<'a>(
    table: &'static str,
    keys: impl IntoIterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(CatalogError::Duplicate {
                table,
                key: key.to_owned(),
            });
        }
    }
    Ok(())
}

// ---- sections ----

fn verify_sections() -> Result<usize, CatalogError> {
    expect_count("canonical sections", 11, CanonicalSection::ALL.len())?;
    unique(
        "canonical sections",
        CanonicalSection::ALL.iter().map(|section| section.display_name()),
    )?;

    let mut ranks: Vec<u8> = CanonicalSection::ALL
        .iter()
        .filter_map(|section| section.rank())
        .collect();
    ranks.sort_unstable();
    let expected: Vec<u8> = (1..=CANONICAL_SEQUENCE_LEN).collect();
    if ranks != expected || CanonicalSection::Optional.rank().is_some() {
        return Err(CatalogError::OrderNotPermutation {
            expected_max: CANONICAL_SEQUENCE_LEN,
            ranks: ranks
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    for section in CanonicalSection::ALL {
        if resolve(section.display_name()).section() != Some(section) {
            return Err(CatalogError::Mismatch {
                table: "canonical sections",
                id: section.display_name().to_owned(),
                detail: "does not resolve to itself".to_owned(),
            });
        }
    }
    debug!(sections = CanonicalSection::ALL.len(), "sections verified");
    Ok(ranks.len())
}

fn verify_aliases() -> Result<(), CatalogError> {
    expect_count("section aliases", 33, SECTION_ALIASES.len())?;
    unique("section aliases", SECTION_ALIASES.iter().map(|(alias, _)| *alias))?;

    for &(alias, target) in &SECTION_ALIASES {
        if alias.trim() != alias || alias.to_lowercase() != alias {
            return Err(CatalogError::AliasNotNormalized { alias });
        }
        let shadowed = CanonicalSection::ALL.iter().find(|section| {
            **section != target && section.display_name().eq_ignore_ascii_case(alias)
        });
        if shadowed.is_some() {
            return Err(CatalogError::AliasShadowsSection {
                alias,
                target: target.display_name(),
            });
        }
        if resolve(alias).section() != Some(target) {
            return Err(CatalogError::Mismatch {
                table: "section aliases",
                id: alias.to_owned(),
                detail: format!("does not resolve to {target}"),
            });
        }
    }
    debug!(aliases = SECTION_ALIASES.len(), "aliases verified");
    Ok(())
}

// ---- token budget ----

fn verify_tiers() -> Result<(), CatalogError> {
    expect_count("token budget tiers", TierKind::ALL.len(), TOKEN_BUDGET_TIERS.len())?;
    unique("token budget tiers", TOKEN_BUDGET_TIERS.iter().map(|tier| tier.kind.key()))?;

    for (index, tier) in TOKEN_BUDGET_TIERS.iter().enumerate() {
        if tier.kind as usize != index {
            return Err(CatalogError::Mismatch {
                table: "token budget tiers",
                id: tier.kind.key().to_owned(),
                detail: format!("is stored at position {index}"),
            });
        }
        if tier.min_tokens >= tier.max_tokens {
            return Err(CatalogError::Bounds {
                what: "token budget tiers",
                detail: format!(
                    "{} has min {} >= max {}",
                    tier.name, tier.min_tokens, tier.max_tokens
                ),
            });
        }
    }
    for pair in TOKEN_BUDGET_TIERS.windows(2) {
        if pair[0].max_tokens != pair[1].min_tokens {
            return Err(CatalogError::Bounds {
                what: "token budget tiers",
                detail: format!(
                    "{} ends at {} but {} starts at {}",
                    pair[0].name, pair[0].max_tokens, pair[1].name, pair[1].min_tokens
                ),
            });
        }
    }
    debug!(tiers = TOKEN_BUDGET_TIERS.len(), "tiers verified");
    Ok(())
}

fn verify_zones() -> Result<(), CatalogError> {
    let thresholds = TOKEN_ZONES.as_array();
    if thresholds.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(CatalogError::Bounds {
            what: "token zones",
            detail: format!(
                "thresholds are not strictly increasing: {}",
                thresholds
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" < ")
            ),
        });
    }
    debug!(thresholds = thresholds.len(), "zones verified");
    Ok(())
}

// ---- anti-patterns ----

fn verify_anti_patterns() -> Result<BTreeMap<AntiPatternCategory, usize>, CatalogError> {
    expect_count("anti-pattern registry", 22, ANTI_PATTERN_REGISTRY.len())?;
    unique(
        "anti-pattern registry",
        ANTI_PATTERN_REGISTRY.iter().map(|entry| entry.id.as_str()),
    )?;
    unique(
        "anti-pattern checks",
        ANTI_PATTERN_REGISTRY.iter().map(|entry| entry.check_id),
    )?;

    for entry in &ANTI_PATTERN_REGISTRY {
        let parsed = parse_anti_pattern_id(entry.id.as_str())?;
        parse_check_id(entry.check_id)?;
        if parsed.category != entry.category.tag() {
            return Err(CatalogError::Mismatch {
                table: "anti-pattern registry",
                id: entry.id.as_str().to_owned(),
                detail: format!("is filed under category {}", entry.category),
            });
        }
        if entry.name.is_empty() {
            return Err(metadata(entry.id.as_str(), "name", "is empty"));
        }
        if entry.description.is_empty() {
            return Err(metadata(entry.id.as_str(), "description", "is empty"));
        }
    }

    let mut counts = BTreeMap::new();
    for category in AntiPatternCategory::ALL {
        let found = entries_in(category).count();
        expect_count(
            format!("anti-pattern category {category}"),
            category.expected_count(),
            found,
        )?;
        counts.insert(category, found);
    }
    debug!(anti_patterns = ANTI_PATTERN_REGISTRY.len(), "anti-patterns verified");
    Ok(counts)
}

// ---- diagnostics ----

fn verify_diagnostics() -> Result<BTreeMap<Severity, usize>, CatalogError> {
    expect_count("diagnostic registry", 26, DIAGNOSTICS.len())?;
    unique(
        "diagnostic registry",
        DIAGNOSTICS.iter().map(|entry| entry.code.as_str()),
    )?;

    let known_checks: HashSet<&str> = ANTI_PATTERN_REGISTRY
        .iter()
        .map(|entry| entry.check_id)
        .collect();

    for entry in &DIAGNOSTICS {
        let id = entry.code.as_str();
        if !DIAGNOSTIC_ID_RE.is_match(id) {
            return Err(metadata(id, "identifier", "does not match ^[EWI]\\d{3}$"));
        }
        if entry.message.trim().is_empty() {
            return Err(metadata(id, "message", "is empty"));
        }
        if entry.message.contains(['\n', '\r']) {
            return Err(metadata(id, "message", "spans more than one line"));
        }
        if entry.remediation.trim().is_empty() {
            return Err(metadata(id, "remediation", "is empty"));
        }
        if entry.remediation == REMEDIATION_UNAVAILABLE {
            return Err(metadata(id, "remediation", "is the unavailable placeholder"));
        }
        for reference in entry.references {
            if reference.starts_with(CHECK_PREFIX) {
                parse_check_id(reference)?;
                if !known_checks.contains(reference) {
                    return Err(CatalogError::Mismatch {
                        table: "diagnostic registry",
                        id: id.to_owned(),
                        detail: format!("references unregistered check {reference}"),
                    });
                }
            }
        }
    }

    let expected = [(Severity::Error, 8), (Severity::Warning, 11), (Severity::Info, 7)];
    let mut counts = BTreeMap::new();
    for (severity, count) in expected {
        let found = codes_with(severity).count();
        expect_count(format!("{severity} diagnostics"), count, found)?;
        counts.insert(severity, found);
    }
    debug!(diagnostics = DIAGNOSTICS.len(), "diagnostics verified");
    Ok(counts)
}

fn metadata(id: &str, field: &'static str, problem: &'static str) -> CatalogError {
    CatalogError::Metadata {
        id: id.to_owned(),
        field,
        problem,
    }
}
