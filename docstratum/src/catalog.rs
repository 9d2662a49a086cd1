//! Serializable snapshot of the whole taxonomy.
//!
//! Consumers that cannot link the crate (dashboards, documentation
//! generators, validators in other languages) read the catalog from this
//! export instead. Every view borrows from the static tables.

use serde::Serialize;

use crate::TAXONOMY_SCHEMA_VERSION;
use crate::anti_patterns::{
    ANTI_PATTERN_REGISTRY, AntiPatternCategory, AntiPatternEntry, GatingRule, scoring_effect,
};
use crate::budget::{TOKEN_BUDGET_TIERS, TOKEN_ZONES, TokenBudgetTier, TokenZone};
use crate::diagnostics::{DIAGNOSTICS, DiagnosticEntry, Severity};
use crate::sections::{CanonicalSection, aliases_for};

/// One canonical section with its rank and curated aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct SectionView {
    /// The section itself, serialized by display name.
    pub section: CanonicalSection,
    /// Position in the canonical sequence; `None` for Optional.
    pub rank: Option<u8>,
    /// Lower-case aliases that resolve to this section.
    pub aliases: Vec<&'static str>,
}

/// One escalation band: `[from, below)`, open-ended for the last zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct ZoneView {
    /// The zone this band classifies into.
    pub zone: TokenZone,
    /// Inclusive lower bound in tokens.
    pub from: u64,
    /// Exclusive upper bound; `None` for the last zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub below: Option<u64>,
    /// Advice for documents in this zone.
    pub guidance: &'static str,
}

/// A category together with the scoring policy it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct CategoryView {
    /// The category.
    pub category: AntiPatternCategory,
    /// Scoring policy applied when a pattern of this category is detected.
    pub gating_rule: GatingRule,
    /// Human-readable form of [`Self::gating_rule`].
    pub description: String,
}

/// A diagnostic entry with its derived fields made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct DiagnosticView {
    /// Severity derived from the identifier prefix.
    pub severity: Severity,
    /// Trailing digits of the identifier.
    pub number: u16,
    /// Validation level band the severity gates (`L0-L1`, `L2-L3`, `L4`).
    pub validation_levels: &'static str,
    /// The registry entry, flattened into the view when serialized.
    #[serde(flatten)]
    pub entry: &'static DiagnosticEntry,
}

/// The full catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct CatalogSnapshot {
    /// Bumped whenever the shape of this export changes.
    pub schema_version: u32,
    /// Canonical sections in sequence order, Optional last.
    pub sections: Vec<SectionView>,
    /// Budget tiers, smallest first.
    pub token_budget_tiers: &'static [TokenBudgetTier],
    /// Contiguous zone bands starting at zero.
    pub token_zones: Vec<ZoneView>,
    /// Gating rule of each anti-pattern category.
    pub anti_pattern_categories: Vec<CategoryView>,
    /// The full anti-pattern registry.
    pub anti_patterns: &'static [AntiPatternEntry],
    /// The full diagnostic catalog, in declaration order.
    pub diagnostics: Vec<DiagnosticView>,
}

/// Build a snapshot of every table.
#[must_use]
pub fn snapshot() -> CatalogSnapshot {
    CatalogSnapshot {
        schema_version: TAXONOMY_SCHEMA_VERSION,
        sections: CanonicalSection::ALL.into_iter().map(section_view).collect(),
        token_budget_tiers: &TOKEN_BUDGET_TIERS,
        token_zones: zone_views(),
        anti_pattern_categories: AntiPatternCategory::ALL
            .into_iter()
            .map(category_view)
            .collect(),
        anti_patterns: &ANTI_PATTERN_REGISTRY,
        diagnostics: DIAGNOSTICS.iter().map(diagnostic_view).collect(),
    }
}

/// Rank and aliases of one section.
#[must_use]
pub fn section_view(section: CanonicalSection) -> SectionView {
    SectionView {
        section,
        rank: section.rank(),
        aliases: aliases_for(section).collect(),
    }
}

/// Gating rule of one category.
#[must_use]
pub fn category_view(category: AntiPatternCategory) -> CategoryView {
    let gating_rule = scoring_effect(category);
    CategoryView {
        category,
        gating_rule,
        description: gating_rule.describe(),
    }
}

/// Explicit view of one diagnostic entry.
#[must_use]
pub fn diagnostic_view(entry: &'static DiagnosticEntry) -> DiagnosticView {
    let severity = entry.severity();
    DiagnosticView {
        severity,
        number: entry.code.number(),
        validation_levels: severity.validation_levels(),
        entry,
    }
}

fn zone_views() -> Vec<ZoneView> {
    let thresholds = TOKEN_ZONES.as_array();
    TokenZone::ALL
        .into_iter()
        .enumerate()
        .map(|(i, zone)| ZoneView {
            zone,
            from: if i == 0 { 0 } else { thresholds[i - 1] },
            below: thresholds.get(i).copied(),
            guidance: zone.guidance(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_covers_every_table() {
        let snap = snapshot();
        assert_eq!(snap.schema_version, TAXONOMY_SCHEMA_VERSION);
        assert_eq!(snap.sections.len(), 11);
        assert_eq!(snap.token_budget_tiers.len(), 3);
        assert_eq!(snap.token_zones.len(), 5);
        assert_eq!(snap.anti_pattern_categories.len(), 4);
        assert_eq!(snap.anti_patterns.len(), 22);
        assert_eq!(snap.diagnostics.len(), 26);
    }

    #[test]
    fn test_zone_views_are_contiguous() {
        let zones = zone_views();
        for pair in zones.windows(2) {
            assert_eq!(pair[0].below, Some(pair[1].from));
        }
        assert_eq!(zones[0].from, 0);
        assert_eq!(zones[4].zone, TokenZone::BeyondAllWindows);
        assert_eq!(zones[4].from, 500_000);
        assert!(zones[4].below.is_none());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["sections"][0]["section"], "Master Index");
        assert_eq!(json["sections"][10]["rank"], serde_json::Value::Null);
        assert_eq!(json["sections"][2]["aliases"][0], "quickstart");
        assert_eq!(json["token_budget_tiers"][1]["kind"], "comprehensive");
        assert_eq!(json["anti_patterns"][0]["id"], "AP-CRIT-001");
        assert_eq!(json["anti_pattern_categories"][0]["gating_rule"]["rule"], "cap");

        let w011 = &json["diagnostics"][18];
        assert_eq!(w011["code"], "W011");
        assert_eq!(w011["severity"], "WARNING");
        assert_eq!(w011["number"], 11);
        assert_eq!(w011["validation_levels"], "L2-L3");
    }
}
