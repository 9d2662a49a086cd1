//! Token budget tiers and absolute escalation zones.
//!
//! Tiers describe the *intended* budget of a document given the size of the
//! project it documents. Zones describe *absolute* escalation for an observed
//! token count, regardless of tier. The two are deliberately independent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ParseError;

/// Page count at which a project needs at least the comprehensive tier.
pub const COMPREHENSIVE_MIN_PAGES: u32 = 100;
/// Page count at which a project needs the full tier.
pub const FULL_MIN_PAGES: u32 = 500;
/// Feature count at which a project needs at least the comprehensive tier.
pub const COMPREHENSIVE_MIN_FEATURES: u32 = 5;
/// Feature count at which a project needs the full tier.
pub const FULL_MIN_FEATURES: u32 = 20;

/// The three budget tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    Standard,
    Comprehensive,
    Full,
}

impl TierKind {
    /// All tiers, smallest first.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Comprehensive, Self::Full];

    /// Stable lower-case key (`standard`, `comprehensive`, `full`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Comprehensive => "comprehensive",
            Self::Full => "full",
        }
    }

    /// The tier definition.
    #[must_use]
    pub fn tier(self) -> &'static TokenBudgetTier {
        &TOKEN_BUDGET_TIERS[self as usize]
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TierKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::unknown("tier", s))
    }
}

/// Recommended file organization for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStrategy {
    Single,
    Dual,
    Multi,
}

impl FileStrategy {
    /// Descriptive label shown in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Dual => "dual (index + full)",
            Self::Multi => "multi (master + per-service)",
        }
    }
}

impl fmt::Display for FileStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A token budget tier definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct TokenBudgetTier {
    /// Which tier this is.
    pub kind: TierKind,
    /// Display name.
    pub name: &'static str,
    /// Lower bound of the range.
    pub min_tokens: u64,
    /// Upper bound of the range; a document at exactly this count is within budget.
    pub max_tokens: u64,
    /// When this tier applies.
    pub use_case: &'static str,
    /// Recommended file organization.
    pub file_strategy: FileStrategy,
}

/// The three tiers, smallest first. Adjacent tiers share a boundary.
pub static TOKEN_BUDGET_TIERS: [TokenBudgetTier; 3] = [
    TokenBudgetTier {
        kind: TierKind::Standard,
        name: "Standard",
        min_tokens: 1_500,
        max_tokens: 4_500,
        use_case: "Small projects, <100 pages, <5 features",
        file_strategy: FileStrategy::Single,
    },
    TokenBudgetTier {
        kind: TierKind::Comprehensive,
        name: "Comprehensive",
        min_tokens: 4_500,
        max_tokens: 12_000,
        use_case: "Medium projects, 100-500 pages, 5-20 features",
        file_strategy: FileStrategy::Dual,
    },
    TokenBudgetTier {
        kind: TierKind::Full,
        name: "Full",
        min_tokens: 12_000,
        max_tokens: 50_000,
        use_case: "Large projects, 500+ pages, 20+ features",
        file_strategy: FileStrategy::Multi,
    },
];

/// Look a tier up by its key, ignoring case.
#[must_use]
pub fn tier_by_key(key: &str) -> Option<&'static TokenBudgetTier> {
    key.parse::<TierKind>().ok().map(TierKind::tier)
}

/// Described size of the project a document covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectScale {
    /// Number of documentation pages.
    pub pages: u32,
    /// Number of distinct product features.
    pub features: u32,
}

impl ProjectScale {
    #[must_use]
    pub const fn new(pages: u32, features: u32) -> Self {
        Self { pages, features }
    }
}

/// Advisory tier for a project of the given scale.
///
/// Whichever of pages and features implies the larger tier wins, and a value
/// exactly on a boundary belongs to the larger tier.
#[must_use]
pub fn tier_for(scale: ProjectScale) -> &'static TokenBudgetTier {
    let kind = if scale.pages >= FULL_MIN_PAGES || scale.features >= FULL_MIN_FEATURES {
        TierKind::Full
    } else if scale.pages >= COMPREHENSIVE_MIN_PAGES
        || scale.features >= COMPREHENSIVE_MIN_FEATURES
    {
        TierKind::Comprehensive
    } else {
        TierKind::Standard
    };
    kind.tier()
}

/// Whether an observed count is over the tier's budget (backs W010).
#[must_use]
pub const fn budget_exceeded(token_count: u64, tier: &TokenBudgetTier) -> bool {
    token_count > tier.max_tokens
}

/// The tier whose range holds an observed count.
///
/// Ranges are half-open, so a shared boundary rounds up to the larger tier;
/// the last tier also includes its maximum. Counts below the smallest tier or
/// above the largest yield `None`. For rendering only: the intended tier of a
/// document comes from [`tier_for`].
#[must_use]
pub fn tier_containing(token_count: u64) -> Option<&'static TokenBudgetTier> {
    let last = TOKEN_BUDGET_TIERS.len() - 1;
    TOKEN_BUDGET_TIERS.iter().enumerate().find_map(|(i, tier)| {
        let below_max =
            token_count < tier.max_tokens || (i == last && token_count == tier.max_tokens);
        (token_count >= tier.min_tokens && below_max).then_some(tier)
    })
}

/// Absolute escalation bands for an observed token count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenZone {
    Optimal,
    Good,
    Degradation,
    AntiPattern,
    BeyondAllWindows,
}

impl TokenZone {
    /// All zones, in escalation order.
    pub const ALL: [Self; 5] = [
        Self::Optimal,
        Self::Good,
        Self::Degradation,
        Self::AntiPattern,
        Self::BeyondAllWindows,
    ];

    /// Snake-case name used in machine-readable output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Good => "good",
            Self::Degradation => "degradation",
            Self::AntiPattern => "anti_pattern",
            Self::BeyondAllWindows => "beyond_all_windows",
        }
    }

    /// What to do about a document in this zone.
    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Optimal => "No decomposition needed",
            Self::Good => "Consider a dual-file strategy",
            Self::Degradation => "Tiering strongly recommended",
            Self::AntiPattern => "Decompose before publishing",
            Self::BeyondAllWindows => "Exceeds all current context windows",
        }
    }
}

impl fmt::Display for TokenZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four increasing boundaries. Reaching a boundary escalates to the next zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneThresholds {
    /// Counts below this are [`TokenZone::Optimal`].
    pub optimal: u64,
    /// Counts below this are at most [`TokenZone::Good`].
    pub good: u64,
    /// Counts below this are at most [`TokenZone::Degradation`].
    pub degradation: u64,
    /// Counts below this are at most [`TokenZone::AntiPattern`]; beyond it nothing fits.
    pub anti_pattern: u64,
}

impl ZoneThresholds {
    /// Classify a count against these boundaries.
    #[must_use]
    pub const fn classify(&self, token_count: u64) -> TokenZone {
        if token_count < self.optimal {
            TokenZone::Optimal
        } else if token_count < self.good {
            TokenZone::Good
        } else if token_count < self.degradation {
            TokenZone::Degradation
        } else if token_count < self.anti_pattern {
            TokenZone::AntiPattern
        } else {
            TokenZone::BeyondAllWindows
        }
    }

    /// The boundaries in escalation order.
    #[must_use]
    pub const fn as_array(&self) -> [u64; 4] {
        [self.optimal, self.good, self.degradation, self.anti_pattern]
    }
}

/// The absolute zone boundaries.
pub const TOKEN_ZONES: ZoneThresholds = ZoneThresholds {
    optimal: 20_000,
    good: 50_000,
    degradation: 100_000,
    anti_pattern: 500_000,
};

const _: () = assert!(
    TOKEN_ZONES.optimal < TOKEN_ZONES.good
        && TOKEN_ZONES.good < TOKEN_ZONES.degradation
        && TOKEN_ZONES.degradation < TOKEN_ZONES.anti_pattern,
    "zone thresholds must be strictly increasing"
);

/// Zone of an observed token count.
#[must_use]
pub fn zone_for(token_count: u64) -> TokenZone {
    let zone = TOKEN_ZONES.classify(token_count);
    trace!(token_count, %zone, "token count classified");
    zone
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_contiguous() {
        for pair in TOKEN_BUDGET_TIERS.windows(2) {
            assert!(pair[0].min_tokens < pair[0].max_tokens);
            assert_eq!(pair[0].max_tokens, pair[1].min_tokens);
        }
        for kind in TierKind::ALL {
            assert_eq!(kind.tier().kind, kind);
        }
    }

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(zone_for(0), TokenZone::Optimal);
        assert_eq!(zone_for(19_999), TokenZone::Optimal);
        assert_eq!(zone_for(20_000), TokenZone::Good);
        assert_eq!(zone_for(25_000), TokenZone::Good);
        assert_eq!(zone_for(50_000), TokenZone::Degradation);
        assert_eq!(zone_for(99_999), TokenZone::Degradation);
        assert_eq!(zone_for(100_000), TokenZone::AntiPattern);
        assert_eq!(zone_for(499_999), TokenZone::AntiPattern);
        assert_eq!(zone_for(500_000), TokenZone::BeyondAllWindows);
        assert_eq!(zone_for(u64::MAX), TokenZone::BeyondAllWindows);
    }

    #[test]
    fn test_tier_for_scale() {
        assert_eq!(tier_for(ProjectScale::new(10, 2)).kind, TierKind::Standard);
        assert_eq!(tier_for(ProjectScale::new(250, 2)).kind, TierKind::Comprehensive);
        assert_eq!(tier_for(ProjectScale::new(10, 12)).kind, TierKind::Comprehensive);
        assert_eq!(tier_for(ProjectScale::new(800, 1)).kind, TierKind::Full);
        assert_eq!(tier_for(ProjectScale::new(0, 30)).kind, TierKind::Full);
    }

    #[test]
    fn test_tier_for_boundaries_round_up() {
        assert_eq!(tier_for(ProjectScale::new(99, 4)).kind, TierKind::Standard);
        assert_eq!(tier_for(ProjectScale::new(100, 0)).kind, TierKind::Comprehensive);
        assert_eq!(tier_for(ProjectScale::new(0, 5)).kind, TierKind::Comprehensive);
        assert_eq!(tier_for(ProjectScale::new(500, 0)).kind, TierKind::Full);
        assert_eq!(tier_for(ProjectScale::new(0, 20)).kind, TierKind::Full);
    }

    #[test]
    fn test_budget_exceeded_uses_tier_max() {
        let standard = TierKind::Standard.tier();
        assert!(!budget_exceeded(4_500, standard));
        assert!(budget_exceeded(4_501, standard));
        // Far below any absolute zone, still over the standard budget.
        assert_eq!(zone_for(4_501), TokenZone::Optimal);
        assert!(!budget_exceeded(4_501, TierKind::Full.tier()));
    }

    #[test]
    fn test_tier_containing() {
        assert_eq!(tier_containing(1_499), None);
        assert_eq!(tier_containing(1_500).unwrap().kind, TierKind::Standard);
        assert_eq!(tier_containing(4_500).unwrap().kind, TierKind::Comprehensive);
        assert_eq!(tier_containing(12_000).unwrap().kind, TierKind::Full);
        assert_eq!(tier_containing(50_000).unwrap().kind, TierKind::Full);
        assert_eq!(tier_containing(50_001), None);
    }

    #[test]
    fn test_tier_by_key() {
        assert_eq!(tier_by_key("comprehensive").unwrap().max_tokens, 12_000);
        assert_eq!(tier_by_key("FULL").unwrap().kind, TierKind::Full);
        assert!(tier_by_key("huge").is_none());
    }

    #[test]
    fn test_file_strategy_labels() {
        assert_eq!(TierKind::Standard.tier().file_strategy.label(), "single");
        assert_eq!(
            TierKind::Comprehensive.tier().file_strategy.to_string(),
            "dual (index + full)"
        );
    }
}
