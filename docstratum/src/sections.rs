//! Canonical section vocabulary, alias resolution and canonical ordering.
//!
//! The eleven section names and the alias table come from a frequency
//! analysis of published `llms.txt` files. Resolution is exact-match only:
//! aliases were curated against exact strings, so there is no fuzzy fallback.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ParseError;

/// Highest rank in the canonical sequence.
pub const CANONICAL_SEQUENCE_LEN: u8 = 10;

/// The eleven canonical section names.
///
/// Declaration order is the canonical sequence, with [`Self::Optional`] last,
/// so the derived `Ord` sorts sections the way a conformant document lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalSection {
    #[serde(rename = "Master Index")]
    MasterIndex,
    #[serde(rename = "LLM Instructions")]
    LlmInstructions,
    #[serde(rename = "Getting Started")]
    GettingStarted,
    #[serde(rename = "Core Concepts")]
    CoreConcepts,
    #[serde(rename = "API Reference")]
    ApiReference,
    Examples,
    Configuration,
    #[serde(rename = "Advanced Topics")]
    AdvancedTopics,
    Troubleshooting,
    #[serde(rename = "FAQ")]
    Faq,
    /// Supplementary material. Has no rank and may appear anywhere.
    Optional,
}

impl CanonicalSection {
    /// All sections in canonical order.
    pub const ALL: [Self; 11] = [
        Self::MasterIndex,
        Self::LlmInstructions,
        Self::GettingStarted,
        Self::CoreConcepts,
        Self::ApiReference,
        Self::Examples,
        Self::Configuration,
        Self::AdvancedTopics,
        Self::Troubleshooting,
        Self::Faq,
        Self::Optional,
    ];

    /// The exact display value a conformant document uses as its H2 text.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MasterIndex => "Master Index",
            Self::LlmInstructions => "LLM Instructions",
            Self::GettingStarted => "Getting Started",
            Self::CoreConcepts => "Core Concepts",
            Self::ApiReference => "API Reference",
            Self::Examples => "Examples",
            Self::Configuration => "Configuration",
            Self::AdvancedTopics => "Advanced Topics",
            Self::Troubleshooting => "Troubleshooting",
            Self::Faq => "FAQ",
            Self::Optional => "Optional",
        }
    }

    /// Position in the canonical 10-step sequence, `None` for [`Self::Optional`].
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::MasterIndex => Some(1),
            Self::LlmInstructions => Some(2),
            Self::GettingStarted => Some(3),
            Self::CoreConcepts => Some(4),
            Self::ApiReference => Some(5),
            Self::Examples => Some(6),
            Self::Configuration => Some(7),
            Self::AdvancedTopics => Some(8),
            Self::Troubleshooting => Some(9),
            Self::Faq => Some(10),
            Self::Optional => None,
        }
    }

    /// Curated aliases that resolve to this section, in table order.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        SECTION_ALIASES
            .iter()
            .filter(move |(_, section)| *section == self)
            .map(|(alias, _)| *alias)
    }
}

impl fmt::Display for CanonicalSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CanonicalSection {
    type Err = ParseError;

    /// Parses a display value, ignoring case. Aliases are not accepted here; use [`resolve`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::unknown("canonical section", s))
    }
}

/// Lower-cased aliases and the section each one normalizes to.
pub static SECTION_ALIASES: [(&str, CanonicalSection); 33] = [
    ("table of contents", CanonicalSection::MasterIndex),
    ("toc", CanonicalSection::MasterIndex),
    ("index", CanonicalSection::MasterIndex),
    ("docs", CanonicalSection::MasterIndex),
    ("documentation", CanonicalSection::MasterIndex),
    ("instructions", CanonicalSection::LlmInstructions),
    ("agent instructions", CanonicalSection::LlmInstructions),
    ("quickstart", CanonicalSection::GettingStarted),
    ("quick start", CanonicalSection::GettingStarted),
    ("installation", CanonicalSection::GettingStarted),
    ("setup", CanonicalSection::GettingStarted),
    ("concepts", CanonicalSection::CoreConcepts),
    ("key concepts", CanonicalSection::CoreConcepts),
    ("fundamentals", CanonicalSection::CoreConcepts),
    ("api", CanonicalSection::ApiReference),
    ("reference", CanonicalSection::ApiReference),
    ("endpoints", CanonicalSection::ApiReference),
    ("usage", CanonicalSection::Examples),
    ("use cases", CanonicalSection::Examples),
    ("tutorials", CanonicalSection::Examples),
    ("recipes", CanonicalSection::Examples),
    ("config", CanonicalSection::Configuration),
    ("settings", CanonicalSection::Configuration),
    ("options", CanonicalSection::Configuration),
    ("advanced", CanonicalSection::AdvancedTopics),
    ("internals", CanonicalSection::AdvancedTopics),
    ("debugging", CanonicalSection::Troubleshooting),
    ("common issues", CanonicalSection::Troubleshooting),
    ("known issues", CanonicalSection::Troubleshooting),
    ("frequently asked questions", CanonicalSection::Faq),
    ("supplementary", CanonicalSection::Optional),
    ("appendix", CanonicalSection::Optional),
    ("extras", CanonicalSection::Optional),
];

static ALIAS_INDEX: LazyLock<HashMap<&'static str, CanonicalSection>> =
    LazyLock::new(|| SECTION_ALIASES.iter().copied().collect());

/// Outcome of resolving a raw section heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// The heading matched a canonical display value (case-insensitive).
    Canonical {
        /// The matched section.
        section: CanonicalSection,
    },
    /// The heading matched a curated alias.
    Alias {
        /// The alias key that matched.
        alias: &'static str,
        /// The section it normalizes to.
        section: CanonicalSection,
    },
    /// Non-canonical heading. Callers report it as a warning, never a failure.
    Unresolved,
}

impl Resolution {
    /// The resolved section, if any.
    #[must_use]
    pub const fn section(self) -> Option<CanonicalSection> {
        match self {
            Self::Canonical { section } | Self::Alias { section, .. } => Some(section),
            Self::Unresolved => None,
        }
    }

    /// Whether the heading named a canonical section at all.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

/// Resolve a raw heading to its canonical section.
///
/// The heading is trimmed and lower-cased, then looked up in the alias table
/// first and compared against the canonical display values second. Anything
/// else is [`Resolution::Unresolved`].
#[must_use]
pub fn resolve(raw_name: &str) -> Resolution {
    let normalized = raw_name.trim().to_lowercase();

    if let Some((alias, section)) = ALIAS_INDEX.get_key_value(normalized.as_str()) {
        trace!(raw = raw_name, alias = *alias, %section, "section resolved via alias");
        return Resolution::Alias {
            alias: *alias,
            section: *section,
        };
    }

    if let Some(section) = CanonicalSection::ALL
        .into_iter()
        .find(|section| section.display_name().to_lowercase() == normalized)
    {
        trace!(raw = raw_name, %section, "section resolved via display name");
        return Resolution::Canonical { section };
    }

    trace!(raw = raw_name, "section name unresolved");
    Resolution::Unresolved
}

/// Fixed rank of a section, `None` for Optional.
#[must_use]
pub const fn order_of(section: CanonicalSection) -> Option<u8> {
    section.rank()
}

/// Curated aliases of a section, in table order.
pub fn aliases_for(section: CanonicalSection) -> impl Iterator<Item = &'static str> {
    section.aliases()
}

/// A document whose sections do not follow the canonical flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct SequenceViolation {
    /// Sections encountered after a section of equal or higher rank.
    ///
    /// Measured against the highest rank seen so far, so an early
    /// high-ranked section (FAQ first) marks everything after it, not
    /// itself. Compare against [`Self::expected`] to locate the misplaced one.
    pub out_of_order: BTreeSet<CanonicalSection>,
    /// The ranked sections of the document, rearranged into canonical order.
    pub expected: Vec<CanonicalSection>,
}

/// Check that the ranked sections of a document appear in strictly increasing rank.
///
/// `sections` must be in document order. Optional sections are ignored
/// wherever they appear. A repeated section counts as out of order. The
/// result is one violation for the whole document, not one per transposition.
///
/// Each section is compared with the highest rank seen before it, so
/// `[Faq, MasterIndex, GettingStarted]` reports `MasterIndex` and
/// `GettingStarted` rather than `Faq`.
#[must_use]
pub fn validate_sequence(sections: &[CanonicalSection]) -> Option<SequenceViolation> {
    let mut highest: Option<u8> = None;
    let mut out_of_order = BTreeSet::new();

    for &section in sections {
        let Some(rank) = section.rank() else {
            continue;
        };
        if highest.is_some_and(|top| rank <= top) {
            out_of_order.insert(section);
        } else {
            highest = Some(rank);
        }
    }

    if out_of_order.is_empty() {
        return None;
    }

    let mut expected: Vec<CanonicalSection> = sections
        .iter()
        .copied()
        .filter(|section| section.rank().is_some())
        .collect();
    expected.sort_by_key(|section| section.rank());

    Some(SequenceViolation {
        out_of_order,
        expected,
    })
}
