//! Anti-pattern catalog and category gating rules.
//!
//! Twenty-two named defects across four categories. Each entry points at the
//! detector check that produces it. The catalog exposes the scoring *policy*
//! of each category through [`scoring_effect`]; the arithmetic (weights, the
//! cap value) belongs to the scorer.

use std::fmt;
use std::str::FromStr;

use docstratum_id::{CategoryTag, parse_anti_pattern_id};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Anti-pattern severity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntiPatternCategory {
    /// Prevents automated consumption entirely.
    Critical,
    /// Breaks navigation.
    Structural,
    /// Degrades content quality.
    Content,
    /// Undermines long-term value.
    Strategic,
}

impl AntiPatternCategory {
    /// All categories, in registry order.
    pub const ALL: [Self; 4] = [
        Self::Critical,
        Self::Structural,
        Self::Content,
        Self::Strategic,
    ];

    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Structural => "structural",
            Self::Content => "content",
            Self::Strategic => "strategic",
        }
    }

    /// The category token used inside identifiers of this category.
    #[must_use]
    pub const fn tag(self) -> CategoryTag {
        match self {
            Self::Critical => CategoryTag::Crit,
            Self::Structural => CategoryTag::Struct,
            Self::Content => CategoryTag::Cont,
            Self::Strategic => CategoryTag::Strat,
        }
    }

    /// Number of registered anti-patterns in this category.
    #[must_use]
    pub const fn expected_count(self) -> usize {
        match self {
            Self::Critical | Self::Strategic => 4,
            Self::Structural => 5,
            Self::Content => 9,
        }
    }
}

impl fmt::Display for AntiPatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AntiPatternCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::unknown("anti-pattern category", s))
    }
}

/// Score dimension a gating rule acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreDimension {
    Structural,
    Content,
    /// The composite total, across dimensions.
    Composite,
}

impl fmt::Display for ScoreDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Structural => "structural",
            Self::Content => "content",
            Self::Composite => "composite",
        })
    }
}

/// How detections of a category affect the quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "rule", content = "dimension", rename_all = "snake_case")]
pub enum GatingRule {
    /// Any detection caps the dimension at a fixed ceiling, whatever else it scored.
    Cap(ScoreDimension),
    /// Each detection subtracts from the dimension.
    ProportionalDeduction(ScoreDimension),
    /// Each detected pattern subtracts a flat amount from the dimension.
    FlatDeduction(ScoreDimension),
}

impl GatingRule {
    /// The dimension the rule applies to.
    #[must_use]
    pub const fn dimension(self) -> ScoreDimension {
        match self {
            Self::Cap(dimension)
            | Self::ProportionalDeduction(dimension)
            | Self::FlatDeduction(dimension) => dimension,
        }
    }

    /// One-line description for reports.
    #[must_use]
    pub fn describe(self) -> String {
        match self {
            Self::Cap(dimension) => {
                format!("caps the {dimension} score at a fixed ceiling when detected")
            }
            Self::ProportionalDeduction(dimension) => {
                format!("deducts from the {dimension} score per detection")
            }
            Self::FlatDeduction(dimension) => {
                format!("applies a flat deduction to the {dimension} score per pattern")
            }
        }
    }
}

/// Fixed mapping from category to gating rule.
#[must_use]
pub const fn scoring_effect(category: AntiPatternCategory) -> GatingRule {
    match category {
        AntiPatternCategory::Critical => GatingRule::Cap(ScoreDimension::Structural),
        AntiPatternCategory::Structural => {
            GatingRule::ProportionalDeduction(ScoreDimension::Structural)
        }
        AntiPatternCategory::Content => GatingRule::ProportionalDeduction(ScoreDimension::Content),
        AntiPatternCategory::Strategic => GatingRule::FlatDeduction(ScoreDimension::Composite),
    }
}

/// All twenty-two anti-patterns.
///
/// Serializes as the published identifier (`"AP-STRUCT-004"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AntiPatternId {
    #[serde(rename = "AP-CRIT-001")]
    GhostFile,
    #[serde(rename = "AP-CRIT-002")]
    StructureChaos,
    #[serde(rename = "AP-CRIT-003")]
    EncodingDisaster,
    #[serde(rename = "AP-CRIT-004")]
    LinkVoid,

    #[serde(rename = "AP-STRUCT-001")]
    SitemapDump,
    #[serde(rename = "AP-STRUCT-002")]
    OrphanedSections,
    #[serde(rename = "AP-STRUCT-003")]
    DuplicateIdentity,
    #[serde(rename = "AP-STRUCT-004")]
    SectionShuffle,
    #[serde(rename = "AP-STRUCT-005")]
    NamingNebula,

    #[serde(rename = "AP-CONT-001")]
    CopyPastePlague,
    #[serde(rename = "AP-CONT-002")]
    BlankCanvas,
    #[serde(rename = "AP-CONT-003")]
    JargonJungle,
    #[serde(rename = "AP-CONT-004")]
    LinkDesert,
    #[serde(rename = "AP-CONT-005")]
    OutdatedOracle,
    #[serde(rename = "AP-CONT-006")]
    ExampleVoid,
    #[serde(rename = "AP-CONT-007")]
    FormulaicDescription,
    #[serde(rename = "AP-CONT-008")]
    SilentAgent,
    #[serde(rename = "AP-CONT-009")]
    VersionlessDrift,

    #[serde(rename = "AP-STRAT-001")]
    AutomationObsession,
    #[serde(rename = "AP-STRAT-002")]
    MonolithMonster,
    #[serde(rename = "AP-STRAT-003")]
    MetaDocumentationSpiral,
    #[serde(rename = "AP-STRAT-004")]
    PreferenceTrap,
}

impl AntiPatternId {
    /// Every id, in registry order.
    pub const ALL: [Self; 22] = [
        Self::GhostFile,
        Self::StructureChaos,
        Self::EncodingDisaster,
        Self::LinkVoid,
        Self::SitemapDump,
        Self::OrphanedSections,
        Self::DuplicateIdentity,
        Self::SectionShuffle,
        Self::NamingNebula,
        Self::CopyPastePlague,
        Self::BlankCanvas,
        Self::JargonJungle,
        Self::LinkDesert,
        Self::OutdatedOracle,
        Self::ExampleVoid,
        Self::FormulaicDescription,
        Self::SilentAgent,
        Self::VersionlessDrift,
        Self::AutomationObsession,
        Self::MonolithMonster,
        Self::MetaDocumentationSpiral,
        Self::PreferenceTrap,
    ];

    /// The published identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GhostFile => "AP-CRIT-001",
            Self::StructureChaos => "AP-CRIT-002",
            Self::EncodingDisaster => "AP-CRIT-003",
            Self::LinkVoid => "AP-CRIT-004",
            Self::SitemapDump => "AP-STRUCT-001",
            Self::OrphanedSections => "AP-STRUCT-002",
            Self::DuplicateIdentity => "AP-STRUCT-003",
            Self::SectionShuffle => "AP-STRUCT-004",
            Self::NamingNebula => "AP-STRUCT-005",
            Self::CopyPastePlague => "AP-CONT-001",
            Self::BlankCanvas => "AP-CONT-002",
            Self::JargonJungle => "AP-CONT-003",
            Self::LinkDesert => "AP-CONT-004",
            Self::OutdatedOracle => "AP-CONT-005",
            Self::ExampleVoid => "AP-CONT-006",
            Self::FormulaicDescription => "AP-CONT-007",
            Self::SilentAgent => "AP-CONT-008",
            Self::VersionlessDrift => "AP-CONT-009",
            Self::AutomationObsession => "AP-STRAT-001",
            Self::MonolithMonster => "AP-STRAT-002",
            Self::MetaDocumentationSpiral => "AP-STRAT-003",
            Self::PreferenceTrap => "AP-STRAT-004",
        }
    }

    /// Registry entry.
    #[must_use]
    pub fn entry(self) -> &'static AntiPatternEntry {
        lookup(self)
    }

    /// Category of this pattern.
    #[must_use]
    pub fn category(self) -> AntiPatternCategory {
        lookup(self).category
    }
}

impl fmt::Display for AntiPatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AntiPatternId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = parse_anti_pattern_id(s.trim())?.to_string();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == canonical)
            .ok_or_else(|| ParseError::unknown("anti-pattern", s))
    }
}

/// Registry entry for an anti-pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct AntiPatternEntry {
    /// Unique identifier.
    pub id: AntiPatternId,
    /// Human-readable name.
    pub name: &'static str,
    /// Severity category.
    pub category: AntiPatternCategory,
    /// The `CHECK-NNN` detector that produces this finding.
    pub check_id: &'static str,
    /// One-line description.
    pub description: &'static str,
}

impl AntiPatternEntry {
    const fn new(
        id: AntiPatternId,
        name: &'static str,
        category: AntiPatternCategory,
        check_id: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            category,
            check_id,
            description,
        }
    }
}

const REGISTRY: [AntiPatternEntry; 22] = {
    use AntiPatternCategory::{Content, Critical, Strategic, Structural};
    use AntiPatternId as Id;
    [
        AntiPatternEntry::new(
            Id::GhostFile,
            "Ghost File",
            Critical,
            "CHECK-001",
            "Empty or near-empty file that exists but provides no value",
        ),
        AntiPatternEntry::new(
            Id::StructureChaos,
            "Structure Chaos",
            Critical,
            "CHECK-002",
            "File lacks recognizable Markdown structure (no headers, no sections)",
        ),
        AntiPatternEntry::new(
            Id::EncodingDisaster,
            "Encoding Disaster",
            Critical,
            "CHECK-003",
            "Non-UTF-8 encoding or mixed line endings that break parsers",
        ),
        AntiPatternEntry::new(
            Id::LinkVoid,
            "Link Void",
            Critical,
            "CHECK-004",
            "All or most links are broken, empty, or malformed",
        ),
        AntiPatternEntry::new(
            Id::SitemapDump,
            "Sitemap Dump",
            Structural,
            "CHECK-005",
            "Entire sitemap dumped as flat link list with no organization",
        ),
        AntiPatternEntry::new(
            Id::OrphanedSections,
            "Orphaned Sections",
            Structural,
            "CHECK-006",
            "Sections with headers but no links or content",
        ),
        AntiPatternEntry::new(
            Id::DuplicateIdentity,
            "Duplicate Identity",
            Structural,
            "CHECK-007",
            "Multiple sections with identical or near-identical names",
        ),
        AntiPatternEntry::new(
            Id::SectionShuffle,
            "Section Shuffle",
            Structural,
            "CHECK-008",
            "Sections in illogical order (e.g., Advanced before Getting Started)",
        ),
        AntiPatternEntry::new(
            Id::NamingNebula,
            "Naming Nebula",
            Structural,
            "CHECK-009",
            "Section names that are vague, inconsistent, or non-standard",
        ),
        AntiPatternEntry::new(
            Id::CopyPastePlague,
            "Copy-Paste Plague",
            Content,
            "CHECK-010",
            "Large blocks of content duplicated from other sources without curation",
        ),
        AntiPatternEntry::new(
            Id::BlankCanvas,
            "Blank Canvas",
            Content,
            "CHECK-011",
            "Sections with placeholder text or no meaningful content",
        ),
        AntiPatternEntry::new(
            Id::JargonJungle,
            "Jargon Jungle",
            Content,
            "CHECK-012",
            "Heavy use of domain jargon without definitions",
        ),
        AntiPatternEntry::new(
            Id::LinkDesert,
            "Link Desert",
            Content,
            "CHECK-013",
            "Links without descriptions (bare URL lists)",
        ),
        AntiPatternEntry::new(
            Id::OutdatedOracle,
            "Outdated Oracle",
            Content,
            "CHECK-014",
            "Content references deprecated or outdated information",
        ),
        AntiPatternEntry::new(
            Id::ExampleVoid,
            "Example Void",
            Content,
            "CHECK-015",
            "No code examples despite being a technical project",
        ),
        AntiPatternEntry::new(
            Id::FormulaicDescription,
            "Formulaic Description",
            Content,
            "CHECK-019",
            "Auto-generated descriptions with identical patterns (Mintlify risk)",
        ),
        AntiPatternEntry::new(
            Id::SilentAgent,
            "Silent Agent",
            Content,
            "CHECK-020",
            "No LLM-facing guidance despite being an AI documentation file",
        ),
        AntiPatternEntry::new(
            Id::VersionlessDrift,
            "Versionless Drift",
            Content,
            "CHECK-021",
            "No version or date metadata, impossible to assess freshness",
        ),
        AntiPatternEntry::new(
            Id::AutomationObsession,
            "Automation Obsession",
            Strategic,
            "CHECK-016",
            "Fully auto-generated with no human curation or review",
        ),
        AntiPatternEntry::new(
            Id::MonolithMonster,
            "Monolith Monster",
            Strategic,
            "CHECK-017",
            "Single file exceeding 100K tokens with no decomposition",
        ),
        AntiPatternEntry::new(
            Id::MetaDocumentationSpiral,
            "Meta-Documentation Spiral",
            Strategic,
            "CHECK-018",
            "File documents itself or the llms.txt standard rather than the project",
        ),
        AntiPatternEntry::new(
            Id::PreferenceTrap,
            "Preference Trap",
            Strategic,
            "CHECK-022",
            "Content crafted to manipulate LLM behavior (trust laundering)",
        ),
    ]
};

const _: () = {
    let mut i = 0;
    while i < REGISTRY.len() {
        assert!(
            REGISTRY[i].id as usize == i,
            "anti-pattern registry is out of declaration order"
        );
        assert!(
            AntiPatternId::ALL[i] as usize == i,
            "AntiPatternId::ALL is out of declaration order"
        );
        i += 1;
    }
};

/// The registry, in declaration order.
pub static ANTI_PATTERN_REGISTRY: [AntiPatternEntry; 22] = REGISTRY;

/// Registry entry for an id.
#[must_use]
pub fn lookup(id: AntiPatternId) -> &'static AntiPatternEntry {
    &ANTI_PATTERN_REGISTRY[id as usize]
}

/// Category of an id.
#[must_use]
pub fn category_of(id: AntiPatternId) -> AntiPatternCategory {
    lookup(id).category
}

/// Registry entries of one category, in registry order.
pub fn entries_in(category: AntiPatternCategory) -> impl Iterator<Item = &'static AntiPatternEntry> {
    ANTI_PATTERN_REGISTRY
        .iter()
        .filter(move |entry| entry.category == category)
}

/// The registry entry produced by a detector check, if any.
#[must_use]
pub fn by_check(check_id: &str) -> Option<&'static AntiPatternEntry> {
    ANTI_PATTERN_REGISTRY
        .iter()
        .find(|entry| entry.check_id == check_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_by_category() {
        assert_eq!(ANTI_PATTERN_REGISTRY.len(), 22);
        for category in AntiPatternCategory::ALL {
            assert_eq!(
                entries_in(category).count(),
                category.expected_count(),
                "{category}"
            );
        }
    }

    #[test]
    fn test_lookup_is_total() {
        for id in AntiPatternId::ALL {
            assert_eq!(lookup(id).id, id);
        }
        assert_eq!(lookup(AntiPatternId::SectionShuffle).name, "Section Shuffle");
        assert_eq!(lookup(AntiPatternId::SectionShuffle).check_id, "CHECK-008");
    }

    #[test]
    fn test_descriptions_are_published_text() {
        use AntiPatternId as Id;
        let published = [
            (Id::GhostFile, "Empty or near-empty file that exists but provides no value"),
            (Id::StructureChaos, "File lacks recognizable Markdown structure (no headers, no sections)"),
            (Id::EncodingDisaster, "Non-UTF-8 encoding or mixed line endings that break parsers"),
            (Id::LinkVoid, "All or most links are broken, empty, or malformed"),
            (Id::SitemapDump, "Entire sitemap dumped as flat link list with no organization"),
            (Id::OrphanedSections, "Sections with headers but no links or content"),
            (Id::DuplicateIdentity, "Multiple sections with identical or near-identical names"),
            (Id::SectionShuffle, "Sections in illogical order (e.g., Advanced before Getting Started)"),
            (Id::NamingNebula, "Section names that are vague, inconsistent, or non-standard"),
            (Id::CopyPastePlague, "Large blocks of content duplicated from other sources without curation"),
            (Id::BlankCanvas, "Sections with placeholder text or no meaningful content"),
            (Id::JargonJungle, "Heavy use of domain jargon without definitions"),
            (Id::LinkDesert, "Links without descriptions (bare URL lists)"),
            (Id::OutdatedOracle, "Content references deprecated or outdated information"),
            (Id::ExampleVoid, "No code examples despite being a technical project"),
            (Id::FormulaicDescription, "Auto-generated descriptions with identical patterns (Mintlify risk)"),
            (Id::SilentAgent, "No LLM-facing guidance despite being an AI documentation file"),
            (Id::VersionlessDrift, "No version or date metadata, impossible to assess freshness"),
            (Id::AutomationObsession, "Fully auto-generated with no human curation or review"),
            (Id::MonolithMonster, "Single file exceeding 100K tokens with no decomposition"),
            (Id::MetaDocumentationSpiral, "File documents itself or the llms.txt standard rather than the project"),
            (Id::PreferenceTrap, "Content crafted to manipulate LLM behavior (trust laundering)"),
        ];
        assert_eq!(published.len(), ANTI_PATTERN_REGISTRY.len());
        for (id, description) in published {
            assert_eq!(lookup(id).description, description, "{id}");
        }
    }

    #[test]
    fn test_category_matches_identifier_tag() {
        for id in AntiPatternId::ALL {
            let parsed = parse_anti_pattern_id(id.as_str()).unwrap();
            assert_eq!(category_of(id).tag(), parsed.category, "{id}");
        }
    }

    #[test]
    fn test_scoring_effects_are_distinct() {
        let critical = scoring_effect(AntiPatternCategory::Critical);
        let strategic = scoring_effect(AntiPatternCategory::Strategic);
        assert_eq!(critical, GatingRule::Cap(ScoreDimension::Structural));
        assert_eq!(strategic, GatingRule::FlatDeduction(ScoreDimension::Composite));
        assert_ne!(critical, strategic);
        assert_eq!(
            scoring_effect(AntiPatternCategory::Structural).dimension(),
            ScoreDimension::Structural
        );
        assert_eq!(
            scoring_effect(AntiPatternCategory::Content).dimension(),
            ScoreDimension::Content
        );
    }

    #[test]
    fn test_describe_names_dimension() {
        let text = scoring_effect(AntiPatternCategory::Critical).describe();
        assert!(text.contains("caps the structural score"), "got: {text}");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "AP-CONT-007".parse::<AntiPatternId>().unwrap(),
            AntiPatternId::FormulaicDescription
        );
        assert!(matches!(
            "AP-CONT-010".parse::<AntiPatternId>(),
            Err(ParseError::Unknown { .. })
        ));
        assert!(matches!(
            "AP-X-001".parse::<AntiPatternId>(),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_by_check() {
        assert_eq!(by_check("CHECK-017").unwrap().id, AntiPatternId::MonolithMonster);
        assert!(by_check("CHECK-099").is_none());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&AntiPatternId::GhostFile).unwrap();
        assert_eq!(json, "\"AP-CRIT-001\"");
        let rule = serde_json::to_value(scoring_effect(AntiPatternCategory::Content)).unwrap();
        assert_eq!(
            rule,
            serde_json::json!({"rule": "proportional_deduction", "dimension": "content"})
        );
    }
}
