//! Diagnostic code registry.
//!
//! Every finding a validation engine emits is keyed by a [`DiagnosticCode`].
//! Codes are a permanent public contract: an identifier is never renumbered or
//! reused once published. Severity and number are derived from the identifier
//! string alone; message, remediation and upstream check references are
//! authored per code in a static table.
//!
//! | range     | severity | count |
//! |-----------|----------|-------|
//! | E001-E008 | Error    | 8     |
//! | W001-W011 | Warning  | 11    |
//! | I001-I007 | Info     | 7     |

use std::fmt;
use std::str::FromStr;

use docstratum_id::{
    DiagnosticPrefix, diagnostic_number, diagnostic_prefix, is_valid_diagnostic_id,
    parse_diagnostic_id,
};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Remediation text used by older catalogs when a code had none.
///
/// No entry in [`DIAGNOSTICS`] may carry it.
pub const REMEDIATION_UNAVAILABLE: &str = "No remediation available.";

/// Diagnostic severity levels.
///
/// Ordered from most to least severe, so sorting a list of findings by
/// severity puts errors first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Structural failure that prevents valid parsing or breaks conformance.
    Error,
    /// Deviation from best practices that degrades quality without breaking parsing.
    Warning,
    /// Observation or suggestion for improvement. Non-blocking.
    Info,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Self; 3] = [Self::Error, Self::Warning, Self::Info];

    /// Severity implied by a code prefix letter.
    #[must_use]
    pub const fn from_prefix(prefix: DiagnosticPrefix) -> Self {
        match prefix {
            DiagnosticPrefix::Error => Self::Error,
            DiagnosticPrefix::Warning => Self::Warning,
            DiagnosticPrefix::Info => Self::Info,
        }
    }

    /// Upper-case display form (`ERROR`, `WARNING`, `INFO`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }

    /// The validation level band this severity gates.
    #[must_use]
    pub const fn validation_levels(self) -> &'static str {
        match self {
            Self::Error => "L0-L1",
            Self::Warning => "L2-L3",
            Self::Info => "L4",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::unknown("severity", s))
    }
}

/// The complete, closed set of diagnostic codes.
///
/// Serializes as the bare identifier (`"E001"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // Structural errors
    #[serde(rename = "E001")]
    E001NoH1Title,
    #[serde(rename = "E002")]
    E002MultipleH1,
    #[serde(rename = "E003")]
    E003InvalidEncoding,
    #[serde(rename = "E004")]
    E004InvalidLineEndings,
    #[serde(rename = "E005")]
    E005InvalidMarkdown,
    #[serde(rename = "E006")]
    E006BrokenLinks,
    #[serde(rename = "E007")]
    E007EmptyFile,
    #[serde(rename = "E008")]
    E008ExceedsSizeLimit,

    // Quality warnings
    #[serde(rename = "W001")]
    W001MissingBlockquote,
    #[serde(rename = "W002")]
    W002NonCanonicalSectionName,
    #[serde(rename = "W003")]
    W003LinkMissingDescription,
    #[serde(rename = "W004")]
    W004NoCodeExamples,
    #[serde(rename = "W005")]
    W005CodeNoLanguage,
    #[serde(rename = "W006")]
    W006FormulaicDescriptions,
    #[serde(rename = "W007")]
    W007MissingVersionMetadata,
    #[serde(rename = "W008")]
    W008SectionOrderNonCanonical,
    #[serde(rename = "W009")]
    W009NoMasterIndex,
    #[serde(rename = "W010")]
    W010TokenBudgetExceeded,
    #[serde(rename = "W011")]
    W011EmptySections,

    // Informational
    #[serde(rename = "I001")]
    I001NoLlmInstructions,
    #[serde(rename = "I002")]
    I002NoConceptDefinitions,
    #[serde(rename = "I003")]
    I003NoFewShotExamples,
    #[serde(rename = "I004")]
    I004RelativeUrlsDetected,
    #[serde(rename = "I005")]
    I005Type2FullDetected,
    #[serde(rename = "I006")]
    I006OptionalSectionsUnmarked,
    #[serde(rename = "I007")]
    I007JargonWithoutDefinition,
}

impl DiagnosticCode {
    /// Every code, in declaration order.
    pub const ALL: [Self; 26] = [
        Self::E001NoH1Title,
        Self::E002MultipleH1,
        Self::E003InvalidEncoding,
        Self::E004InvalidLineEndings,
        Self::E005InvalidMarkdown,
        Self::E006BrokenLinks,
        Self::E007EmptyFile,
        Self::E008ExceedsSizeLimit,
        Self::W001MissingBlockquote,
        Self::W002NonCanonicalSectionName,
        Self::W003LinkMissingDescription,
        Self::W004NoCodeExamples,
        Self::W005CodeNoLanguage,
        Self::W006FormulaicDescriptions,
        Self::W007MissingVersionMetadata,
        Self::W008SectionOrderNonCanonical,
        Self::W009NoMasterIndex,
        Self::W010TokenBudgetExceeded,
        Self::W011EmptySections,
        Self::I001NoLlmInstructions,
        Self::I002NoConceptDefinitions,
        Self::I003NoFewShotExamples,
        Self::I004RelativeUrlsDetected,
        Self::I005Type2FullDetected,
        Self::I006OptionalSectionsUnmarked,
        Self::I007JargonWithoutDefinition,
    ];

    /// The published identifier, e.g. `"W011"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::E001NoH1Title => "E001",
            Self::E002MultipleH1 => "E002",
            Self::E003InvalidEncoding => "E003",
            Self::E004InvalidLineEndings => "E004",
            Self::E005InvalidMarkdown => "E005",
            Self::E006BrokenLinks => "E006",
            Self::E007EmptyFile => "E007",
            Self::E008ExceedsSizeLimit => "E008",
            Self::W001MissingBlockquote => "W001",
            Self::W002NonCanonicalSectionName => "W002",
            Self::W003LinkMissingDescription => "W003",
            Self::W004NoCodeExamples => "W004",
            Self::W005CodeNoLanguage => "W005",
            Self::W006FormulaicDescriptions => "W006",
            Self::W007MissingVersionMetadata => "W007",
            Self::W008SectionOrderNonCanonical => "W008",
            Self::W009NoMasterIndex => "W009",
            Self::W010TokenBudgetExceeded => "W010",
            Self::W011EmptySections => "W011",
            Self::I001NoLlmInstructions => "I001",
            Self::I002NoConceptDefinitions => "I002",
            Self::I003NoFewShotExamples => "I003",
            Self::I004RelativeUrlsDetected => "I004",
            Self::I005Type2FullDetected => "I005",
            Self::I006OptionalSectionsUnmarked => "I006",
            Self::I007JargonWithoutDefinition => "I007",
        }
    }

    /// Severity, derived from the identifier's first character.
    ///
    /// # Panics
    /// Never for a compiled catalog: identifier format is asserted at compile time.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match diagnostic_prefix(self.as_str()) {
            Some(prefix) => Severity::from_prefix(prefix),
            None => panic!("diagnostic identifier without a severity prefix"),
        }
    }

    /// Trailing three digits of the identifier (`W011` -> 11).
    ///
    /// Used for display and sorting only, never for severity.
    ///
    /// # Panics
    /// Never for a compiled catalog: identifier format is asserted at compile time.
    #[must_use]
    pub const fn number(self) -> u16 {
        match diagnostic_number(self.as_str()) {
            Some(number) => number,
            None => panic!("diagnostic identifier without a 3-digit number"),
        }
    }

    /// The registry entry for this code.
    #[must_use]
    pub fn entry(self) -> &'static DiagnosticEntry {
        &DIAGNOSTICS[self as usize]
    }

    /// One-line human-readable message.
    #[must_use]
    pub fn message(self) -> &'static str {
        self.entry().message
    }

    /// One-line remediation hint.
    #[must_use]
    pub fn remediation(self) -> &'static str {
        self.entry().remediation
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagnosticCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_diagnostic_id(s.trim())?;
        let canonical = parsed.to_string();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == canonical)
            .ok_or_else(|| ParseError::unknown("diagnostic code", s))
    }
}

/// Static metadata attached to one diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct DiagnosticEntry {
    /// The code this entry describes.
    pub code: DiagnosticCode,
    /// One-line message, no line breaks.
    pub message: &'static str,
    /// One-line remediation hint.
    pub remediation: &'static str,
    /// Upstream check identifiers this code maps to (`STR-001`, `CHECK-004`, ...).
    pub references: &'static [&'static str],
    /// Research note explaining the chosen severity, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl DiagnosticEntry {
    const fn new(
        code: DiagnosticCode,
        message: &'static str,
        remediation: &'static str,
        references: &'static [&'static str],
    ) -> Self {
        Self {
            code,
            message,
            remediation,
            references,
            note: None,
        }
    }

    const fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    /// Severity of [`Self::code`].
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.code.severity()
    }
}

const TABLE: [DiagnosticEntry; 26] = [
    // -- Errors: the file fails structural (L1) validation --
    DiagnosticEntry::new(
        DiagnosticCode::E001NoH1Title,
        "No H1 title found. Every llms.txt file MUST begin with exactly one H1 title.",
        "Add a single '# Title' as the first line of the file.",
        &["STR-001"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::E002MultipleH1,
        "Multiple H1 titles found. The spec requires exactly one H1.",
        "Remove all but the first H1 title. Use H2 for section headers.",
        &["STR-001"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::E003InvalidEncoding,
        "File is not valid UTF-8 encoding.",
        "Convert the file to UTF-8 encoding. Remove any BOM markers.",
        &["ENC-001"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::E004InvalidLineEndings,
        "File uses non-LF line endings (CR or CRLF detected).",
        "Convert line endings to LF (Unix-style). Most editors have this option.",
        &["ENC-002"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::E005InvalidMarkdown,
        "File contains invalid Markdown syntax that prevents parsing.",
        "Fix Markdown syntax errors. Use a Markdown linter to identify issues.",
        &["MD-001"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::E006BrokenLinks,
        "Section contains links with empty or malformed URLs.",
        "Fix or remove links with empty href values. Ensure all URLs are well-formed.",
        &["LNK-002", "CHECK-004"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::E007EmptyFile,
        "File is empty or contains only whitespace.",
        "Add content to the file. At minimum: H1 title, blockquote, one H2 section.",
        &["CHECK-001"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::E008ExceedsSizeLimit,
        "File exceeds the maximum recommended size (>100K tokens).",
        "Decompose into a tiered file strategy (index + full + per-section files).",
        &["SIZ-003", "CHECK-017"],
    ),
    // -- Warnings: the file misses best-practice (L3) validation --
    DiagnosticEntry::new(
        DiagnosticCode::W001MissingBlockquote,
        "No blockquote description found after the H1 title.",
        "Add a '> description' blockquote immediately after the H1 title.",
        &["STR-002"],
    )
    .with_note("55% real-world compliance (v0.0.2 enrichment), so this is a warning, not an error."),
    DiagnosticEntry::new(
        DiagnosticCode::W002NonCanonicalSectionName,
        "Section name does not match any of the 11 canonical names.",
        "Use canonical names where possible (see CanonicalSectionName enum).",
        &["NAM-001", "CHECK-009"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::W003LinkMissingDescription,
        "Link entry has no description text (bare URL only).",
        "Add a description after the link: '- [Title](url): Description of the page'.",
        &["CNT-004", "CHECK-013"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::W004NoCodeExamples,
        "File contains no code examples (no fenced code blocks found).",
        "Add code examples with language specifiers (```python, ```bash, etc.).",
        &["CNT-007", "CHECK-015"],
    )
    .with_note("Code examples are the strongest quality predictor (r ~ 0.65, v0.0.2c)."),
    DiagnosticEntry::new(
        DiagnosticCode::W005CodeNoLanguage,
        "Code block found without a language specifier.",
        "Add a language identifier after the opening triple backticks.",
        &["CNT-008"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::W006FormulaicDescriptions,
        "Multiple sections use identical or near-identical description patterns.",
        "Write unique, specific descriptions for each section.",
        &["CNT-005", "CHECK-019"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::W007MissingVersionMetadata,
        "No version or last-updated metadata found in the file.",
        "Add version metadata (e.g., 'Last updated: 2026-02-06').",
        &["CNT-015", "CHECK-021"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::W008SectionOrderNonCanonical,
        "Sections do not follow the canonical 10-step ordering.",
        "Reorder sections to match canonical sequence (see v0.0.4a \u{a7}6).",
        &["STR-004", "CHECK-008"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::W009NoMasterIndex,
        "No Master Index found as the first H2 section.",
        "Add a Master Index as the first H2 section with navigation links.",
        &["STR-003", "DECISION-010"],
    )
    .with_note("Files with Master Index achieve 87% vs. 31% LLM success rate."),
    DiagnosticEntry::new(
        DiagnosticCode::W010TokenBudgetExceeded,
        "File exceeds the recommended token budget for its tier.",
        "Trim content to stay within the tier's token budget.",
        &["SIZ-001", "DECISION-013"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::W011EmptySections,
        "One or more sections contain no meaningful content (placeholder text only).",
        "Add content or remove empty sections. Placeholder sections waste tokens.",
        &["CHECK-011"],
    ),
    // -- Informational: extended (L4) suggestions --
    DiagnosticEntry::new(
        DiagnosticCode::I001NoLlmInstructions,
        "No LLM Instructions section found.",
        "Add an LLM Instructions section with positive/negative directives.",
        &["CNT-010", "CHECK-020"],
    )
    .with_note("0% current adoption (v0.0.2), but strongest quality differentiator."),
    DiagnosticEntry::new(
        DiagnosticCode::I002NoConceptDefinitions,
        "No structured concept definitions found.",
        "Add concept definitions with IDs, relationships, and aliases.",
        &["CNT-013"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::I003NoFewShotExamples,
        "No few-shot Q&A examples found.",
        "Add intent-tagged Q&A pairs linked to concepts.",
        &[],
    )
    .with_note("Maps to v0.0.1b Gap #2 (P0)."),
    DiagnosticEntry::new(
        DiagnosticCode::I004RelativeUrlsDetected,
        "Relative URLs found in link entries (may need resolution).",
        "Convert relative URLs to absolute or document the base URL.",
        &["LNK-003"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::I005Type2FullDetected,
        "File classified as Type 2 Full (inline documentation dump, >250 KB).",
        "Consider creating a Type 1 Index companion file.",
        &[],
    )
    .with_note("Type 2 files are not spec-conformant but are valid in MCP contexts."),
    DiagnosticEntry::new(
        DiagnosticCode::I006OptionalSectionsUnmarked,
        "Optional sections not explicitly marked with token estimates.",
        "Mark optional sections so consumers can skip them to save context.",
        &["DECISION-011"],
    ),
    DiagnosticEntry::new(
        DiagnosticCode::I007JargonWithoutDefinition,
        "Domain-specific jargon used without inline definition.",
        "Define jargon inline or link to a concept definition.",
        &["CNT-014", "CHECK-012"],
    ),
];

// Index alignment and identifier format are build-breaking.
const _: () = {
    assert!(TABLE.len() == DiagnosticCode::ALL.len());
    let mut i = 0;
    while i < TABLE.len() {
        let code = TABLE[i].code;
        assert!(code as usize == i, "diagnostic table is out of declaration order");
        assert!(
            DiagnosticCode::ALL[i] as usize == i,
            "DiagnosticCode::ALL is out of declaration order"
        );
        assert!(
            is_valid_diagnostic_id(code.as_str()),
            "diagnostic identifier is not a prefix letter and three digits"
        );
        assert!(!TABLE[i].message.is_empty(), "diagnostic without a message");
        assert!(!TABLE[i].remediation.is_empty(), "diagnostic without a remediation");
        i += 1;
    }
};

/// The full diagnostic catalog, in declaration order.
pub static DIAGNOSTICS: [DiagnosticEntry; 26] = TABLE;

/// The full catalog in declaration order, for enumeration and export.
#[must_use]
pub fn all_codes() -> &'static [DiagnosticEntry] {
    &DIAGNOSTICS
}

/// Catalog entries with the given severity, in declaration order.
pub fn codes_with(severity: Severity) -> impl Iterator<Item = &'static DiagnosticEntry> {
    DIAGNOSTICS
        .iter()
        .filter(move |entry| entry.severity() == severity)
}

/// Severity of a well-formed identifier, from its first character alone.
///
/// Works for codes outside the catalog (`"W999"`). Malformed identifiers
/// (`"Wxyz"`, `"W11"`) yield `None`, the same inputs [`number_of`] rejects.
#[must_use]
pub fn severity_of(identifier: &str) -> Option<Severity> {
    if is_valid_diagnostic_id(identifier) {
        diagnostic_prefix(identifier).map(Severity::from_prefix)
    } else {
        None
    }
}

/// Numeric part of a well-formed identifier (`"W011"` -> 11).
///
/// Accepts exactly the identifiers [`severity_of`] accepts.
#[must_use]
pub fn number_of(identifier: &str) -> Option<u16> {
    if is_valid_diagnostic_id(identifier) {
        diagnostic_number(identifier)
    } else {
        None
    }
}
