//! Error types for the taxonomy.
//!
//! Classification never fails on document data; these errors cover the two
//! remaining cases: user-supplied identifier strings that do not name a table
//! entry, and catalog invariant violations caught by the self-check.

use docstratum_id::IdError;
use thiserror::Error;

/// A string could not be converted into one of the closed identifier enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The string does not follow the identifier grammar at all.
    #[error(transparent)]
    Malformed(#[from] IdError),

    /// The string is well-formed but names nothing in the catalog.
    #[error("Unknown {kind} '{value}'")]
    Unknown {
        /// What was being parsed (`"diagnostic code"`, `"tier"`, ...).
        kind: &'static str,
        /// The raw input.
        value: String,
    },
}

impl ParseError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::Unknown {
            kind,
            value: value.to_owned(),
        }
    }
}

/// A catalog invariant does not hold.
///
/// These are build defects, never end-user conditions: `integrity::verify`
/// runs in the test suite and in `docstratum check`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// A table has the wrong number of entries.
    #[error("{table}: expected {expected} entries, found {found}")]
    Count {
        /// Table or partition name.
        table: String,
        /// Required size.
        expected: usize,
        /// Actual size.
        found: usize,
    },

    /// Two entries share an identifier or key.
    #[error("{table}: duplicate key '{key}'")]
    Duplicate {
        /// Table name.
        table: &'static str,
        /// The repeated key.
        key: String,
    },

    /// An alias key is not stored in normalized (trimmed, lower-case) form.
    #[error("alias '{alias}' is not normalized (trimmed, lower-case)")]
    AliasNotNormalized {
        /// The offending alias.
        alias: &'static str,
    },

    /// An alias shadows the display name of a different section.
    #[error("alias '{alias}' resolves to {target} but equals the display name of another section")]
    AliasShadowsSection {
        /// The offending alias.
        alias: &'static str,
        /// The section the alias points at.
        target: &'static str,
    },

    /// The canonical order is not a permutation of `1..=10` over the non-Optional sections.
    #[error("canonical order is not a permutation of 1..={expected_max}: {ranks}")]
    OrderNotPermutation {
        /// Highest rank expected.
        expected_max: u8,
        /// The ranks found, comma separated.
        ranks: String,
    },

    /// A tier or zone boundary is inconsistent.
    #[error("{what}: {detail}")]
    Bounds {
        /// Tier or zone table.
        what: &'static str,
        /// Description of the broken boundary.
        detail: String,
    },

    /// An identifier in a table is malformed.
    #[error(transparent)]
    Identifier(#[from] IdError),

    /// A registry entry disagrees with the identifier that indexes it.
    #[error("{table}: entry '{id}' {detail}")]
    Mismatch {
        /// Table name.
        table: &'static str,
        /// Identifier of the entry.
        id: String,
        /// What disagrees.
        detail: String,
    },

    /// A required text field is missing or malformed.
    #[error("{id}: {field} {problem}")]
    Metadata {
        /// Identifier of the entry.
        id: String,
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        problem: &'static str,
    },
}
