//! Shared identifier validation and parsing primitives for DocStratum.
//!
//! This crate is the single source of truth for the three identifier grammars
//! the taxonomy publishes, used by the `docstratum` tables (including their
//! compile-time assertions) and by the `docstratum` CLI when parsing user input:
//!
//! - diagnostic codes: `^[EWI]\d{3}$` (e.g. `E001`, `W011`)
//! - anti-pattern ids: `AP-{CRIT|STRUCT|CONT|STRAT}-NNN` (e.g. `AP-STRUCT-004`)
//! - detector check ids: `CHECK-NNN` (e.g. `CHECK-008`)
//!
//! The diagnostic helpers are `const fn` so that a malformed code literal in a
//! static table fails the build instead of surfacing at runtime.

use std::fmt;

use thiserror::Error;

/// Prefix shared by every anti-pattern identifier.
pub const ANTI_PATTERN_PREFIX: &str = "AP-";

/// Prefix shared by every detector check identifier.
pub const CHECK_PREFIX: &str = "CHECK-";

/// Length of a diagnostic code: one prefix letter plus three digits.
pub const DIAGNOSTIC_ID_LEN: usize = 4;

/// Number of digits in the numeric part of every identifier.
pub const ID_DIGITS: usize = 3;

/// Errors from identifier validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// A diagnostic code does not match `^[EWI]\d{3}$`.
    #[error("Invalid diagnostic code '{id}': {cause}")]
    Diagnostic {
        /// The raw identifier that failed validation.
        id: String,
        /// Human-readable description of the problem.
        cause: String,
    },

    /// An anti-pattern id does not match `AP-{CATEGORY}-NNN`.
    #[error("Invalid anti-pattern id '{id}': {cause}")]
    AntiPattern {
        /// The raw identifier that failed validation.
        id: String,
        /// Human-readable description of the problem.
        cause: String,
    },

    /// A check id does not match `CHECK-NNN`.
    #[error("Invalid check id '{id}': {cause}")]
    Check {
        /// The raw identifier that failed validation.
        id: String,
        /// Human-readable description of the problem.
        cause: String,
    },
}

/// The severity letter that opens a diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticPrefix {
    /// `E`
    Error,
    /// `W`
    Warning,
    /// `I`
    Info,
}

impl DiagnosticPrefix {
    /// Map an ASCII byte to a prefix. Anything other than `E`, `W` or `I` is `None`.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'E' => Some(Self::Error),
            b'W' => Some(Self::Warning),
            b'I' => Some(Self::Info),
            _ => None,
        }
    }

    /// The prefix letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Error => 'E',
            Self::Warning => 'W',
            Self::Info => 'I',
        }
    }
}

/// Result of successfully parsing a diagnostic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedDiagnosticId {
    /// Severity letter.
    pub prefix: DiagnosticPrefix,
    /// Trailing three digits as an integer (`W011` -> 11).
    pub number: u16,
}

impl fmt::Display for ParsedDiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.prefix.as_char(), self.number)
    }
}

/// The category token embedded in an anti-pattern id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryTag {
    /// `CRIT`
    Crit,
    /// `STRUCT`
    Struct,
    /// `CONT`
    Cont,
    /// `STRAT`
    Strat,
}

impl CategoryTag {
    /// All tags, in registry order.
    pub const ALL: [Self; 4] = [Self::Crit, Self::Struct, Self::Cont, Self::Strat];

    /// The token as it appears inside an identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crit => "CRIT",
            Self::Struct => "STRUCT",
            Self::Cont => "CONT",
            Self::Strat => "STRAT",
        }
    }

    /// Match a raw token against the four known tags (case-sensitive).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == token)
    }
}

/// Result of successfully parsing an anti-pattern id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedAntiPatternId {
    /// Category token.
    pub category: CategoryTag,
    /// Sequence number within the category.
    pub number: u16,
}

impl fmt::Display for ParsedAntiPatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ANTI_PATTERN_PREFIX}{}-{:03}",
            self.category.as_str(),
            self.number
        )
    }
}

/// Parse exactly three ASCII digits starting at `start`.
///
/// Returns `None` if fewer than three bytes remain or any of them is not a digit.
/// Leading zeros are the norm here (`001`), unlike free-form integers.
#[must_use]
pub const fn parse_three_digits(bytes: &[u8], start: usize) -> Option<u16> {
    if bytes.len() < start + ID_DIGITS {
        return None;
    }
    let mut value: u16 = 0;
    let mut i = start;
    while i < start + ID_DIGITS {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + (b - b'0') as u16;
        i += 1;
    }
    Some(value)
}

/// Severity prefix of a diagnostic code, taken from its first byte alone.
#[must_use]
pub const fn diagnostic_prefix(id: &str) -> Option<DiagnosticPrefix> {
    match id.as_bytes().first() {
        Some(&b) => DiagnosticPrefix::from_byte(b),
        None => None,
    }
}

/// Numeric part of a diagnostic code, or `None` if the code is malformed.
#[must_use]
pub const fn diagnostic_number(id: &str) -> Option<u16> {
    let bytes = id.as_bytes();
    if bytes.len() != DIAGNOSTIC_ID_LEN {
        return None;
    }
    parse_three_digits(bytes, 1)
}

/// Whether `id` matches `^[EWI]\d{3}$`.
#[must_use]
pub const fn is_valid_diagnostic_id(id: &str) -> bool {
    diagnostic_prefix(id).is_some() && diagnostic_number(id).is_some()
}

/// Validate and parse a diagnostic code.
///
/// # Errors
/// Returns [`IdError::Diagnostic`] if `id` does not match `^[EWI]\d{3}$`.
pub fn parse_diagnostic_id(id: &str) -> Result<ParsedDiagnosticId, IdError> {
    let fail = |cause: String| IdError::Diagnostic {
        id: id.to_owned(),
        cause,
    };

    if id.is_empty() {
        return Err(fail("must not be empty".to_owned()));
    }

    let Some(prefix) = diagnostic_prefix(id) else {
        return Err(fail("must start with one of 'E', 'W', 'I'".to_owned()));
    };

    if id.len() != DIAGNOSTIC_ID_LEN {
        return Err(fail(format!(
            "expected a prefix letter followed by exactly {ID_DIGITS} digits (got {} chars)",
            id.len()
        )));
    }

    let number = diagnostic_number(id)
        .ok_or_else(|| fail(format!("number must be {ID_DIGITS} ASCII digits, got '{}'", &id[1..])))?;

    Ok(ParsedDiagnosticId { prefix, number })
}

/// Validate and parse an anti-pattern id such as `AP-STRUCT-004`.
///
/// # Errors
/// Returns [`IdError::AntiPattern`] if the prefix, category token or number is invalid.
pub fn parse_anti_pattern_id(id: &str) -> Result<ParsedAntiPatternId, IdError> {
    let fail = |cause: String| IdError::AntiPattern {
        id: id.to_owned(),
        cause,
    };

    let Some(rest) = id.strip_prefix(ANTI_PATTERN_PREFIX) else {
        return Err(fail(format!("must start with '{ANTI_PATTERN_PREFIX}'")));
    };

    let Some((token, digits)) = rest.split_once('-') else {
        return Err(fail(
            "expected format AP-{CRIT|STRUCT|CONT|STRAT}-NNN".to_owned(),
        ));
    };

    let category = CategoryTag::from_token(token).ok_or_else(|| {
        fail(format!(
            "unknown category token '{token}', expected one of CRIT, STRUCT, CONT, STRAT"
        ))
    })?;

    if digits.len() != ID_DIGITS {
        return Err(fail(format!(
            "number must be exactly {ID_DIGITS} digits, got '{digits}'"
        )));
    }
    let number = parse_three_digits(digits.as_bytes(), 0)
        .ok_or_else(|| fail(format!("number must be ASCII digits, got '{digits}'")))?;

    Ok(ParsedAntiPatternId { category, number })
}

/// Validate a detector check id such as `CHECK-008` and return its number.
///
/// # Errors
/// Returns [`IdError::Check`] if `id` is not `CHECK-` followed by exactly three digits.
pub fn parse_check_id(id: &str) -> Result<u16, IdError> {
    let fail = |cause: String| IdError::Check {
        id: id.to_owned(),
        cause,
    };

    let Some(digits) = id.strip_prefix(CHECK_PREFIX) else {
        return Err(fail(format!("must start with '{CHECK_PREFIX}'")));
    };

    if digits.len() != ID_DIGITS {
        return Err(fail(format!(
            "number must be exactly {ID_DIGITS} digits, got '{digits}'"
        )));
    }

    parse_three_digits(digits.as_bytes(), 0)
        .ok_or_else(|| fail(format!("number must be ASCII digits, got '{digits}'")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    // ---- parse_three_digits ----

    #[test]
    fn test_three_digits_with_leading_zeros() {
        assert_eq!(parse_three_digits(b"001", 0), Some(1));
        assert_eq!(parse_three_digits(b"W011", 1), Some(11));
        assert_eq!(parse_three_digits(b"999", 0), Some(999));
    }

    #[test]
    fn test_three_digits_rejects_short_or_non_numeric() {
        assert_eq!(parse_three_digits(b"01", 0), None);
        assert_eq!(parse_three_digits(b"0a1", 0), None);
        assert_eq!(parse_three_digits(b"E01", 1), None);
    }

    // ---- diagnostic codes ----

    #[test]
    fn test_valid_diagnostic_ids() {
        assert!(is_valid_diagnostic_id("E001"));
        assert!(is_valid_diagnostic_id("W011"));
        assert!(is_valid_diagnostic_id("I007"));
    }

    #[test]
    fn test_invalid_diagnostic_ids() {
        assert!(!is_valid_diagnostic_id(""));
        assert!(!is_valid_diagnostic_id("X001"));
        assert!(!is_valid_diagnostic_id("e001"));
        assert!(!is_valid_diagnostic_id("E01"));
        assert!(!is_valid_diagnostic_id("E0001"));
        assert!(!is_valid_diagnostic_id("E00a"));
    }

    #[test]
    fn test_prefix_is_first_byte_only() {
        assert_eq!(diagnostic_prefix("W011"), Some(DiagnosticPrefix::Warning));
        // Prefix derivation does not look past the first character.
        assert_eq!(diagnostic_prefix("Wxyz"), Some(DiagnosticPrefix::Warning));
        assert_eq!(diagnostic_prefix("Q001"), None);
        assert_eq!(diagnostic_prefix(""), None);
    }

    #[test]
    fn test_parse_diagnostic_id() {
        let parsed = parse_diagnostic_id("W011").unwrap();
        assert_eq!(parsed.prefix, DiagnosticPrefix::Warning);
        assert_eq!(parsed.number, 11);
        assert_eq!(parsed.to_string(), "W011");
    }

    #[test]
    fn test_parse_diagnostic_id_bad_prefix() {
        let err = parse_diagnostic_id("X001").unwrap_err();
        assert!(err.to_string().contains("must start with one of"), "got: {err}");
    }

    #[test]
    fn test_parse_diagnostic_id_bad_length() {
        let err = parse_diagnostic_id("E0001").unwrap_err();
        assert!(err.to_string().contains("exactly 3 digits"), "got: {err}");
    }

    #[test]
    fn test_parse_diagnostic_id_bad_digits() {
        let err = parse_diagnostic_id("E0x1").unwrap_err();
        match err {
            IdError::Diagnostic { id, cause } => {
                assert_eq!(id, "E0x1");
                assert!(cause.contains("'0x1'"), "got: {cause}");
            }
            other => panic!("expected Diagnostic error, got: {other}"),
        }
    }

    #[test]
    fn test_parse_diagnostic_id_empty() {
        let err = parse_diagnostic_id("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"), "got: {err}");
    }

    // ---- anti-pattern ids ----

    #[test]
    fn test_parse_anti_pattern_id() {
        let parsed = parse_anti_pattern_id("AP-STRUCT-004").unwrap();
        assert_eq!(parsed.category, CategoryTag::Struct);
        assert_eq!(parsed.number, 4);
        assert_eq!(parsed.to_string(), "AP-STRUCT-004");
    }

    #[test]
    fn test_parse_anti_pattern_id_every_tag() {
        for tag in CategoryTag::ALL {
            let id = format!("AP-{}-001", tag.as_str());
            assert_eq!(parse_anti_pattern_id(&id).unwrap().category, tag);
        }
    }

    #[test]
    fn test_anti_pattern_missing_prefix() {
        let err = parse_anti_pattern_id("CRIT-001").unwrap_err();
        assert!(err.to_string().contains("must start with 'AP-'"), "got: {err}");
    }

    #[test]
    fn test_anti_pattern_unknown_category() {
        let err = parse_anti_pattern_id("AP-MISC-001").unwrap_err();
        assert!(err.to_string().contains("unknown category token 'MISC'"), "got: {err}");
    }

    #[test]
    fn test_anti_pattern_category_is_case_sensitive() {
        assert!(parse_anti_pattern_id("AP-crit-001").is_err());
    }

    #[test]
    fn test_anti_pattern_bad_number() {
        let err = parse_anti_pattern_id("AP-CRIT-01").unwrap_err();
        assert!(err.to_string().contains("exactly 3 digits"), "got: {err}");
        assert!(parse_anti_pattern_id("AP-CRIT-0x1").is_err());
        assert!(parse_anti_pattern_id("AP-CRIT").is_err());
    }

    // ---- check ids ----

    #[test]
    fn test_parse_check_id() {
        assert_eq!(parse_check_id("CHECK-001").unwrap(), 1);
        assert_eq!(parse_check_id("CHECK-022").unwrap(), 22);
    }

    #[test]
    fn test_check_id_rejects_malformed() {
        let err = parse_check_id("CHK-001").unwrap_err();
        assert!(err.to_string().contains("must start with 'CHECK-'"), "got: {err}");
        assert!(parse_check_id("CHECK-1").is_err());
        assert!(parse_check_id("CHECK-0001").is_err());
        assert!(parse_check_id("CHECK-abc").is_err());
    }
}
