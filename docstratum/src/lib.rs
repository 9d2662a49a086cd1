//! # docstratum
//!
//! Rule taxonomy for validating `llms.txt` navigation files.
//!
//! The crate is four independent lookup components over immutable tables:
//!
//! - [`sections`]: the eleven canonical section names, alias resolution and
//!   the canonical ordering.
//! - [`budget`]: token budget tiers and absolute escalation zones.
//! - [`anti_patterns`]: twenty-two named defects and the score gating rule
//!   of each category.
//! - [`diagnostics`]: the twenty-six emittable diagnostic codes.
//!
//! [`integrity::verify`] re-checks every table invariant and
//! [`catalog::snapshot`] exports the whole taxonomy.
//!
//! ## Quick Start
//!
//! ```rust
//! use docstratum::{DiagnosticCode, Severity, sections, budget};
//!
//! let resolved = sections::resolve("Quickstart");
//! assert_eq!(resolved.section(), Some(sections::CanonicalSection::GettingStarted));
//!
//! assert_eq!(budget::zone_for(25_000), budget::TokenZone::Good);
//!
//! let code: DiagnosticCode = "W011".parse().unwrap();
//! assert_eq!(code.severity(), Severity::Warning);
//! ```

pub mod anti_patterns;
pub mod budget;
pub mod catalog;
pub mod diagnostics;
mod error;
pub mod integrity;
pub mod sections;

// Test modules - add any new *_tests.rs files here
#[cfg(test)]
mod cross_reference_tests;

pub use anti_patterns::{AntiPatternCategory, AntiPatternId, GatingRule};
pub use budget::{TokenBudgetTier, TokenZone};
pub use diagnostics::{DiagnosticCode, Severity};
pub use error::{CatalogError, ParseError};
pub use sections::{CanonicalSection, Resolution};

/// Version of the taxonomy tables. Bumped whenever any table changes.
pub const TAXONOMY_SCHEMA_VERSION: u32 = 1;
