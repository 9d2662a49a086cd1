#![allow(clippy::unwrap_used)]
//! End-to-end scenarios over the public taxonomy API.
//!
//! These tests cover:
//! - Alias resolution of a common heading
//! - Unresolved heading
//! - Zone classification at and around thresholds
//! - Canonical sequence validation with and without Optional
//! - Gating rules of Critical vs Strategic anti-patterns
//! - The released catalog passing the self-check

use docstratum::anti_patterns::{AntiPatternCategory, GatingRule, ScoreDimension, scoring_effect};
use docstratum::budget::{ProjectScale, TierKind, TokenZone, tier_for, zone_for};
use docstratum::diagnostics::{Severity, number_of, severity_of};
use docstratum::integrity::verify;
use docstratum::sections::{CanonicalSection, Resolution, resolve, validate_sequence};

#[test]
fn test_quickstart_resolves_to_getting_started() {
    let resolution = resolve("quickstart");
    assert_eq!(resolution.section(), Some(CanonicalSection::GettingStarted));
    assert!(matches!(resolution, Resolution::Alias { alias: "quickstart", .. }));
}

#[test]
fn test_random_heading_is_unresolved() {
    assert_eq!(resolve("Random Heading"), Resolution::Unresolved);
}

#[test]
fn test_zone_thresholds_escalate() {
    assert_eq!(zone_for(25_000), TokenZone::Good);
    assert_eq!(zone_for(19_999), TokenZone::Optimal);
    assert_eq!(zone_for(100_000), TokenZone::AntiPattern);
    assert_eq!(zone_for(500_000), TokenZone::BeyondAllWindows);
}

#[test]
fn test_sequence_validation() {
    let violation =
        validate_sequence(&[CanonicalSection::GettingStarted, CanonicalSection::MasterIndex]);
    let violation = violation.unwrap();
    assert!(violation.out_of_order.contains(&CanonicalSection::MasterIndex));
    assert_eq!(
        violation.expected,
        vec![CanonicalSection::MasterIndex, CanonicalSection::GettingStarted]
    );

    assert!(
        validate_sequence(&[
            CanonicalSection::MasterIndex,
            CanonicalSection::Optional,
            CanonicalSection::GettingStarted,
        ])
        .is_none()
    );
}

#[test]
fn test_critical_caps_and_strategic_deducts_flat() {
    let critical = scoring_effect(AntiPatternCategory::Critical);
    let strategic = scoring_effect(AntiPatternCategory::Strategic);
    assert!(matches!(critical, GatingRule::Cap(ScoreDimension::Structural)));
    assert!(matches!(strategic, GatingRule::FlatDeduction(_)));
    assert_ne!(critical, strategic);
}

#[test]
fn test_severity_from_identifier_alone() {
    assert_eq!(severity_of("W011"), Some(Severity::Warning));
    assert_eq!(number_of("W011"), Some(11));
    assert_eq!(severity_of("E999"), Some(Severity::Error));
}

#[test]
fn test_advisory_tier() {
    assert_eq!(tier_for(ProjectScale::new(40, 2)).kind, TierKind::Standard);
    assert_eq!(tier_for(ProjectScale::new(40, 25)).kind, TierKind::Full);
}

#[test]
fn test_released_catalog_is_consistent() {
    let summary = verify().unwrap();
    assert_eq!(summary.diagnostic_count(), 26);
    assert_eq!(summary.anti_pattern_count(), 22);
}
