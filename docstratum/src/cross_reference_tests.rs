#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::HashSet;

    use crate::anti_patterns::{ANTI_PATTERN_REGISTRY, AntiPatternId, by_check};
    use crate::budget::{TOKEN_ZONES, TierKind, TokenZone, budget_exceeded, zone_for};
    use crate::diagnostics::{DIAGNOSTICS, DiagnosticCode};
    use crate::sections::{CanonicalSection, resolve, validate_sequence};

    fn checks_of(code: DiagnosticCode) -> Vec<&'static str> {
        code.entry()
            .references
            .iter()
            .copied()
            .filter(|reference| reference.starts_with("CHECK-"))
            .collect()
    }

    // ---- diagnostics <-> anti-patterns ----

    #[test]
    fn test_every_diagnostic_check_is_registered() {
        for entry in &DIAGNOSTICS {
            for check in checks_of(entry.code) {
                assert!(
                    by_check(check).is_some(),
                    "{} references unknown {check}",
                    entry.code
                );
            }
        }
    }

    #[test]
    fn test_known_pairings() {
        let pairs = [
            (DiagnosticCode::E006BrokenLinks, AntiPatternId::LinkVoid),
            (DiagnosticCode::E007EmptyFile, AntiPatternId::GhostFile),
            (DiagnosticCode::E008ExceedsSizeLimit, AntiPatternId::MonolithMonster),
            (DiagnosticCode::W002NonCanonicalSectionName, AntiPatternId::NamingNebula),
            (DiagnosticCode::W003LinkMissingDescription, AntiPatternId::LinkDesert),
            (DiagnosticCode::W006FormulaicDescriptions, AntiPatternId::FormulaicDescription),
            (DiagnosticCode::W008SectionOrderNonCanonical, AntiPatternId::SectionShuffle),
            (DiagnosticCode::W011EmptySections, AntiPatternId::BlankCanvas),
            (DiagnosticCode::I001NoLlmInstructions, AntiPatternId::SilentAgent),
        ];
        for (code, pattern) in pairs {
            assert!(
                checks_of(code).contains(&pattern.entry().check_id),
                "{code} should map to {pattern}"
            );
        }
    }

    #[test]
    fn test_check_ids_are_unique_across_registry() {
        let checks: HashSet<&str> = ANTI_PATTERN_REGISTRY
            .iter()
            .map(|entry| entry.check_id)
            .collect();
        assert_eq!(checks.len(), ANTI_PATTERN_REGISTRY.len());
    }

    // ---- sections -> diagnostics ----

    #[test]
    fn test_unresolved_heading_maps_to_w002() {
        let resolution = resolve("Random Heading");
        assert!(!resolution.is_resolved());
        assert!(
            DiagnosticCode::W002NonCanonicalSectionName
                .message()
                .contains("11 canonical names")
        );
    }

    #[test]
    fn test_reordered_document_maps_to_section_shuffle() {
        let violation = validate_sequence(&[
            CanonicalSection::ApiReference,
            CanonicalSection::GettingStarted,
        ])
        .unwrap();
        assert!(violation.out_of_order.contains(&CanonicalSection::GettingStarted));
        assert_eq!(
            AntiPatternId::SectionShuffle.entry().check_id,
            checks_of(DiagnosticCode::W008SectionOrderNonCanonical)[0]
        );
    }

    // ---- budget -> diagnostics ----

    #[test]
    fn test_e008_threshold_is_degradation_boundary() {
        assert_eq!(TOKEN_ZONES.degradation, 100_000);
        assert!(DiagnosticCode::E008ExceedsSizeLimit.message().contains(">100K tokens"));
        assert_eq!(zone_for(TOKEN_ZONES.degradation), TokenZone::AntiPattern);
        assert_eq!(zone_for(TOKEN_ZONES.degradation - 1), TokenZone::Degradation);
    }

    #[test]
    fn test_w010_is_independent_of_zones() {
        let standard = TierKind::Standard.tier();
        assert!(budget_exceeded(5_000, standard));
        assert_eq!(zone_for(5_000), TokenZone::Optimal);
    }
}
