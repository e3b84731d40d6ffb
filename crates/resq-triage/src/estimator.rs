use crate::analysis::SensorAnalysis;
use rand::Rng;
use resq_core::{IncidentType, Severity};
use serde::{Deserialize, Serialize};

/// Speed above which the fault score takes a flat penalty.
const SPEEDING_THRESHOLD_KMH: f64 = 80.0;
const SPEEDING_PENALTY: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultAssessment {
    pub fault_percentage: u8,
    pub severity: Severity,
}

/// Heuristic fault/severity scoring. Pure apart from the injected randomness
/// source; breakdowns never touch the rng and always score 0/low.
pub fn estimate<R: Rng>(
    incident_type: IncidentType,
    analysis: &SensorAnalysis,
    rng: &mut R,
) -> FaultAssessment {
    let base: f64 = match incident_type {
        IncidentType::Injury => rng.gen_range(65.0..=85.0),
        IncidentType::Breakdown => {
            return FaultAssessment {
                fault_percentage: 0,
                severity: Severity::Low,
            };
        }
        IncidentType::Traffic => rng.gen_range(45.0..=75.0),
        IncidentType::Other => 50.0,
    };

    let adjusted = if analysis.estimated_speed_kmh > SPEEDING_THRESHOLD_KMH {
        base + SPEEDING_PENALTY
    } else {
        base
    };
    let fault_percentage = adjusted.clamp(0.0, 100.0).round() as u8;

    let severity = match incident_type {
        IncidentType::Injury => {
            if fault_percentage > 80 {
                Severity::Critical
            } else {
                Severity::High
            }
        }
        IncidentType::Breakdown => Severity::Low,
        IncidentType::Traffic | IncidentType::Other => {
            if fault_percentage > 70 {
                Severity::High
            } else {
                Severity::Medium
            }
        }
    };

    FaultAssessment {
        fault_percentage,
        severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::simulate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn slow_analysis() -> SensorAnalysis {
        SensorAnalysis {
            vehicle_count: 2,
            impact_point: "rear bumper".to_string(),
            trajectory_note: "low speed contact".to_string(),
            estimated_speed_kmh: 30.0,
        }
    }

    fn fast_analysis() -> SensorAnalysis {
        SensorAnalysis {
            estimated_speed_kmh: 90.0,
            ..slow_analysis()
        }
    }

    #[test]
    fn breakdown_is_deterministic_no_fault() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let assessment = estimate(IncidentType::Breakdown, &fast_analysis(), &mut rng);
            assert_eq!(assessment.fault_percentage, 0);
            assert_eq!(assessment.severity, Severity::Low);
        }
    }

    #[test]
    fn fault_is_always_within_bounds() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            for incident_type in [
                IncidentType::Injury,
                IncidentType::Breakdown,
                IncidentType::Traffic,
                IncidentType::Other,
            ] {
                for analysis in [slow_analysis(), fast_analysis()] {
                    let assessment = estimate(incident_type, &analysis, &mut rng);
                    assert!(assessment.fault_percentage <= 100);
                }
            }
        }
    }

    #[test]
    fn injury_base_range_with_speeding_penalty() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assessment = estimate(IncidentType::Injury, &fast_analysis(), &mut rng);
            assert!(
                (75..=95).contains(&assessment.fault_percentage),
                "fault {} out of expected range",
                assessment.fault_percentage
            );
            let expected = if assessment.fault_percentage > 80 {
                Severity::Critical
            } else {
                Severity::High
            };
            assert_eq!(assessment.severity, expected);
        }
    }

    #[test]
    fn traffic_base_range_without_penalty() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let assessment = estimate(IncidentType::Traffic, &slow_analysis(), &mut rng);
            assert!((45..=75).contains(&assessment.fault_percentage));
            let expected = if assessment.fault_percentage > 70 {
                Severity::High
            } else {
                Severity::Medium
            };
            assert_eq!(assessment.severity, expected);
        }
    }

    #[test]
    fn unknown_type_scores_fixed_fifty() {
        let mut rng = StdRng::seed_from_u64(11);
        let assessment = estimate(IncidentType::Other, &slow_analysis(), &mut rng);
        assert_eq!(assessment.fault_percentage, 50);
        assert_eq!(assessment.severity, Severity::Medium);
    }

    #[test]
    fn seeded_runs_reproduce() {
        let analysis = simulate(IncidentType::Injury);
        let first = estimate(
            IncidentType::Injury,
            &analysis,
            &mut StdRng::seed_from_u64(42),
        );
        let second = estimate(
            IncidentType::Injury,
            &analysis,
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(first, second);
    }
}
