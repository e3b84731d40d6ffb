use resq_core::IncidentType;
use serde::{Deserialize, Serialize};

/// Snapshot of the simulated sensor/video pipeline. Stands in for a real
/// computer-vision backend; values are fixed per incident type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorAnalysis {
    pub vehicle_count: u32,
    pub impact_point: String,
    pub trajectory_note: String,
    pub estimated_speed_kmh: f64,
}

pub fn simulate(incident_type: IncidentType) -> SensorAnalysis {
    match incident_type {
        IncidentType::Injury => SensorAnalysis {
            vehicle_count: 2,
            impact_point: "front driver side".to_string(),
            trajectory_note: "sudden lane change immediately before impact".to_string(),
            estimated_speed_kmh: 95.0,
        },
        IncidentType::Breakdown => SensorAnalysis {
            vehicle_count: 1,
            impact_point: "none".to_string(),
            trajectory_note: "vehicle drifted to the shoulder and stopped".to_string(),
            estimated_speed_kmh: 0.0,
        },
        // Unrecognized report categories fall back to the traffic profile.
        IncidentType::Traffic | IncidentType::Other => SensorAnalysis {
            vehicle_count: 3,
            impact_point: "rear bumper".to_string(),
            trajectory_note: "stop-and-go contact in congested flow".to_string(),
            estimated_speed_kmh: 40.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_fixed_per_type() {
        assert_eq!(simulate(IncidentType::Injury), simulate(IncidentType::Injury));
        assert_eq!(simulate(IncidentType::Breakdown).estimated_speed_kmh, 0.0);
        assert_eq!(simulate(IncidentType::Injury).vehicle_count, 2);
    }

    #[test]
    fn unknown_type_falls_back_to_traffic() {
        assert_eq!(
            simulate(IncidentType::Other),
            simulate(IncidentType::Traffic)
        );
    }
}
