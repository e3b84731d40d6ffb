use crate::analysis::SensorAnalysis;
use resq_core::{IncidentType, ResponsePriority, ServiceType};
use serde::{Deserialize, Serialize};

/// Escalated dispatches never drop below this ETA.
const ETA_FLOOR_MINUTES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceAction {
    Ambulance,
    TowTruck,
    TrafficControl,
    Police,
    None,
}

impl ServiceAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ambulance => "ambulance",
            Self::TowTruck => "tow truck",
            Self::TrafficControl => "traffic control",
            Self::Police => "police",
            Self::None => "none",
        }
    }

    pub fn service_type(&self) -> Option<ServiceType> {
        match self {
            Self::Ambulance => Some(ServiceType::Ambulance),
            Self::TowTruck => Some(ServiceType::TowTruck),
            Self::TrafficControl => Some(ServiceType::TrafficControl),
            Self::Police => Some(ServiceType::Police),
            Self::None => None,
        }
    }
}

/// A recommendation as it appears in the report. Labels are broader than the
/// dispatchable service types; `service_type` maps each onto the service it
/// materializes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLabel {
    Ambulance,
    TowTruck,
    TrafficControl,
    Police,
    RedCrescent,
}

impl ServiceLabel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ambulance => "ambulance",
            Self::TowTruck => "tow truck",
            Self::TrafficControl => "traffic control",
            Self::Police => "police",
            Self::RedCrescent => "red crescent",
        }
    }

    pub fn service_type(&self) -> ServiceType {
        match self {
            Self::Ambulance | Self::RedCrescent => ServiceType::Ambulance,
            Self::TowTruck => ServiceType::TowTruck,
            Self::TrafficControl => ServiceType::TrafficControl,
            Self::Police => ServiceType::Police,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub action: ServiceAction,
    pub priority: ResponsePriority,
    pub eta_minutes: u32,
}

/// Primary routing policy: a per-type default, then a fault-threshold
/// escalation overlay. Escalation never downgrades an already-immediate
/// dispatch.
pub fn route(
    incident_type: IncidentType,
    fault_percentage: u8,
    _analysis: &SensorAnalysis,
) -> RoutingDecision {
    let mut decision = match incident_type {
        IncidentType::Injury => RoutingDecision {
            action: ServiceAction::Ambulance,
            priority: ResponsePriority::Immediate,
            eta_minutes: 3,
        },
        IncidentType::Breakdown => RoutingDecision {
            action: ServiceAction::TowTruck,
            priority: ResponsePriority::Urgent,
            eta_minutes: 10,
        },
        IncidentType::Traffic | IncidentType::Other => RoutingDecision {
            action: ServiceAction::TrafficControl,
            priority: ResponsePriority::Normal,
            eta_minutes: 5,
        },
    };

    if fault_percentage > 80 {
        decision.priority = ResponsePriority::Immediate;
        decision.eta_minutes = decision.eta_minutes.saturating_sub(2).max(ETA_FLOOR_MINUTES);
    } else if fault_percentage > 60 && decision.priority != ResponsePriority::Immediate {
        decision.priority = ResponsePriority::Urgent;
    }

    decision
}

/// Secondary services worth standing up alongside the primary action.
pub fn recommended_services(incident_type: IncidentType) -> &'static [ServiceLabel] {
    match incident_type {
        IncidentType::Injury => &[
            ServiceLabel::Ambulance,
            ServiceLabel::TrafficControl,
            ServiceLabel::Police,
            ServiceLabel::RedCrescent,
        ],
        IncidentType::Breakdown => &[ServiceLabel::TowTruck, ServiceLabel::TrafficControl],
        IncidentType::Traffic | IncidentType::Other => &[ServiceLabel::TrafficControl],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::simulate;

    fn analysis() -> SensorAnalysis {
        simulate(IncidentType::Traffic)
    }

    #[test]
    fn type_defaults() {
        let injury = route(IncidentType::Injury, 0, &analysis());
        assert_eq!(injury.action, ServiceAction::Ambulance);
        assert_eq!(injury.priority, ResponsePriority::Immediate);
        assert_eq!(injury.eta_minutes, 3);

        let breakdown = route(IncidentType::Breakdown, 0, &analysis());
        assert_eq!(breakdown.action, ServiceAction::TowTruck);
        assert_eq!(breakdown.priority, ResponsePriority::Urgent);
        assert_eq!(breakdown.eta_minutes, 10);

        let traffic = route(IncidentType::Traffic, 0, &analysis());
        assert_eq!(traffic.action, ServiceAction::TrafficControl);
        assert_eq!(traffic.priority, ResponsePriority::Normal);
        assert_eq!(traffic.eta_minutes, 5);
    }

    #[test]
    fn unknown_type_routes_like_traffic() {
        assert_eq!(
            route(IncidentType::Other, 40, &analysis()),
            route(IncidentType::Traffic, 40, &analysis())
        );
        assert_eq!(
            recommended_services(IncidentType::Other),
            recommended_services(IncidentType::Traffic)
        );
    }

    #[test]
    fn high_fault_escalates_to_immediate() {
        for incident_type in [
            IncidentType::Injury,
            IncidentType::Breakdown,
            IncidentType::Traffic,
        ] {
            let decision = route(incident_type, 85, &analysis());
            assert_eq!(decision.priority, ResponsePriority::Immediate);
        }
    }

    #[test]
    fn moderate_fault_escalates_to_urgent_unless_already_immediate() {
        let traffic = route(IncidentType::Traffic, 65, &analysis());
        assert_eq!(traffic.priority, ResponsePriority::Urgent);
        assert_eq!(traffic.eta_minutes, 5);

        let injury = route(IncidentType::Injury, 65, &analysis());
        assert_eq!(injury.priority, ResponsePriority::Immediate);
    }

    #[test]
    fn escalation_respects_eta_floor() {
        let injury = route(IncidentType::Injury, 85, &analysis());
        assert_eq!(injury.eta_minutes, 2);

        let breakdown = route(IncidentType::Breakdown, 85, &analysis());
        assert_eq!(breakdown.eta_minutes, 8);

        for fault in 81..=100 {
            for incident_type in [
                IncidentType::Injury,
                IncidentType::Breakdown,
                IncidentType::Traffic,
                IncidentType::Other,
            ] {
                assert!(route(incident_type, fault, &analysis()).eta_minutes >= 2);
            }
        }
    }

    #[test]
    fn red_crescent_materializes_as_ambulance() {
        assert_eq!(
            ServiceLabel::RedCrescent.service_type(),
            ServiceType::Ambulance
        );
    }

    #[test]
    fn injury_recommendations() {
        let labels = recommended_services(IncidentType::Injury);
        assert_eq!(labels.len(), 4);
        assert!(labels.contains(&ServiceLabel::RedCrescent));
        assert!(labels.contains(&ServiceLabel::Police));
    }
}
