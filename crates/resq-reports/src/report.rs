use resq_core::{IncidentId, IncidentType, Location, Severity};
use resq_triage::{RoutingDecision, SensorAnalysis, ServiceLabel};
use serde::{Deserialize, Serialize};

/// A fully assembled incident report. Ephemeral: recomputed per invocation,
/// never persisted as its own row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub incident_id: IncidentId,
    pub location: Location,
    pub incident_type: IncidentType,
    pub severity: Severity,
    pub fault_percentage: u8,
    pub recommended_services: Vec<ServiceLabel>,
    pub analysis: SensorAnalysis,
    pub decision: RoutingDecision,
    pub summary: String,
    pub analysis_time_ms: u64,
}
