use crate::report::Report;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use resq_core::{IncidentId, ResqError, ResqResult};
use resq_storage::{IncidentRepository, Store};
use resq_triage::{estimate, recommended_services, route, simulate};
use std::sync::Arc;

/// Nominal latency of the simulated analysis pipeline, not a measurement.
const NOMINAL_ANALYSIS_MS: u64 = 1200;

pub struct ReportGenerator<S> {
    store: Arc<S>,
}

impl<S: Store> ReportGenerator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Assemble a report for an incident: analysis, then fault scoring, then
    /// routing. Fails with NotFound before any side effect when the id does
    /// not resolve.
    pub async fn generate(&self, incident_id: IncidentId) -> ResqResult<Report> {
        let mut rng = StdRng::from_entropy();
        self.generate_with_rng(incident_id, &mut rng).await
    }

    pub async fn generate_with_rng<R: Rng>(
        &self,
        incident_id: IncidentId,
        rng: &mut R,
    ) -> ResqResult<Report> {
        let incident = IncidentRepository::get(&*self.store, incident_id)
            .await
            .map_err(ResqError::from)?
            .ok_or_else(|| ResqError::not_found(format!("incident {incident_id} not found")))?;

        let analysis = simulate(incident.incident_type);
        let assessment = estimate(incident.incident_type, &analysis, rng);
        let decision = route(incident.incident_type, assessment.fault_percentage, &analysis);
        let recommendations = recommended_services(incident.incident_type).to_vec();

        let summary = format!(
            "{} incident at {}: fault {}%, dispatching {} ({} priority, ETA {} min)",
            incident.incident_type.label(),
            incident.location.text,
            assessment.fault_percentage,
            decision.action.label(),
            decision.priority.label(),
            decision.eta_minutes,
        );

        Ok(Report {
            incident_id,
            location: incident.location,
            incident_type: incident.incident_type,
            severity: assessment.severity,
            fault_percentage: assessment.fault_percentage,
            recommended_services: recommendations,
            analysis,
            decision,
            summary,
            analysis_time_ms: NOMINAL_ANALYSIS_MS,
        })
    }
}
