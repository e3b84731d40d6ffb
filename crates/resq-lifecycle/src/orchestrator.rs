use crate::alerts::emit_alerts;
use crate::singleflight::SingleFlight;
use resq_core::{
    now_epoch_millis, HistoryEntry, HistoryEntryId, Incident, IncidentId, IncidentStatus,
    MediaType, Party, PartyId, RecipientType, ResqError, ResqResult, Service, ServiceId,
    ServiceStatus, ServiceType, UserId,
};
use resq_reports::{Recipient, Report, ReportDispatcher, ReportGenerator};
use resq_storage::{
    HistoryRepository, IncidentRepository, MediaRepository, PartyRepository, ServiceRepository,
    Store,
};
use resq_vision::{AnalysisOutcome, VisionClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

const MEDIA_ANALYSIS_INSTRUCTION: &str =
    "Assess vehicle damage in the attached incident photos and fill the declared schema.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingOutcome {
    pub incident_id: IncidentId,
    pub services_created: usize,
    pub alerts_emitted: usize,
    pub recipients_notified: usize,
    pub report: Report,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub processed: usize,
    pub failed: usize,
}

/// Drives incidents through their lifecycle: report generation, service
/// routing, stakeholder alerts, status advancement, and report fan-out, with
/// a history entry behind every step. Steps are not rolled back; a failure
/// leaves earlier side effects committed.
pub struct Orchestrator<S> {
    store: Arc<S>,
    generator: ReportGenerator<S>,
    dispatcher: ReportDispatcher<S>,
    vision: Option<Arc<dyn VisionClient>>,
    in_flight: SingleFlight,
}

impl<S: Store> Orchestrator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            generator: ReportGenerator::new(Arc::clone(&store)),
            dispatcher: ReportDispatcher::new(Arc::clone(&store)),
            store,
            vision: None,
            in_flight: SingleFlight::new(),
        }
    }

    pub fn with_vision(mut self, client: Arc<dyn VisionClient>) -> Self {
        self.vision = Some(client);
        self
    }

    pub fn dispatcher(&self) -> &ReportDispatcher<S> {
        &self.dispatcher
    }

    pub async fn process_automatically(
        &self,
        incident_id: IncidentId,
    ) -> ResqResult<ProcessingOutcome> {
        let _guard = self.in_flight.begin(incident_id).ok_or_else(|| {
            ResqError::conflict(format!("incident {incident_id} is already being processed"))
        })?;
        let outcome = self.process_inner(incident_id).await?;
        metrics::counter!("resq_incidents_processed_total").increment(1);
        Ok(outcome)
    }

    async fn process_inner(&self, incident_id: IncidentId) -> ResqResult<ProcessingOutcome> {
        // Step 1: the report. NotFound propagates before any write.
        let report = self.generator.generate(incident_id).await?;
        self.append_history(
            incident_id,
            "report_generated",
            format!(
                "severity {:?}, fault {}%",
                report.severity, report.fault_percentage
            ),
        )
        .await?;

        // Step 2: materialize service rows for the routing decision.
        let services_created = self.create_services(&report).await?;
        self.append_history(
            incident_id,
            "services_routed",
            format!(
                "{} service(s) created, primary action {}",
                services_created,
                report.decision.action.label()
            ),
        )
        .await?;

        // Step 3: stakeholder alerts, log-only in this core.
        let alerts_emitted = emit_alerts(&report);

        // Step 4: advance the incident and persist the computed severity.
        self.advance_to_in_progress(incident_id, &report).await?;

        // Step 5: fan the report out to every involved party.
        let recipients_notified = self.notify_parties(incident_id, &report).await?;
        metrics::counter!("resq_reports_dispatched_total").increment(recipients_notified as u64);

        info!(
            incident_id = %incident_id,
            services_created,
            alerts_emitted,
            recipients_notified,
            "automatic processing complete"
        );

        Ok(ProcessingOutcome {
            incident_id,
            services_created,
            alerts_emitted,
            recipients_notified,
            report,
        })
    }

    async fn create_services(&self, report: &Report) -> ResqResult<usize> {
        let primary = report.decision.action.service_type();
        let mut service_types: Vec<ServiceType> = Vec::new();
        if let Some(primary) = primary {
            service_types.push(primary);
        }
        for label in &report.recommended_services {
            let service_type = label.service_type();
            if Some(service_type) != primary && !service_types.contains(&service_type) {
                service_types.push(service_type);
            }
        }

        let now = now_epoch_millis();
        for service_type in &service_types {
            let service = Service {
                id: ServiceId::new(),
                incident_id: report.incident_id,
                service_type: *service_type,
                status: ServiceStatus::Pending,
                assignee: None,
                created_at_ms: now,
                updated_at_ms: now,
            };
            ServiceRepository::upsert(&*self.store, service)
                .await
                .map_err(ResqError::from)?;
        }
        Ok(service_types.len())
    }

    async fn advance_to_in_progress(
        &self,
        incident_id: IncidentId,
        report: &Report,
    ) -> ResqResult<()> {
        let mut incident = self.require_incident(incident_id).await?;
        if !incident
            .status
            .can_advance_to(IncidentStatus::InProgress)
        {
            warn!(
                incident_id = %incident_id,
                status = ?incident.status,
                "incident not in a state that advances to in_progress, leaving as-is"
            );
            return Ok(());
        }
        let previous = incident.status;
        incident.status = IncidentStatus::InProgress;
        incident.severity = report.severity;
        incident.updated_at_ms = now_epoch_millis();
        IncidentRepository::upsert(&*self.store, incident)
            .await
            .map_err(ResqError::from)?;
        self.append_history(
            incident_id,
            "status_changed",
            format!("{:?} -> InProgress", previous),
        )
        .await
    }

    async fn notify_parties(&self, incident_id: IncidentId, report: &Report) -> ResqResult<usize> {
        let parties = PartyRepository::list_by_incident(&*self.store, incident_id)
            .await
            .map_err(ResqError::from)?;
        let recipients: Vec<Recipient> = parties
            .iter()
            .map(|party| Recipient {
                recipient_type: RecipientType::Party,
                email: None,
                phone: Some(party.phone.clone()),
                name: Some(party.name.clone()),
            })
            .collect();
        let outcome = self.dispatcher.send(incident_id, &recipients).await?;
        // The summary travels with each send; transport is external.
        info!(
            incident_id = %incident_id,
            recipients = outcome.sent_count,
            summary = %report.summary,
            "report queued for involved parties"
        );
        Ok(outcome.sent_count)
    }

    /// Sweep every pending incident. Failures are isolated per item: logged,
    /// counted, and the sweep moves on.
    pub async fn monitor_pending(&self) -> ResqResult<SweepOutcome> {
        let pending = IncidentRepository::list_by_status(&*self.store, IncidentStatus::Pending)
            .await
            .map_err(ResqError::from)?;

        let mut outcome = SweepOutcome::default();
        for incident in pending {
            match self.process_automatically(incident.id).await {
                Ok(_) => outcome.processed += 1,
                Err(err) => {
                    warn!(
                        incident_id = %incident.id,
                        error = %err,
                        "automatic processing failed, continuing sweep"
                    );
                    metrics::counter!("resq_incidents_failed_total").increment(1);
                    outcome.failed += 1;
                }
            }
        }
        info!(
            processed = outcome.processed,
            failed = outcome.failed,
            "pending sweep complete"
        );
        Ok(outcome)
    }

    /// Operator-driven status write. Deliberately permissive: the stored
    /// status is whatever was last written, and the override is recorded in
    /// history.
    pub async fn update_status(
        &self,
        incident_id: IncidentId,
        next: IncidentStatus,
        operator: UserId,
    ) -> ResqResult<Incident> {
        let mut incident = self.require_incident(incident_id).await?;
        let previous = incident.status;
        incident.status = next;
        incident.updated_at_ms = now_epoch_millis();
        IncidentRepository::upsert(&*self.store, incident.clone())
            .await
            .map_err(ResqError::from)?;

        let entry = HistoryEntry {
            id: HistoryEntryId::new(),
            incident_id,
            action: "status_updated".to_string(),
            details: format!("{:?} -> {:?}", previous, next),
            performed_by: Some(operator),
            created_at_ms: now_epoch_millis(),
        };
        HistoryRepository::append(&*self.store, entry)
            .await
            .map_err(ResqError::from)?;
        Ok(incident)
    }

    /// Operator override of a computed fault score.
    pub async fn override_party_fault(
        &self,
        party_id: PartyId,
        fault_percentage: u8,
        operator: UserId,
    ) -> ResqResult<Party> {
        if fault_percentage > 100 {
            return Err(ResqError::invalid_input(
                "fault percentage must be within [0, 100]",
            ));
        }
        let mut party = PartyRepository::get(&*self.store, party_id)
            .await
            .map_err(ResqError::from)?
            .ok_or_else(|| ResqError::not_found(format!("party {party_id} not found")))?;
        let previous = party.fault_percentage;
        party.fault_percentage = Some(fault_percentage);
        party.updated_at_ms = now_epoch_millis();
        PartyRepository::upsert(&*self.store, party.clone())
            .await
            .map_err(ResqError::from)?;

        let entry = HistoryEntry {
            id: HistoryEntryId::new(),
            incident_id: party.incident_id,
            action: "fault_overridden".to_string(),
            details: format!("{:?} -> {}% for {}", previous, fault_percentage, party.name),
            performed_by: Some(operator),
            created_at_ms: now_epoch_millis(),
        };
        HistoryRepository::append(&*self.store, entry)
            .await
            .map_err(ResqError::from)?;
        Ok(party)
    }

    /// Run the external vision model over the incident's image media.
    /// Degrades to an unsuccessful outcome when no client is configured or
    /// nothing is analyzable; only a missing incident is an error.
    pub async fn analyze_media(&self, incident_id: IncidentId) -> ResqResult<AnalysisOutcome> {
        self.require_incident(incident_id).await?;

        let Some(vision) = &self.vision else {
            warn!(incident_id = %incident_id, "no vision collaborator configured");
            return Ok(AnalysisOutcome::failure());
        };
        let media = MediaRepository::list_by_incident(&*self.store, incident_id)
            .await
            .map_err(ResqError::from)?;
        let image_urls: Vec<String> = media
            .iter()
            .filter(|row| row.media_type == MediaType::Image)
            .map(|row| row.url.clone())
            .collect();
        if image_urls.is_empty() {
            warn!(incident_id = %incident_id, "no image media to analyze");
            return Ok(AnalysisOutcome::failure());
        }

        let outcome = vision.analyze(&image_urls, MEDIA_ANALYSIS_INSTRUCTION).await;
        self.append_history(
            incident_id,
            "media_analyzed",
            format!(
                "{} image(s), success: {}",
                image_urls.len(),
                outcome.success
            ),
        )
        .await?;
        Ok(outcome)
    }

    async fn require_incident(&self, incident_id: IncidentId) -> ResqResult<Incident> {
        IncidentRepository::get(&*self.store, incident_id)
            .await
            .map_err(ResqError::from)?
            .ok_or_else(|| ResqError::not_found(format!("incident {incident_id} not found")))
    }

    async fn append_history(
        &self,
        incident_id: IncidentId,
        action: &str,
        details: String,
    ) -> ResqResult<()> {
        let entry = HistoryEntry {
            id: HistoryEntryId::new(),
            incident_id,
            action: action.to_string(),
            details,
            performed_by: None,
            created_at_ms: now_epoch_millis(),
        };
        HistoryRepository::append(&*self.store, entry)
            .await
            .map_err(ResqError::from)
    }
}
