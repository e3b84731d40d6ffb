use resq_core::{
    now_epoch_millis, DeliveryStatus, HistoryEntry, HistoryEntryId, IncidentId, RecipientType,
    ReportSend, ReportSendId, ResqError, ResqResult,
};
use resq_storage::{HistoryRepository, IncidentRepository, ReportSendRepository, Store};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub recipient_type: RecipientType,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub sent_count: usize,
}

/// Fan-out of a generated report to external recipients. Dispatch is
/// fire-and-create: one pending ReportSend row per recipient, actual message
/// transport belongs to an external collaborator.
pub struct ReportDispatcher<S> {
    store: Arc<S>,
}

impl<S: Store> ReportDispatcher<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn send(
        &self,
        incident_id: IncidentId,
        recipients: &[Recipient],
    ) -> ResqResult<DispatchOutcome> {
        IncidentRepository::get(&*self.store, incident_id)
            .await
            .map_err(ResqError::from)?
            .ok_or_else(|| ResqError::not_found(format!("incident {incident_id} not found")))?;

        let now = now_epoch_millis();
        for recipient in recipients {
            let send = ReportSend {
                id: ReportSendId::new(),
                incident_id,
                recipient_type: recipient.recipient_type,
                email: recipient.email.clone(),
                phone: recipient.phone.clone(),
                name: recipient.name.clone(),
                status: DeliveryStatus::Pending,
                sent_at_ms: None,
                read_at_ms: None,
                failure_reason: None,
                created_at_ms: now,
                updated_at_ms: now,
            };
            ReportSendRepository::upsert(&*self.store, send)
                .await
                .map_err(ResqError::from)?;
        }

        let entry = HistoryEntry {
            id: HistoryEntryId::new(),
            incident_id,
            action: "report_dispatched".to_string(),
            details: format!("report queued for {} recipient(s)", recipients.len()),
            performed_by: None,
            created_at_ms: now_epoch_millis(),
        };
        HistoryRepository::append(&*self.store, entry)
            .await
            .map_err(ResqError::from)?;

        Ok(DispatchOutcome {
            sent_count: recipients.len(),
        })
    }

    /// All delivery rows for the incident, in store-native order.
    pub async fn get_status(&self, incident_id: IncidentId) -> ResqResult<Vec<ReportSend>> {
        ReportSendRepository::list_by_incident(&*self.store, incident_id)
            .await
            .map_err(ResqError::from)
    }

    /// Apply delivery feedback. Sent stamps a sent time, Read stamps a read
    /// time, Failed requires a non-empty reason. Pending is the initial state
    /// only and is never re-enterable.
    pub async fn update_status(
        &self,
        id: ReportSendId,
        status: DeliveryStatus,
        failure_reason: Option<String>,
    ) -> ResqResult<ReportSend> {
        let mut send = ReportSendRepository::get(&*self.store, id)
            .await
            .map_err(ResqError::from)?
            .ok_or_else(|| ResqError::not_found(format!("report send {id} not found")))?;

        let now = now_epoch_millis();
        match status {
            DeliveryStatus::Pending => {
                return Err(ResqError::invalid_input(
                    "pending is the initial delivery state and cannot be re-entered",
                ));
            }
            DeliveryStatus::Sent => {
                send.sent_at_ms = Some(now);
            }
            DeliveryStatus::Read => {
                send.read_at_ms = Some(now);
            }
            DeliveryStatus::Failed => {
                let reason = failure_reason
                    .as_deref()
                    .map(str::trim)
                    .filter(|reason| !reason.is_empty())
                    .ok_or_else(|| {
                        ResqError::invalid_input("failed delivery requires a failure reason")
                    })?;
                send.failure_reason = Some(reason.to_string());
            }
        }
        send.status = status;
        send.updated_at_ms = now;

        ReportSendRepository::upsert(&*self.store, send.clone())
            .await
            .map_err(ResqError::from)?;
        Ok(send)
    }
}
