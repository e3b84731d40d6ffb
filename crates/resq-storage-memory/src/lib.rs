use async_trait::async_trait;
use resq_core::{
    HistoryEntry, Incident, IncidentId, IncidentStatus, Media, MediaId, Party, PartyId,
    ReportSend, ReportSendId, Service, ServiceId,
};
use resq_storage::{
    HistoryRepository, IncidentRepository, MediaRepository, PartyRepository,
    ReportSendRepository, ServiceRepository, StorageError,
};
use tokio::sync::RwLock;

/// In-memory reference store. Tables are insertion-ordered so listings come
/// back in store-native order, and child inserts are checked against the
/// incident table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    incidents: RwLock<Vec<Incident>>,
    parties: RwLock<Vec<Party>>,
    services: RwLock<Vec<Service>>,
    media: RwLock<Vec<Media>>,
    history: RwLock<Vec<HistoryEntry>>,
    report_sends: RwLock<Vec<ReportSend>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn require_incident(&self, id: IncidentId) -> Result<(), StorageError> {
        let incidents = self.incidents.read().await;
        if incidents.iter().any(|incident| incident.id == id) {
            Ok(())
        } else {
            Err(StorageError::new(format!(
                "incident {} does not exist",
                id
            )))
        }
    }
}

fn upsert_row<T, F>(rows: &mut Vec<T>, row: T, same_id: F)
where
    F: Fn(&T) -> bool,
{
    match rows.iter_mut().find(|existing| same_id(existing)) {
        Some(existing) => *existing = row,
        None => rows.push(row),
    }
}

#[async_trait]
impl IncidentRepository for MemoryStore {
    async fn get(&self, id: IncidentId) -> Result<Option<Incident>, StorageError> {
        let incidents = self.incidents.read().await;
        Ok(incidents.iter().find(|incident| incident.id == id).cloned())
    }

    async fn list_by_status(
        &self,
        status: IncidentStatus,
    ) -> Result<Vec<Incident>, StorageError> {
        let incidents = self.incidents.read().await;
        Ok(incidents
            .iter()
            .filter(|incident| incident.status == status)
            .cloned()
            .collect())
    }

    async fn upsert(&self, incident: Incident) -> Result<(), StorageError> {
        let mut incidents = self.incidents.write().await;
        let id = incident.id;
        upsert_row(&mut incidents, incident, |existing| existing.id == id);
        Ok(())
    }
}

#[async_trait]
impl PartyRepository for MemoryStore {
    async fn get(&self, id: PartyId) -> Result<Option<Party>, StorageError> {
        let parties = self.parties.read().await;
        Ok(parties.iter().find(|party| party.id == id).cloned())
    }

    async fn list_by_incident(
        &self,
        incident_id: IncidentId,
    ) -> Result<Vec<Party>, StorageError> {
        let parties = self.parties.read().await;
        Ok(parties
            .iter()
            .filter(|party| party.incident_id == incident_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, party: Party) -> Result<(), StorageError> {
        self.require_incident(party.incident_id).await?;
        let mut parties = self.parties.write().await;
        let id = party.id;
        upsert_row(&mut parties, party, |existing| existing.id == id);
        Ok(())
    }
}

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn get(&self, id: ServiceId) -> Result<Option<Service>, StorageError> {
        let services = self.services.read().await;
        Ok(services.iter().find(|service| service.id == id).cloned())
    }

    async fn list_by_incident(
        &self,
        incident_id: IncidentId,
    ) -> Result<Vec<Service>, StorageError> {
        let services = self.services.read().await;
        Ok(services
            .iter()
            .filter(|service| service.incident_id == incident_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, service: Service) -> Result<(), StorageError> {
        self.require_incident(service.incident_id).await?;
        let mut services = self.services.write().await;
        let id = service.id;
        upsert_row(&mut services, service, |existing| existing.id == id);
        Ok(())
    }
}

#[async_trait]
impl MediaRepository for MemoryStore {
    async fn get(&self, id: MediaId) -> Result<Option<Media>, StorageError> {
        let media = self.media.read().await;
        Ok(media.iter().find(|row| row.id == id).cloned())
    }

    async fn list_by_incident(
        &self,
        incident_id: IncidentId,
    ) -> Result<Vec<Media>, StorageError> {
        let media = self.media.read().await;
        Ok(media
            .iter()
            .filter(|row| row.incident_id == incident_id)
            .cloned()
            .collect())
    }

    async fn append(&self, row: Media) -> Result<(), StorageError> {
        self.require_incident(row.incident_id).await?;
        let mut media = self.media.write().await;
        if media.iter().any(|existing| existing.id == row.id) {
            return Err(StorageError::new(format!(
                "media {} already exists",
                row.id
            )));
        }
        media.push(row);
        Ok(())
    }
}

#[async_trait]
impl HistoryRepository for MemoryStore {
    async fn append(&self, entry: HistoryEntry) -> Result<(), StorageError> {
        self.require_incident(entry.incident_id).await?;
        let mut history = self.history.write().await;
        history.push(entry);
        Ok(())
    }

    async fn list_by_incident(
        &self,
        incident_id: IncidentId,
    ) -> Result<Vec<HistoryEntry>, StorageError> {
        let history = self.history.read().await;
        Ok(history
            .iter()
            .filter(|entry| entry.incident_id == incident_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReportSendRepository for MemoryStore {
    async fn get(&self, id: ReportSendId) -> Result<Option<ReportSend>, StorageError> {
        let sends = self.report_sends.read().await;
        Ok(sends.iter().find(|send| send.id == id).cloned())
    }

    async fn list_by_incident(
        &self,
        incident_id: IncidentId,
    ) -> Result<Vec<ReportSend>, StorageError> {
        let sends = self.report_sends.read().await;
        Ok(sends
            .iter()
            .filter(|send| send.incident_id == incident_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, send: ReportSend) -> Result<(), StorageError> {
        self.require_incident(send.incident_id).await?;
        let mut sends = self.report_sends.write().await;
        let id = send.id;
        upsert_row(&mut sends, send, |existing| existing.id == id);
        Ok(())
    }
}
