use async_trait::async_trait;
use resq_core::{
    ErrorCode, HistoryEntry, Incident, IncidentId, IncidentStatus, Media, MediaId, Party, PartyId,
    ReportSend, ReportSendId, ResqError, Service, ServiceId,
};
use std::fmt;

#[derive(Debug, Clone)]
pub struct StorageError {
    pub message: String,
    pub unavailable: bool,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            unavailable: false,
        }
    }

    /// No backing connection exists; reads degrade, writes fail loudly.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            unavailable: true,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for ResqError {
    fn from(value: StorageError) -> Self {
        let code = if value.unavailable {
            ErrorCode::Unavailable
        } else {
            ErrorCode::Internal
        };
        ResqError::new(code, value.message)
    }
}

#[async_trait]
pub trait IncidentRepository: Send + Sync {
    async fn get(&self, id: IncidentId) -> Result<Option<Incident>, StorageError>;
    async fn list_by_status(
        &self,
        status: IncidentStatus,
    ) -> Result<Vec<Incident>, StorageError>;
    async fn upsert(&self, incident: Incident) -> Result<(), StorageError>;
}

#[async_trait]
pub trait PartyRepository: Send + Sync {
    async fn get(&self, id: PartyId) -> Result<Option<Party>, StorageError>;
    async fn list_by_incident(&self, incident_id: IncidentId)
        -> Result<Vec<Party>, StorageError>;
    async fn upsert(&self, party: Party) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn get(&self, id: ServiceId) -> Result<Option<Service>, StorageError>;
    async fn list_by_incident(
        &self,
        incident_id: IncidentId,
    ) -> Result<Vec<Service>, StorageError>;
    async fn upsert(&self, service: Service) -> Result<(), StorageError>;
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn get(&self, id: MediaId) -> Result<Option<Media>, StorageError>;
    async fn list_by_incident(&self, incident_id: IncidentId)
        -> Result<Vec<Media>, StorageError>;
    /// Media rows are append-only once created.
    async fn append(&self, media: Media) -> Result<(), StorageError>;
}

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// History is append-only, ordered by creation time.
    async fn append(&self, entry: HistoryEntry) -> Result<(), StorageError>;
    async fn list_by_incident(
        &self,
        incident_id: IncidentId,
    ) -> Result<Vec<HistoryEntry>, StorageError>;
}

#[async_trait]
pub trait ReportSendRepository: Send + Sync {
    async fn get(&self, id: ReportSendId) -> Result<Option<ReportSend>, StorageError>;
    async fn list_by_incident(
        &self,
        incident_id: IncidentId,
    ) -> Result<Vec<ReportSend>, StorageError>;
    async fn upsert(&self, send: ReportSend) -> Result<(), StorageError>;
}

/// Everything the coordination core needs from a storage backend.
pub trait Store:
    IncidentRepository
    + PartyRepository
    + ServiceRepository
    + MediaRepository
    + HistoryRepository
    + ReportSendRepository
{
}

impl<T> Store for T where
    T: IncidentRepository
        + PartyRepository
        + ServiceRepository
        + MediaRepository
        + HistoryRepository
        + ReportSendRepository
{
}
