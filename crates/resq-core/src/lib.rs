pub mod domain;
pub mod error;
pub mod ids;
pub mod time;

pub use domain::{
    DeliveryStatus, HistoryEntry, Incident, IncidentStatus, IncidentType, Location, Media,
    MediaType, Party, RecipientType, ReportSend, ResponsePriority, Service, ServiceStatus,
    ServiceType, Severity,
};
pub use error::{ErrorCode, ResqError, ResqResult};
pub use ids::{
    HistoryEntryId, IncidentId, MediaId, PartyId, ReportSendId, ServiceId, UserId,
};
pub use time::{now_epoch_millis, EpochMillis};
