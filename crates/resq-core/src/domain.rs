use crate::ids::{HistoryEntryId, IncidentId, MediaId, PartyId, ReportSendId, ServiceId, UserId};
use crate::time::EpochMillis;
use resq_geo::Coordinate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Injury,
    Breakdown,
    Traffic,
    Other,
}

impl IncidentType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Injury => "injury",
            Self::Breakdown => "breakdown",
            Self::Traffic => "traffic",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Pending,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl IncidentStatus {
    /// Forward lifecycle graph. Operator writes through the store stay
    /// permissive; the orchestrator checks its own transitions against this.
    pub fn can_advance_to(&self, next: IncidentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Assigned)
                | (Self::Pending, Self::InProgress)
                | (Self::Assigned, Self::InProgress)
                | (Self::InProgress, Self::Resolved)
                | (Self::Resolved, Self::Closed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePriority {
    Immediate,
    Urgent,
    Normal,
}

impl ResponsePriority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Urgent => "urgent",
            Self::Normal => "normal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Ambulance,
    TowTruck,
    TrafficControl,
    Police,
    Fire,
}

impl ServiceType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ambulance => "ambulance",
            Self::TowTruck => "tow truck",
            Self::TrafficControl => "traffic control",
            Self::Police => "police",
            Self::Fire => "fire",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Pending,
    Assigned,
    EnRoute,
    Arrived,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    /// Service statuses only move forward; cancellation is allowed from any
    /// non-terminal state.
    pub fn can_advance_to(&self, next: ServiceStatus) -> bool {
        if matches!(self, Self::Completed | Self::Cancelled) {
            return false;
        }
        if next == Self::Cancelled {
            return true;
        }
        rank(next) == rank(*self) + 1
    }
}

fn rank(status: ServiceStatus) -> u8 {
    match status {
        ServiceStatus::Pending => 0,
        ServiceStatus::Assigned => 1,
        ServiceStatus::EnRoute => 2,
        ServiceStatus::Arrived => 3,
        ServiceStatus::Completed => 4,
        ServiceStatus::Cancelled => 5,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    Party,
    Insurance,
    Najm,
    Operator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
    Read,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub text: String,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    pub reporter_id: UserId,
    pub incident_type: IncidentType,
    pub location: Location,
    pub description: String,
    pub severity: Severity,
    pub status: IncidentStatus,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub incident_id: IncidentId,
    pub name: String,
    pub phone: String,
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub fault_percentage: Option<u8>,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub incident_id: IncidentId,
    pub service_type: ServiceType,
    pub status: ServiceStatus,
    #[serde(default)]
    pub assignee: Option<String>,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub incident_id: IncidentId,
    pub media_type: MediaType,
    pub url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub simulated: bool,
    pub created_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryEntryId,
    pub incident_id: IncidentId,
    pub action: String,
    pub details: String,
    #[serde(default)]
    pub performed_by: Option<UserId>,
    pub created_at_ms: EpochMillis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSend {
    pub id: ReportSendId,
    pub incident_id: IncidentId,
    pub recipient_type: RecipientType,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub sent_at_ms: Option<EpochMillis>,
    #[serde(default)]
    pub read_at_ms: Option<EpochMillis>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    pub created_at_ms: EpochMillis,
    pub updated_at_ms: EpochMillis,
}
