use resq_reports::Report;
use tracing::info;

/// Stakeholder channels notified on every automatic processing run. Delivery
/// is log-only in this core; real transport lives behind the excluded
/// messaging layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeholderChannel {
    TrafficAuthority,
    MedicalDispatch,
    RecoveryPartner,
    Police,
}

impl StakeholderChannel {
    pub fn all() -> [StakeholderChannel; 4] {
        [
            Self::TrafficAuthority,
            Self::MedicalDispatch,
            Self::RecoveryPartner,
            Self::Police,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TrafficAuthority => "traffic_authority",
            Self::MedicalDispatch => "medical_dispatch",
            Self::RecoveryPartner => "recovery_partner",
            Self::Police => "police",
        }
    }
}

/// One alert per channel, each carrying location and priority.
pub fn emit_alerts(report: &Report) -> usize {
    let channels = StakeholderChannel::all();
    for channel in channels {
        info!(
            channel = channel.label(),
            incident_id = %report.incident_id,
            location = %report.location.text,
            priority = report.decision.priority.label(),
            eta_minutes = report.decision.eta_minutes,
            "stakeholder alert"
        );
    }
    channels.len()
}
