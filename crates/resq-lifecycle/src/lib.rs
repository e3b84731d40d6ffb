pub mod alerts;
pub mod orchestrator;
pub mod singleflight;

pub use alerts::{emit_alerts, StakeholderChannel};
pub use orchestrator::{Orchestrator, ProcessingOutcome, SweepOutcome};
pub use singleflight::{InFlightGuard, SingleFlight};
