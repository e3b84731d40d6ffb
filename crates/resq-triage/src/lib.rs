pub mod analysis;
pub mod estimator;
pub mod router;

pub use analysis::{simulate, SensorAnalysis};
pub use estimator::{estimate, FaultAssessment};
pub use router::{
    recommended_services, route, RoutingDecision, ServiceAction, ServiceLabel,
};
