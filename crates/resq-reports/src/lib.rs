pub mod dispatcher;
pub mod generator;
pub mod report;

pub use dispatcher::{DispatchOutcome, Recipient, ReportDispatcher};
pub use generator::ReportGenerator;
pub use report::Report;
