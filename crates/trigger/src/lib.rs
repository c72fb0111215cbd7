pub mod controller;
pub mod events;
pub mod labels;
pub mod logging;
pub mod metrics;
pub mod source;
pub mod state;
pub mod view;

pub use controller::{ActivationError, ActivationOutcome, ActivationReport, AnalysisTrigger};
pub use labels::{Labels, Locale};
pub use source::{AnalysisSource, TransportError};
pub use state::TriggerState;
pub use view::{AnalysisView, Layout, Region};

pub fn module_ready() -> bool {
    true
}
