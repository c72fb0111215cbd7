pub mod client;
pub mod endpoint;

pub use client::{ClientError, HttpAnalysisSource};
pub use endpoint::{analyze_endpoint, EndpointError, ANALYZE_PATH};

pub fn module_ready() -> bool {
    true
}
