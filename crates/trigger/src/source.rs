use async_trait::async_trait;
use report::{AnalysisResponse, ShapeError};
use thiserror::Error;

/// The request never produced a usable body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request to the analysis endpoint failed: {0}")]
    Request(String),
    #[error("request to the analysis endpoint timed out")]
    Timeout,
    #[error("response body is not an analysis response: {0}")]
    Decode(String),
    #[error("malformed analysis response: {0}")]
    Malformed(#[from] ShapeError),
}

/// Issues the one parameterless analysis request.
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    async fn fetch(&self) -> Result<AnalysisResponse, TransportError>;
}
