use std::time::Duration;

use async_trait::async_trait;
use report::AnalysisResponse;
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, warn};
use trigger::{AnalysisSource, TransportError};

use crate::endpoint::{analyze_endpoint, EndpointError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// `GET /api/analyze` over reqwest.
///
/// Sends no parameters, headers or body. The HTTP status is logged but never
/// decides the outcome; the body alone does.
#[derive(Debug, Clone)]
pub struct HttpAnalysisSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpAnalysisSource {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let endpoint = analyze_endpoint(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Build)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisSource for HttpAnalysisSource {
    async fn fetch(&self) -> Result<AnalysisResponse, TransportError> {
        debug!(endpoint = %self.endpoint, "requesting analysis");

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "analysis endpoint answered with a non-success status");
        }

        let body = response.bytes().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "analysis response received");

        AnalysisResponse::from_json(&body).map_err(|err| TransportError::Decode(err.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(err.to_string())
    }
}
