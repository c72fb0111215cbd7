use reqwest::Url;
use thiserror::Error;

/// Root-relative, so any path on the base URL is replaced.
pub const ANALYZE_PATH: &str = "/api/analyze";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("base URL is not a valid URL: {0}")]
    InvalidUrl(String),
    #[error("base URL must use http or https, got `{0}`")]
    UnsupportedScheme(String),
}

pub fn analyze_endpoint(base_url: &str) -> Result<Url, EndpointError> {
    let base =
        Url::parse(base_url.trim()).map_err(|err| EndpointError::InvalidUrl(err.to_string()))?;

    match base.scheme() {
        "http" | "https" => {}
        other => return Err(EndpointError::UnsupportedScheme(other.to_owned())),
    }

    base.join(ANALYZE_PATH)
        .map_err(|err| EndpointError::InvalidUrl(err.to_string()))
}
