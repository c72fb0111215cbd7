use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SUCCESS_STATUS: &str = "success";

/// Body returned by `GET /api/analyze`.
///
/// Both backend shapes decode into this one struct: the single-result shape
/// fills `price`/`score`/`chart`, the batch shape fills `results`. Which
/// shape is expected is decided by the page layout, not by the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<AnalysisResult>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("success response is missing `{0}`")]
    MissingField(&'static str),
}

impl AnalysisResponse {
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(SUCCESS_STATUS)
    }

    pub fn success_single(price: f64, score: f64, chart: impl Into<String>) -> Self {
        Self {
            status: Some(SUCCESS_STATUS.to_owned()),
            price: Some(price),
            score: Some(score),
            chart: Some(chart.into()),
            ..Self::default()
        }
    }

    pub fn success_batch(time: impl Into<String>, results: Vec<AnalysisResult>) -> Self {
        Self {
            status: Some(SUCCESS_STATUS.to_owned()),
            time: Some(time.into()),
            results: Some(results),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Some("error".to_owned()),
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

impl AnalysisResult {
    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// An empty `error` string does not mark the entry as failed.
    pub fn failure(&self) -> Option<&str> {
        self.error.as_deref().filter(|error| !error.is_empty())
    }
}
