use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use thiserror::Error;

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Where a chart image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSource {
    /// `data:<mime>;base64,<payload>`, as produced by the backend's plot export.
    Inline { mime: String, payload: String },
    Linked(String),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart is a link, not an inline image: {0}")]
    NotInline(String),
    #[error("inline chart payload is not valid base64")]
    InvalidBase64(#[from] base64::DecodeError),
}

impl ChartSource {
    pub fn parse(src: &str) -> Self {
        src.strip_prefix(DATA_URL_PREFIX)
            .and_then(|rest| rest.split_once(BASE64_MARKER))
            .map(|(mime, payload)| Self::Inline {
                mime: mime.to_owned(),
                payload: payload.to_owned(),
            })
            .unwrap_or_else(|| Self::Linked(src.to_owned()))
    }

    /// The value an image element's `src` is set to.
    pub fn to_src(&self) -> String {
        match self {
            Self::Inline { mime, payload } => {
                format!("{DATA_URL_PREFIX}{mime}{BASE64_MARKER}{payload}")
            }
            Self::Linked(url) => url.clone(),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, ChartError> {
        match self {
            Self::Inline { payload, .. } => Ok(BASE64.decode(payload.trim())?),
            Self::Linked(url) => Err(ChartError::NotInline(url.clone())),
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Inline { mime, .. } => match mime.as_str() {
                "image/png" => "png",
                "image/jpeg" | "image/jpg" => "jpg",
                "image/gif" => "gif",
                "image/svg+xml" => "svg",
                "image/webp" => "webp",
                _ => "bin",
            },
            Self::Linked(_) => "bin",
        }
    }
}
