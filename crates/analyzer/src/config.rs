use std::{env, path::PathBuf, time::Duration};

use api::EndpointError;
use thiserror::Error;
use trigger::{Layout, Locale};
use ui::ColorMode;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_LAYOUT: Layout = Layout::Batch;
const DEFAULT_LOCALE: Locale = Locale::Ko;
const DEFAULT_RUN_MODE: RunMode = RunMode::Interactive;
const DEFAULT_COLOR_MODE: ColorMode = ColorMode::Auto;

const BASE_URL_KEY: &str = "ANALYZER_BASE_URL";
const LAYOUT_KEY: &str = "ANALYZER_LAYOUT";
const LOCALE_KEY: &str = "ANALYZER_LOCALE";
const RUN_MODE_KEY: &str = "ANALYZER_RUN_MODE";
const CHART_DIR_KEY: &str = "ANALYZER_CHART_DIR";
const REQUEST_TIMEOUT_KEY: &str = "ANALYZER_REQUEST_TIMEOUT_SECS";
const COLOR_KEY: &str = "ANALYZER_COLOR";
const NO_COLOR_KEY: &str = "NO_COLOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Interactive,
    Once,
}

impl RunMode {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "interactive" => Some(Self::Interactive),
            "once" => Some(Self::Once),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::Once => "once",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub layout: Layout,
    pub locale: Locale,
    pub run_mode: RunMode,
    pub chart_dir: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
    pub color: ColorMode,
    pub no_color: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ANALYZER_BASE_URL is not a usable backend URL: {0}")]
    InvalidBaseUrl(#[source] EndpointError),
    #[error("ANALYZER_LAYOUT must be one of: batch, single")]
    InvalidLayout,
    #[error("ANALYZER_LOCALE must be one of: ko, en")]
    InvalidLocale,
    #[error("ANALYZER_RUN_MODE must be one of: interactive, once")]
    InvalidRunMode,
    #[error("ANALYZER_CHART_DIR must not be empty or whitespace")]
    InvalidChartDir,
    #[error("ANALYZER_REQUEST_TIMEOUT_SECS must be a positive whole number of seconds")]
    InvalidRequestTimeout,
    #[error("ANALYZER_COLOR must be one of: auto, always, never")]
    InvalidColorMode,
    #[error("{0} contains non-unicode data")]
    NonUnicode(&'static str),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = read_env(BASE_URL_KEY)?.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        api::analyze_endpoint(&base_url).map_err(ConfigError::InvalidBaseUrl)?;

        let layout = match read_env(LAYOUT_KEY)? {
            Some(value) => Layout::parse(value.as_str()).ok_or(ConfigError::InvalidLayout)?,
            None => DEFAULT_LAYOUT,
        };

        let locale = match read_env(LOCALE_KEY)? {
            Some(value) => Locale::parse(value.as_str()).ok_or(ConfigError::InvalidLocale)?,
            None => DEFAULT_LOCALE,
        };

        let run_mode = match read_env(RUN_MODE_KEY)? {
            Some(value) => RunMode::parse(value.as_str()).ok_or(ConfigError::InvalidRunMode)?,
            None => DEFAULT_RUN_MODE,
        };

        let chart_dir = match read_env(CHART_DIR_KEY)? {
            Some(value) if value.trim().is_empty() => return Err(ConfigError::InvalidChartDir),
            Some(value) => Some(PathBuf::from(value)),
            None => None,
        };

        let request_timeout = match read_env(REQUEST_TIMEOUT_KEY)? {
            Some(value) => Some(
                parse_timeout_secs(value.as_str()).ok_or(ConfigError::InvalidRequestTimeout)?,
            ),
            None => None,
        };

        let color = match read_env(COLOR_KEY)? {
            Some(value) => ColorMode::parse(value.as_str()).ok_or(ConfigError::InvalidColorMode)?,
            None => DEFAULT_COLOR_MODE,
        };

        let no_color = env::var_os(NO_COLOR_KEY).is_some_and(|value| !value.is_empty());

        Ok(Self {
            base_url,
            layout,
            locale,
            run_mode,
            chart_dir,
            request_timeout,
            color,
            no_color,
        })
    }
}

fn read_env(key: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicode(key)),
    }
}

fn parse_timeout_secs(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
