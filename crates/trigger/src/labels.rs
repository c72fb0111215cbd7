#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl Locale {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ko" => Some(Self::Ko),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }
}

/// User-facing strings of the trigger and its alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub idle: String,
    pub busy: String,
    pub error_prefix: String,
    pub unknown_error: String,
    pub backend_unreachable: String,
    pub last_updated: String,
    pub item_failed: String,
    pub price_caption: String,
    pub score_caption: String,
    pub time_caption: String,
    pub chart_caption: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ko => Self {
                idle: "분석 시작하기".to_owned(),
                busy: "분석 중...".to_owned(),
                error_prefix: "에러 발생: ".to_owned(),
                unknown_error: "알 수 없는 오류".to_owned(),
                backend_unreachable: "백엔드 서버가 실행 중인지 확인해주세요.".to_owned(),
                last_updated: "마지막 업데이트: ".to_owned(),
                item_failed: "분석 실패".to_owned(),
                price_caption: "가격".to_owned(),
                score_caption: "점수".to_owned(),
                time_caption: "시간".to_owned(),
                chart_caption: "차트".to_owned(),
            },
            Locale::En => Self {
                idle: "Start analysis".to_owned(),
                busy: "Analyzing...".to_owned(),
                error_prefix: "Error: ".to_owned(),
                unknown_error: "unknown error".to_owned(),
                backend_unreachable: "Check that the backend server is running.".to_owned(),
                last_updated: "Last updated: ".to_owned(),
                item_failed: "failed".to_owned(),
                price_caption: "Price".to_owned(),
                score_caption: "Score".to_owned(),
                time_caption: "Time".to_owned(),
                chart_caption: "Chart".to_owned(),
            },
        }
    }

    pub fn application_alert(&self, message: Option<&str>) -> String {
        let message = message.unwrap_or(self.unknown_error.as_str());
        format!("{}{message}", self.error_prefix)
    }

    pub fn item_failure_line(&self, name: &str, error: &str) -> String {
        format!("{name} {}: {error}", self.item_failed)
    }
}
