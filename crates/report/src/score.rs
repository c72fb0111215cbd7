pub const ALERT_COLOR: &str = "#f43f5e";
pub const NEUTRAL_COLOR: &str = "#38bdf8";
pub const OK_COLOR: &str = "#10b981";

const ALERT_THRESHOLD: f64 = 2.0;
const OK_THRESHOLD: f64 = 1.0;

/// Color band a score is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    Alert,
    Neutral,
    Ok,
}

impl ScoreBand {
    /// NaN compares false against both thresholds and lands in `Neutral`.
    pub fn classify(score: f64) -> Self {
        if score >= ALERT_THRESHOLD {
            Self::Alert
        } else if score <= OK_THRESHOLD {
            Self::Ok
        } else {
            Self::Neutral
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            Self::Alert => ALERT_COLOR,
            Self::Neutral => NEUTRAL_COLOR,
            Self::Ok => OK_COLOR,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Alert => (0xf4, 0x3f, 0x5e),
            Self::Neutral => (0x38, 0xbd, 0xf8),
            Self::Ok => (0x10, 0xb9, 0x81),
        }
    }
}
