use crate::chart::ChartSource;
use crate::format::{format_price, format_score, format_whole_score};
use crate::response::{AnalysisResponse, AnalysisResult, ShapeError};
use crate::score::ScoreBand;

/// Shown in a card field the backend left out.
pub const PLACEHOLDER: &str = "-";

/// Everything the single-result panel displays.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleResultView {
    pub price_text: String,
    pub score_text: String,
    pub score_band: ScoreBand,
    pub time_text: String,
    pub chart: ChartSource,
}

impl SingleResultView {
    pub fn from_response(response: &AnalysisResponse) -> Result<Self, ShapeError> {
        let price = response.price.ok_or(ShapeError::MissingField("price"))?;
        let score = response.score.ok_or(ShapeError::MissingField("score"))?;
        let chart = response
            .chart
            .as_deref()
            .ok_or(ShapeError::MissingField("chart"))?;

        Ok(Self {
            price_text: format_price(price),
            score_text: format_score(score),
            score_band: ScoreBand::classify(score),
            time_text: response.time.clone().unwrap_or_default(),
            chart: ChartSource::parse(chart),
        })
    }
}

/// A populated clone of the result-card template.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub title: String,
    pub price_text: String,
    pub unit_text: String,
    pub score_text: String,
    pub score_band: Option<ScoreBand>,
    pub chart: Option<ChartSource>,
}

impl ResultCard {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            title: result.name.clone(),
            price_text: result
                .price
                .map(format_price)
                .unwrap_or_else(|| PLACEHOLDER.to_owned()),
            unit_text: result.unit.clone().unwrap_or_default(),
            score_text: result
                .score
                .map(format_whole_score)
                .unwrap_or_else(|| PLACEHOLDER.to_owned()),
            score_band: result.score.map(ScoreBand::classify),
            chart: result.chart.as_deref().map(ChartSource::parse),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchEntry {
    Failed { name: String, error: String },
    Card(ResultCard),
}

impl BatchEntry {
    pub fn from_result(result: &AnalysisResult) -> Self {
        match result.failure() {
            Some(error) => Self::Failed {
                name: result.name.clone(),
                error: error.to_owned(),
            },
            None => Self::Card(ResultCard::from_result(result)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchView {
    pub time_text: String,
    pub entries: Vec<BatchEntry>,
}

impl BatchView {
    pub fn from_response(response: &AnalysisResponse) -> Result<Self, ShapeError> {
        let results = response
            .results
            .as_ref()
            .ok_or(ShapeError::MissingField("results"))?;

        Ok(Self {
            time_text: response.time.clone().unwrap_or_default(),
            entries: results.iter().map(BatchEntry::from_result).collect(),
        })
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, BatchEntry::Failed { .. }))
            .count()
    }
}
