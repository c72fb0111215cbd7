pub mod chart;
pub mod format;
pub mod response;
pub mod score;
pub mod view;

pub use chart::{ChartError, ChartSource};
pub use response::{AnalysisResponse, AnalysisResult, ShapeError, SUCCESS_STATUS};
pub use score::ScoreBand;
pub use view::{BatchEntry, BatchView, ResultCard, SingleResultView, PLACEHOLDER};

pub fn module_ready() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use crate::{AnalysisResponse, BatchEntry, BatchView, ScoreBand, SingleResultView};

    #[test]
    fn single_backend_body_renders_into_single_view() {
        let body = br#"{
            "status": "success",
            "price": 97123.456789,
            "time": "2026-02-28 12:00:00",
            "chart": "data:image/png;base64,iVBORw0KGgo=",
            "score": 2
        }"#;

        let response = AnalysisResponse::from_json(body).unwrap();
        let view = SingleResultView::from_response(&response).unwrap();

        assert_eq!(view.price_text, "97,123.457");
        assert_eq!(view.score_text, "2.0");
        assert_eq!(view.score_band, ScoreBand::Alert);
        assert_eq!(view.time_text, "2026-02-28 12:00:00");
    }

    #[test]
    fn batch_backend_body_renders_entries_in_order() {
        let body = br#"{
            "status": "success",
            "time": "2026-02-28 12:00:00",
            "results": [
                {"name": "Bitcoin (BTC-USD)", "price": 64001.2, "score": 1, "chart": "data:image/png;base64,AA==", "unit": "USD"},
                {"name": "066570.KS", "error": "No data found"},
                {"name": "Samsung (005930.KS)", "price": 71200.0, "score": 3, "chart": "data:image/png;base64,AA==", "unit": "KRW"}
            ]
        }"#;

        let response = AnalysisResponse::from_json(body).unwrap();
        let view = BatchView::from_response(&response).unwrap();

        assert_eq!(view.entries.len(), 3);
        assert!(matches!(view.entries[0], BatchEntry::Card(_)));
        assert!(matches!(view.entries[1], BatchEntry::Failed { .. }));
        assert!(matches!(view.entries[2], BatchEntry::Card(_)));
        assert_eq!(view.failed_count(), 1);
    }
}
