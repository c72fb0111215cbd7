use std::time::{Duration, Instant};

use report::{AnalysisResponse, BatchEntry, BatchView, SingleResultView};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::events::{ActivationEvent, ActivationStage};
use crate::labels::Labels;
use crate::logging::{ActivationLogWriter, TracingActivationLog};
use crate::metrics::ActivationMetrics;
use crate::source::{AnalysisSource, TransportError};
use crate::state::TriggerState;
use crate::view::{AnalysisView, Layout, Region};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivationError {
    #[error("analysis endpoint reported an error: {}", .message.as_deref().unwrap_or("<no message>"))]
    Application { message: Option<String> },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The trigger was not idle.
    Ignored,
    RenderedSingle,
    RenderedBatch { cards: usize, failed: usize },
    Failed(ActivationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationReport {
    pub activation: u64,
    pub outcome: ActivationOutcome,
    pub latency: Option<Duration>,
}

impl ActivationReport {
    pub fn is_success(&self) -> bool {
        matches!(
            self.outcome,
            ActivationOutcome::RenderedSingle | ActivationOutcome::RenderedBatch { .. }
        )
    }
}

/// Controller bound to the one analysis trigger.
///
/// Owns the request lifecycle: every activation moves
/// `Idle -> Loading -> Succeeded | Failed -> Idle`, and the view always ends
/// with an enabled trigger carrying the idle label and a hidden loader.
pub struct AnalysisTrigger<S, V, L = TracingActivationLog> {
    source: S,
    view: V,
    log: L,
    labels: Labels,
    layout: Layout,
    state: TriggerState,
    activations: u64,
    metrics: ActivationMetrics,
}

impl<S, V> AnalysisTrigger<S, V>
where
    S: AnalysisSource,
    V: AnalysisView,
{
    pub fn new(source: S, view: V, labels: Labels, layout: Layout) -> Self {
        let mut trigger = Self {
            source,
            view,
            log: TracingActivationLog,
            labels,
            layout,
            state: TriggerState::Idle,
            activations: 0,
            metrics: ActivationMetrics::new(),
        };
        trigger.render_idle();
        trigger
    }
}

impl<S, V, L> AnalysisTrigger<S, V, L>
where
    S: AnalysisSource,
    V: AnalysisView,
    L: ActivationLogWriter,
{
    pub fn with_log<W: ActivationLogWriter>(self, log: W) -> AnalysisTrigger<S, V, W> {
        AnalysisTrigger {
            source: self.source,
            view: self.view,
            log,
            labels: self.labels,
            layout: self.layout,
            state: self.state,
            activations: self.activations,
            metrics: self.metrics,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn metrics(&self) -> &ActivationMetrics {
        &self.metrics
    }

    pub fn activations(&self) -> u64 {
        self.activations
    }

    pub async fn activate(&mut self) -> ActivationReport {
        if !self.state.accepts_activation() {
            debug!(state = self.state.as_str(), "trigger is disabled, ignoring activation");
            let report = ActivationReport {
                activation: self.activations,
                outcome: ActivationOutcome::Ignored,
                latency: None,
            };
            self.metrics.record(&report);
            return report;
        }

        self.activations += 1;
        let activation = self.activations;
        self.enter_busy(activation);

        let started = Instant::now();
        let fetched = self.source.fetch().await;
        let latency = started.elapsed();

        let outcome = match self.settle(activation, fetched) {
            Ok(outcome) => {
                self.state = TriggerState::Succeeded;
                self.record(activation, ActivationStage::Rendered);
                info!(activation, latency_ms = latency.as_millis() as u64, "analysis rendered");
                outcome
            }
            Err(err) => {
                self.state = TriggerState::Failed;
                self.surface(activation, &err);
                ActivationOutcome::Failed(err)
            }
        };

        self.restore_idle(activation);

        let report = ActivationReport {
            activation,
            outcome,
            latency: Some(latency),
        };
        self.metrics.record(&report);
        report
    }

    fn enter_busy(&mut self, activation: u64) {
        self.state = TriggerState::Loading;
        self.view.set_trigger_disabled(true);
        self.view.set_trigger_label(&self.labels.busy);
        self.view.set_loading_visible(true);
        if self.layout == Layout::Batch {
            self.view.clear_results();
            self.view.set_last_updated(None);
        }
        self.record(activation, ActivationStage::BusyEntered);
    }

    fn settle(
        &mut self,
        activation: u64,
        fetched: Result<AnalysisResponse, TransportError>,
    ) -> Result<ActivationOutcome, ActivationError> {
        let response = fetched?;
        self.record(activation, ActivationStage::ResponseReceived);

        if !response.is_success() {
            return Err(ActivationError::Application {
                message: response.message,
            });
        }

        match self.layout {
            Layout::Single => {
                let result =
                    SingleResultView::from_response(&response).map_err(TransportError::from)?;
                self.render_single(&result);
                Ok(ActivationOutcome::RenderedSingle)
            }
            Layout::Batch => {
                let batch = BatchView::from_response(&response).map_err(TransportError::from)?;
                Ok(self.render_batch(&batch))
            }
        }
    }

    fn render_single(&mut self, result: &SingleResultView) {
        self.view.show_single_result(result);
        self.view.scroll_into_view(Region::ResultContainer);
    }

    fn render_batch(&mut self, batch: &BatchView) -> ActivationOutcome {
        self.view.set_last_updated(Some(&batch.time_text));

        let mut cards = 0;
        let mut failed = 0;
        for entry in &batch.entries {
            match entry {
                BatchEntry::Failed { name, error } => {
                    warn!(item = %name, error = %error, "analysis item failed");
                    let line = self.labels.item_failure_line(name, error);
                    self.view.append_error_line(&line);
                    failed += 1;
                }
                BatchEntry::Card(card) => {
                    self.view.append_result_card(card);
                    cards += 1;
                }
            }
        }

        self.view.scroll_into_view(Region::ResultsArea);
        ActivationOutcome::RenderedBatch { cards, failed }
    }

    fn surface(&mut self, activation: u64, err: &ActivationError) {
        match err {
            ActivationError::Application { message } => {
                warn!(activation, message = ?message, "analysis endpoint reported an error");
                let alert = self.labels.application_alert(message.as_deref());
                self.view.alert(&alert);
                self.record(activation, ActivationStage::ApplicationErrorSurfaced);
            }
            ActivationError::Transport(transport) => {
                error!(activation, error = %transport, "analysis request failed");
                let alert = self.labels.backend_unreachable.clone();
                self.view.alert(&alert);
                self.record(activation, ActivationStage::TransportErrorSurfaced);
            }
        }
    }

    fn restore_idle(&mut self, activation: u64) {
        self.render_idle();
        self.record(activation, ActivationStage::IdleRestored);
    }

    fn render_idle(&mut self) {
        self.state = TriggerState::Idle;
        self.view.set_trigger_disabled(false);
        self.view.set_trigger_label(&self.labels.idle);
        self.view.set_loading_visible(false);
    }

    fn record(&mut self, activation: u64, stage: ActivationStage) {
        self.log.write(ActivationEvent::new(activation, stage));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use report::{AnalysisResponse, AnalysisResult, ResultCard, ScoreBand, ShapeError, SingleResultView};

    use super::*;
    use crate::labels::Locale;
    use crate::logging::InMemoryActivationLog;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Disabled(bool),
        Label(String),
        Loading(bool),
        Single(SingleResultView),
        Clear,
        LastUpdated(Option<String>),
        ErrorLine(String),
        Card(ResultCard),
        Scroll(Region),
        Alert(String),
    }

    #[derive(Debug, Default)]
    struct RecordingView {
        ops: Vec<Op>,
    }

    impl RecordingView {
        fn ops_since_idle(&self) -> &[Op] {
            // Initial idle render is three ops.
            &self.ops[3..]
        }
    }

    impl AnalysisView for RecordingView {
        fn set_trigger_disabled(&mut self, disabled: bool) {
            self.ops.push(Op::Disabled(disabled));
        }

        fn set_trigger_label(&mut self, label: &str) {
            self.ops.push(Op::Label(label.to_owned()));
        }

        fn set_loading_visible(&mut self, visible: bool) {
            self.ops.push(Op::Loading(visible));
        }

        fn show_single_result(&mut self, result: &SingleResultView) {
            self.ops.push(Op::Single(result.clone()));
        }

        fn clear_results(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn set_last_updated(&mut self, time: Option<&str>) {
            self.ops.push(Op::LastUpdated(time.map(str::to_owned)));
        }

        fn append_error_line(&mut self, text: &str) {
            self.ops.push(Op::ErrorLine(text.to_owned()));
        }

        fn append_result_card(&mut self, card: &ResultCard) {
            self.ops.push(Op::Card(card.clone()));
        }

        fn scroll_into_view(&mut self, region: Region) {
            self.ops.push(Op::Scroll(region));
        }

        fn alert(&mut self, message: &str) {
            self.ops.push(Op::Alert(message.to_owned()));
        }
    }

    struct FixedSource {
        reply: Mutex<Option<Result<AnalysisResponse, TransportError>>>,
    }

    impl FixedSource {
        fn replying(reply: Result<AnalysisResponse, TransportError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
            }
        }
    }

    #[async_trait]
    impl AnalysisSource for FixedSource {
        async fn fetch(&self) -> Result<AnalysisResponse, TransportError> {
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(TransportError::Request("source exhausted".to_owned())))
        }
    }

    struct PendingSource;

    #[async_trait]
    impl AnalysisSource for PendingSource {
        async fn fetch(&self) -> Result<AnalysisResponse, TransportError> {
            std::future::pending().await
        }
    }

    fn trigger(
        reply: Result<AnalysisResponse, TransportError>,
        layout: Layout,
    ) -> AnalysisTrigger<FixedSource, RecordingView, InMemoryActivationLog> {
        AnalysisTrigger::new(
            FixedSource::replying(reply),
            RecordingView::default(),
            Labels::for_locale(Locale::En),
            layout,
        )
        .with_log(InMemoryActivationLog::new())
    }

    fn stages(log: &InMemoryActivationLog) -> Vec<ActivationStage> {
        log.events().iter().map(|event| event.stage).collect()
    }

    #[test]
    fn new_trigger_renders_idle_state() {
        let trigger = trigger(Ok(AnalysisResponse::default()), Layout::Single);

        assert_eq!(trigger.state(), TriggerState::Idle);
        assert_eq!(
            trigger.view().ops,
            vec![
                Op::Disabled(false),
                Op::Label("Start analysis".to_owned()),
                Op::Loading(false),
            ]
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn single_success_renders_then_restores_idle() {
        let reply = AnalysisResponse {
            time: Some("2026-02-28 12:00:00".to_owned()),
            ..AnalysisResponse::success_single(1_234_567.0, 2.5, "/chart.png")
        };
        let mut trigger = trigger(Ok(reply), Layout::Single);

        let report = trigger.activate().await;

        assert_eq!(report.activation, 1);
        assert_eq!(report.outcome, ActivationOutcome::RenderedSingle);
        assert!(report.is_success());

        let ops = trigger.view().ops_since_idle();
        assert_eq!(ops[0], Op::Disabled(true));
        assert_eq!(ops[1], Op::Label("Analyzing...".to_owned()));
        assert_eq!(ops[2], Op::Loading(true));
        let Op::Single(result) = &ops[3] else {
            panic!("expected single result, got {:?}", ops[3]);
        };
        assert_eq!(result.price_text, "1,234,567");
        assert_eq!(result.score_text, "2.5");
        assert_eq!(result.score_band, ScoreBand::Alert);
        assert_eq!(result.time_text, "2026-02-28 12:00:00");
        assert_eq!(ops[4], Op::Scroll(Region::ResultContainer));
        assert_eq!(
            &ops[5..],
            &[
                Op::Disabled(false),
                Op::Label("Start analysis".to_owned()),
                Op::Loading(false),
            ]
        );

        assert_eq!(
            stages(trigger.log()),
            vec![
                ActivationStage::BusyEntered,
                ActivationStage::ResponseReceived,
                ActivationStage::Rendered,
                ActivationStage::IdleRestored,
            ]
        );
        assert_eq!(trigger.state(), TriggerState::Idle);
        assert_eq!(trigger.metrics().summary().rendered, 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn single_layout_does_not_touch_batch_elements() {
        let mut trigger = trigger(
            Ok(AnalysisResponse::success_single(1.0, 1.0, "x")),
            Layout::Single,
        );

        trigger.activate().await;

        assert!(!trigger
            .view()
            .ops
            .iter()
            .any(|op| matches!(op, Op::Clear | Op::LastUpdated(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn batch_success_appends_entries_in_order() {
        let reply = AnalysisResponse::success_batch(
            "2026-02-28 12:00:00",
            vec![
                AnalysisResult::failed("BTC", "timeout"),
                AnalysisResult {
                    name: "AAPL".to_owned(),
                    price: Some(100.0),
                    unit: Some("$".to_owned()),
                    score: Some(3.0),
                    chart: Some("/aapl.png".to_owned()),
                    error: None,
                },
            ],
        );
        let mut trigger = trigger(Ok(reply), Layout::Batch);

        let report = trigger.activate().await;

        assert_eq!(
            report.outcome,
            ActivationOutcome::RenderedBatch { cards: 1, failed: 1 }
        );
        let ops = trigger.view().ops_since_idle();
        assert_eq!(ops[3], Op::Clear);
        assert_eq!(ops[4], Op::LastUpdated(None));
        assert_eq!(
            ops[5],
            Op::LastUpdated(Some("2026-02-28 12:00:00".to_owned()))
        );
        assert_eq!(ops[6], Op::ErrorLine("BTC failed: timeout".to_owned()));
        let Op::Card(card) = &ops[7] else {
            panic!("expected card, got {:?}", ops[7]);
        };
        assert_eq!(card.title, "AAPL");
        assert_eq!(card.price_text, "100");
        assert_eq!(card.unit_text, "$");
        assert_eq!(card.score_text, "3");
        assert_eq!(card.score_band, Some(ScoreBand::Alert));
        assert_eq!(ops[8], Op::Scroll(Region::ResultsArea));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn application_error_alerts_message_without_rendering() {
        let mut trigger = trigger(Ok(AnalysisResponse::error("bad key")), Layout::Single);

        let report = trigger.activate().await;

        assert_eq!(
            report.outcome,
            ActivationOutcome::Failed(ActivationError::Application {
                message: Some("bad key".to_owned()),
            })
        );
        let ops = &trigger.view().ops;
        assert!(ops.contains(&Op::Alert("Error: bad key".to_owned())));
        assert!(!ops.iter().any(|op| matches!(op, Op::Single(_) | Op::Scroll(_))));
        assert_eq!(
            stages(trigger.log()),
            vec![
                ActivationStage::BusyEntered,
                ActivationStage::ResponseReceived,
                ActivationStage::ApplicationErrorSurfaced,
                ActivationStage::IdleRestored,
            ]
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn transport_error_alerts_generic_message_and_restores_trigger() {
        let mut trigger = trigger(
            Err(TransportError::Request("connection refused".to_owned())),
            Layout::Batch,
        );

        let report = trigger.activate().await;

        assert!(!report.is_success());
        let ops = &trigger.view().ops;
        assert!(ops.contains(&Op::Alert(
            "Check that the backend server is running.".to_owned()
        )));
        assert!(!ops
            .iter()
            .any(|op| matches!(op, Op::Alert(text) if text.contains("connection refused"))));
        assert_eq!(
            &ops[ops.len() - 3..],
            &[
                Op::Disabled(false),
                Op::Label("Start analysis".to_owned()),
                Op::Loading(false),
            ]
        );
        assert_eq!(
            stages(trigger.log()),
            vec![
                ActivationStage::BusyEntered,
                ActivationStage::TransportErrorSurfaced,
                ActivationStage::IdleRestored,
            ]
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn shape_mismatch_is_a_transport_error() {
        let mut trigger = trigger(
            Ok(AnalysisResponse::success_single(1.0, 1.0, "x")),
            Layout::Batch,
        );

        let report = trigger.activate().await;

        assert_eq!(
            report.outcome,
            ActivationOutcome::Failed(ActivationError::Transport(TransportError::Malformed(
                ShapeError::MissingField("results")
            )))
        );
        assert!(trigger
            .view()
            .ops
            .contains(&Op::Alert("Check that the backend server is running.".to_owned())));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn repeated_activations_are_numbered() {
        let mut trigger = trigger(Ok(AnalysisResponse::error("first")), Layout::Single);

        let first = trigger.activate().await;
        let second = trigger.activate().await;

        assert_eq!(first.activation, 1);
        assert_eq!(second.activation, 2);
        assert_eq!(trigger.activations(), 2);
        assert_eq!(trigger.state(), TriggerState::Idle);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn cancelled_activation_leaves_trigger_disabled() {
        let mut trigger = AnalysisTrigger::new(
            PendingSource,
            RecordingView::default(),
            Labels::for_locale(Locale::En),
            Layout::Single,
        );

        tokio::select! {
            biased;
            _ = trigger.activate() => panic!("pending source should never settle"),
            _ = std::future::ready(()) => {}
        }

        assert_eq!(trigger.state(), TriggerState::Loading);
        assert_eq!(trigger.view().ops.last(), Some(&Op::Loading(true)));

        let report = trigger.activate().await;

        assert_eq!(report.outcome, ActivationOutcome::Ignored);
        assert_eq!(trigger.activations(), 1);
        let summary = trigger.metrics().summary();
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.requests, 0);
    }
}
