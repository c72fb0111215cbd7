use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use trigger::metrics::ActivationMetrics;
use trigger::{
    logging::ActivationLogWriter, ActivationOutcome, ActivationReport, AnalysisSource,
    AnalysisTrigger,
};
use ui::{Command, TerminalView};

/// Activates on every Enter until `q` or end of input.
pub async fn run_interactive<S, R, W, L>(
    trigger: &mut AnalysisTrigger<S, TerminalView<R, W>, L>,
) -> io::Result<u64>
where
    S: AnalysisSource,
    R: BufRead,
    W: Write,
    L: ActivationLogWriter,
{
    loop {
        match trigger.view_mut().next_command()? {
            Command::Activate => {
                let report = trigger.activate().await;
                log_report(&report);
            }
            Command::Quit => break,
        }
    }

    log_summary(trigger.metrics());
    Ok(trigger.activations())
}

pub async fn run_once<S, R, W, L>(
    trigger: &mut AnalysisTrigger<S, TerminalView<R, W>, L>,
) -> ActivationReport
where
    S: AnalysisSource,
    R: BufRead,
    W: Write,
    L: ActivationLogWriter,
{
    let report = trigger.activate().await;
    log_report(&report);
    log_summary(trigger.metrics());
    report
}

fn log_report(report: &ActivationReport) {
    match &report.outcome {
        ActivationOutcome::Ignored => {
            warn!(activation = report.activation, "activation ignored while busy");
        }
        ActivationOutcome::RenderedSingle => {
            info!(activation = report.activation, "single result shown");
        }
        ActivationOutcome::RenderedBatch { cards, failed } => {
            info!(
                activation = report.activation,
                cards = *cards,
                failed = *failed,
                "batch results shown"
            );
        }
        ActivationOutcome::Failed(err) => {
            info!(activation = report.activation, error = %err, "activation failed");
        }
    }
}

fn log_summary(metrics: &ActivationMetrics) {
    let summary = metrics.summary();
    if summary.is_empty() {
        return;
    }
    let millis = |latency: Option<std::time::Duration>| latency.map(|d| d.as_millis() as u64);
    info!(
        requests = summary.requests,
        rendered = summary.rendered,
        application_errors = summary.application_errors,
        transport_errors = summary.transport_errors,
        ignored = summary.ignored,
        median_ms = millis(summary.median_latency),
        p95_ms = millis(summary.p95_latency),
        slowest_ms = millis(summary.slowest),
        "analysis session summary"
    );
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use report::{AnalysisResponse, AnalysisResult};
    use trigger::{AnalysisSource, AnalysisTrigger, Labels, Layout, Locale, TransportError};
    use ui::TerminalView;

    use super::{run_interactive, run_once};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalysisSource for CountingSource {
        async fn fetch(&self) -> Result<AnalysisResponse, TransportError> {
            let call = self.calls.fetch_add(1, Ordering::Relaxed);
            if call == 0 {
                Ok(AnalysisResponse::success_batch(
                    "2026-02-28 12:00:00",
                    vec![AnalysisResult::failed("BTC", "timeout")],
                ))
            } else {
                Err(TransportError::Request("connection refused".to_owned()))
            }
        }
    }

    fn terminal_trigger(
        input: &str,
        acknowledge_alerts: bool,
    ) -> AnalysisTrigger<CountingSource, TerminalView<Cursor<Vec<u8>>, Vec<u8>>> {
        let labels = Labels::for_locale(Locale::En);
        let view = TerminalView::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            labels.clone(),
        )
        .acknowledge_alerts(acknowledge_alerts);
        AnalysisTrigger::new(CountingSource::default(), view, labels, Layout::Batch)
    }

    #[tokio::test(flavor = "current_thread")]
    async fn interactive_session_activates_per_enter_until_quit() {
        // Second activation fails and its alert consumes one line.
        let mut trigger = terminal_trigger("\n\n\nq\n", true);

        let activations = run_interactive(&mut trigger).await.unwrap();

        assert_eq!(activations, 2);
        let summary = trigger.metrics().summary();
        assert_eq!(summary.rendered, 1);
        assert_eq!(summary.transport_errors, 1);
        let out = String::from_utf8(trigger.view().output().clone()).unwrap();
        assert!(out.contains("BTC failed: timeout"));
        assert!(out.contains("Check that the backend server is running."));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn interactive_session_stops_at_end_of_input() {
        let mut trigger = terminal_trigger("", true);

        let activations = run_interactive(&mut trigger).await.unwrap();

        assert_eq!(activations, 0);
        assert!(trigger.metrics().summary().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn once_runs_a_single_activation() {
        let mut trigger = terminal_trigger("", false);

        let report = run_once(&mut trigger).await;

        assert!(report.is_success());
        assert_eq!(trigger.activations(), 1);
    }
}
