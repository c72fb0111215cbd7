use std::time::Duration;

use crate::controller::{ActivationError, ActivationOutcome, ActivationReport};

/// Tally of a session's activations, split by how each one settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationSummary {
    pub requests: usize,
    pub rendered: u64,
    pub application_errors: u64,
    pub transport_errors: u64,
    pub ignored: u64,
    pub median_latency: Option<Duration>,
    pub p95_latency: Option<Duration>,
    pub slowest: Option<Duration>,
}

impl ActivationSummary {
    pub fn is_empty(&self) -> bool {
        self.requests == 0 && self.ignored == 0
    }
}

#[derive(Debug, Default, Clone)]
pub struct ActivationMetrics {
    request_latencies: Vec<Duration>,
    rendered: u64,
    application_errors: u64,
    transport_errors: u64,
    ignored: u64,
}

impl ActivationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &ActivationReport) {
        match &report.outcome {
            ActivationOutcome::Ignored => self.ignored += 1,
            ActivationOutcome::RenderedSingle | ActivationOutcome::RenderedBatch { .. } => {
                self.rendered += 1
            }
            ActivationOutcome::Failed(ActivationError::Application { .. }) => {
                self.application_errors += 1
            }
            ActivationOutcome::Failed(ActivationError::Transport(_)) => {
                self.transport_errors += 1
            }
        }

        if let Some(latency) = report.latency {
            self.request_latencies.push(latency);
        }
    }

    pub fn summary(&self) -> ActivationSummary {
        let mut sorted = self.request_latencies.clone();
        sorted.sort_unstable();

        ActivationSummary {
            requests: sorted.len(),
            rendered: self.rendered,
            application_errors: self.application_errors,
            transport_errors: self.transport_errors,
            ignored: self.ignored,
            median_latency: nearest_rank(&sorted, 50),
            p95_latency: nearest_rank(&sorted, 95),
            slowest: sorted.last().copied(),
        }
    }
}

fn nearest_rank(sorted: &[Duration], percentile: usize) -> Option<Duration> {
    let rank = (percentile * sorted.len()).div_ceil(100);
    sorted.get(rank.checked_sub(1)?).copied()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::ActivationMetrics;
    use crate::controller::{ActivationError, ActivationOutcome, ActivationReport};
    use crate::source::TransportError;

    fn report(outcome: ActivationOutcome, latency_ms: Option<u64>) -> ActivationReport {
        ActivationReport {
            activation: 1,
            outcome,
            latency: latency_ms.map(Duration::from_millis),
        }
    }

    #[test]
    fn fresh_metrics_summarize_as_empty() {
        let summary = ActivationMetrics::new().summary();

        assert!(summary.is_empty());
        assert_eq!(summary.median_latency, None);
        assert_eq!(summary.slowest, None);
    }

    #[test]
    fn outcomes_are_counted_by_kind() {
        let mut metrics = ActivationMetrics::new();

        metrics.record(&report(ActivationOutcome::RenderedSingle, Some(120)));
        metrics.record(&report(
            ActivationOutcome::RenderedBatch { cards: 2, failed: 1 },
            Some(90),
        ));
        metrics.record(&report(
            ActivationOutcome::Failed(ActivationError::Application { message: None }),
            Some(40),
        ));
        metrics.record(&report(
            ActivationOutcome::Failed(TransportError::Timeout.into()),
            Some(5_000),
        ));
        metrics.record(&report(ActivationOutcome::Ignored, None));

        let summary = metrics.summary();
        assert_eq!(summary.requests, 4);
        assert_eq!(summary.rendered, 2);
        assert_eq!(summary.application_errors, 1);
        assert_eq!(summary.transport_errors, 1);
        assert_eq!(summary.ignored, 1);
    }

    #[test]
    fn latency_uses_nearest_rank() {
        let mut metrics = ActivationMetrics::new();

        for latency in [900, 1_200, 1_100, 15_000, 1_000] {
            metrics.record(&report(ActivationOutcome::RenderedSingle, Some(latency)));
        }

        let summary = metrics.summary();
        assert_eq!(summary.median_latency, Some(Duration::from_millis(1_100)));
        assert_eq!(summary.p95_latency, Some(Duration::from_millis(15_000)));
        assert_eq!(summary.slowest, Some(Duration::from_millis(15_000)));
    }

    #[test]
    fn ignored_activations_add_no_latency_sample() {
        let mut metrics = ActivationMetrics::new();

        metrics.record(&report(ActivationOutcome::Ignored, None));

        let summary = metrics.summary();
        assert!(!summary.is_empty());
        assert_eq!(summary.requests, 0);
        assert_eq!(summary.median_latency, None);
    }
}
