use std::io::{self, BufRead, Stdout, StdinLock, Write};

use api::{ClientError, HttpAnalysisSource};
use trigger::{AnalysisTrigger, Labels};
use ui::TerminalView;

use crate::config::{Config, RunMode};

pub type TerminalTrigger =
    AnalysisTrigger<HttpAnalysisSource, TerminalView<StdinLock<'static>, Stdout>>;

pub fn build_trigger(config: &Config) -> Result<TerminalTrigger, ClientError> {
    debug_assert!(trigger::module_ready());
    debug_assert!(api::module_ready());
    debug_assert!(ui::module_ready());

    let source = HttpAnalysisSource::new(&config.base_url, config.request_timeout)?;
    let view = terminal_view(config, io::stdin().lock(), io::stdout());

    Ok(AnalysisTrigger::new(
        source,
        view,
        Labels::for_locale(config.locale),
        config.layout,
    ))
}

pub fn terminal_view<R: BufRead, W: Write>(
    config: &Config,
    input: R,
    output: W,
) -> TerminalView<R, W> {
    let view = TerminalView::new(input, output, Labels::for_locale(config.locale))
        .acknowledge_alerts(config.run_mode == RunMode::Interactive);

    match &config.chart_dir {
        Some(dir) => view.with_chart_dir(dir.clone()),
        None => view,
    }
}
