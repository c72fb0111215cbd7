use std::collections::HashSet;
use std::fmt::Display;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use report::{ChartError, ChartSource, ResultCard, ScoreBand, SingleResultView};
use thiserror::Error;
use tracing::{debug, warn};
use trigger::{AnalysisView, Labels, Region};

const SINGLE_CHART_SLUG: &str = "analysis";
const RULE: &str = "────────────────────────────────────────";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Activate,
    Quit,
}

#[derive(Debug, Error)]
pub enum ChartSaveError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("failed to write chart file: {0}")]
    Io(#[from] io::Error),
}

/// Renders the page contract as append-only terminal output.
///
/// The Enter key is the trigger. Alerts block on the input until Enter is
/// pressed unless acknowledgement is turned off.
pub struct TerminalView<R, W> {
    input: R,
    output: W,
    labels: Labels,
    trigger_label: String,
    trigger_disabled: bool,
    acknowledge_alerts: bool,
    chart_dir: Option<PathBuf>,
    // Chart file stems handed out since the last batch started.
    chart_stems: HashSet<String>,
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    pub fn new(input: R, output: W, labels: Labels) -> Self {
        Self {
            input,
            output,
            trigger_label: labels.idle.clone(),
            labels,
            trigger_disabled: false,
            acknowledge_alerts: true,
            chart_dir: None,
            chart_stems: HashSet::new(),
        }
    }

    pub fn with_chart_dir(mut self, chart_dir: impl Into<PathBuf>) -> Self {
        self.chart_dir = Some(chart_dir.into());
        self
    }

    pub fn acknowledge_alerts(mut self, acknowledge: bool) -> Self {
        self.acknowledge_alerts = acknowledge;
        self
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prompts with the trigger label and waits for the next keypress line.
    pub fn next_command(&mut self) -> io::Result<Command> {
        if self.trigger_disabled {
            debug!("prompting while the trigger is disabled");
        }
        write!(self.output, "▶ {} [Enter] · q ", self.trigger_label.bold())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(Command::Quit);
        }

        match line.trim() {
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => Ok(Command::Activate),
        }
    }

    fn write_line(&mut self, line: impl Display) {
        if let Err(err) = writeln!(self.output, "{line}").and_then(|()| self.output.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }

    fn field_line(&self, caption: &str, value: impl Display) -> String {
        format!("  {caption}  {value}")
    }

    /// First of `stem`, `stem-2`, `stem-3`, ... not yet used in this batch.
    fn claim_chart_stem(&mut self, stem: String) -> String {
        let mut candidate = stem.clone();
        let mut suffix = 2;
        while !self.chart_stems.insert(candidate.clone()) {
            candidate = format!("{stem}-{suffix}");
            suffix += 1;
        }
        candidate
    }

    fn describe_chart(&self, slug: &str, chart: &ChartSource) -> String {
        match chart {
            ChartSource::Linked(url) => url.clone(),
            ChartSource::Inline { mime, .. } => match &self.chart_dir {
                Some(dir) => match save_chart(dir, slug, chart) {
                    Ok(path) => path.display().to_string(),
                    Err(err) => {
                        warn!(error = %err, chart = slug, "failed to save inline chart");
                        format!("inline {mime} (not saved: {err})")
                    }
                },
                None => match chart.decode() {
                    Ok(bytes) => format!("inline {mime}, {} bytes", bytes.len()),
                    Err(err) => format!("inline {mime} ({err})"),
                },
            },
        }
    }
}

impl<R: BufRead, W: Write> AnalysisView for TerminalView<R, W> {
    fn set_trigger_disabled(&mut self, disabled: bool) {
        self.trigger_disabled = disabled;
    }

    fn set_trigger_label(&mut self, label: &str) {
        self.trigger_label = label.to_owned();
    }

    fn set_loading_visible(&mut self, visible: bool) {
        if visible {
            let line = format!("⏳ {}", self.trigger_label);
            self.write_line(line.dimmed());
        }
    }

    fn show_single_result(&mut self, result: &SingleResultView) {
        let chart = self.describe_chart(SINGLE_CHART_SLUG, &result.chart);
        let lines = [
            self.field_line(&self.labels.price_caption, result.price_text.bold()),
            self.field_line(
                &self.labels.score_caption,
                paint_score(&result.score_text, Some(result.score_band)),
            ),
            self.field_line(&self.labels.time_caption, &result.time_text),
            self.field_line(&self.labels.chart_caption, chart),
        ];
        self.write_line(RULE);
        for line in lines {
            self.write_line(line);
        }
    }

    // Terminal output is append-only; a new activation starts below the old one.
    fn clear_results(&mut self) {
        self.chart_stems.clear();
    }

    fn set_last_updated(&mut self, time: Option<&str>) {
        if let Some(time) = time {
            let line = format!("{}{time}", self.labels.last_updated);
            self.write_line(RULE);
            self.write_line(line.dimmed());
        }
    }

    fn append_error_line(&mut self, text: &str) {
        self.write_line(format!("✖ {text}").red());
    }

    fn append_result_card(&mut self, card: &ResultCard) {
        let chart = match &card.chart {
            Some(chart) => {
                let stem = self.claim_chart_stem(slug(&card.title));
                Some(self.describe_chart(&stem, chart))
            }
            None => None,
        };

        let price = if card.unit_text.is_empty() {
            card.price_text.clone()
        } else {
            format!("{} {}", card.price_text, card.unit_text)
        };
        let mut lines = vec![
            format!("■ {}", card.title.bold()),
            self.field_line(&self.labels.price_caption, price),
            self.field_line(
                &self.labels.score_caption,
                paint_score(&card.score_text, card.score_band),
            ),
        ];
        if let Some(chart) = chart {
            lines.push(self.field_line(&self.labels.chart_caption, chart));
        }
        for line in lines {
            self.write_line(line);
        }
    }

    fn scroll_into_view(&mut self, _region: Region) {
        self.write_line(RULE);
    }

    fn alert(&mut self, message: &str) {
        self.write_line(format!("! {message}").yellow().bold());
        if !self.acknowledge_alerts {
            return;
        }

        if let Err(err) = write!(self.output, "  [Enter] ").and_then(|()| self.output.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
        let mut line = String::new();
        if let Err(err) = self.input.read_line(&mut line) {
            warn!(error = %err, "failed to read alert acknowledgement");
        }
    }
}

fn paint_score(text: &str, band: Option<ScoreBand>) -> String {
    match band {
        Some(band) => {
            let (r, g, b) = band.rgb();
            text.truecolor(r, g, b).bold().to_string()
        }
        None => text.to_owned(),
    }
}

/// File-name stem for a result title: lowercase alphanumerics joined by `-`.
pub fn slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "chart".to_owned()
    } else {
        slug.to_owned()
    }
}

fn save_chart(dir: &Path, slug: &str, chart: &ChartSource) -> Result<PathBuf, ChartSaveError> {
    let bytes = chart.decode()?;
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{slug}.{}", chart.file_extension()));
    fs::write(&path, bytes)?;
    debug!(path = %path.display(), "inline chart saved");
    Ok(path)
}
