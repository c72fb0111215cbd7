//! In-memory document with the same element contract as the browser page.
//!
//! Every field is an element the controller can reach: the trigger, the
//! loader, the single-result container, the "last updated" marker and the
//! results area that batch cards are cloned into.

use report::{ResultCard, SingleResultView};
use trigger::{AnalysisView, Region};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerElement {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultContainer {
    pub hidden: bool,
    pub price_value: String,
    pub score_value: String,
    pub score_color: Option<&'static str>,
    pub time_value: String,
    pub chart_src: Option<String>,
}

impl Default for ResultContainer {
    fn default() -> Self {
        Self {
            hidden: true,
            price_value: String::new(),
            score_value: String::new(),
            score_color: None,
            time_value: String::new(),
            chart_src: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastUpdatedMarker {
    pub hidden: bool,
    pub time_value: String,
}

impl Default for LastUpdatedMarker {
    fn default() -> Self {
        Self {
            hidden: true,
            time_value: String::new(),
        }
    }
}

/// Content of the result-card template; appended cards are clones of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardNode {
    pub result_title: String,
    pub price_value: String,
    pub price_unit: String,
    pub score_value: String,
    pub score_color: Option<&'static str>,
    pub chart_src: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultNode {
    ErrorLine(String),
    Card(CardNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub trigger: TriggerElement,
    pub loader_hidden: bool,
    pub result_container: ResultContainer,
    pub last_updated: LastUpdatedMarker,
    pub results: Vec<ResultNode>,
    pub alerts: Vec<String>,
    pub scrolled_to: Vec<Region>,
    template: CardNode,
}

impl Default for Page {
    fn default() -> Self {
        Self::with_template(CardNode::default())
    }
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: CardNode) -> Self {
        Self {
            trigger: TriggerElement::default(),
            loader_hidden: true,
            result_container: ResultContainer::default(),
            last_updated: LastUpdatedMarker::default(),
            results: Vec::new(),
            alerts: Vec::new(),
            scrolled_to: Vec::new(),
            template,
        }
    }

    pub fn error_lines(&self) -> impl Iterator<Item = &str> {
        self.results.iter().filter_map(|node| match node {
            ResultNode::ErrorLine(text) => Some(text.as_str()),
            ResultNode::Card(_) => None,
        })
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardNode> {
        self.results.iter().filter_map(|node| match node {
            ResultNode::Card(card) => Some(card),
            ResultNode::ErrorLine(_) => None,
        })
    }
}

impl AnalysisView for Page {
    fn set_trigger_disabled(&mut self, disabled: bool) {
        self.trigger.disabled = disabled;
    }

    fn set_trigger_label(&mut self, label: &str) {
        self.trigger.label = label.to_owned();
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.loader_hidden = !visible;
    }

    fn show_single_result(&mut self, result: &SingleResultView) {
        let container = &mut self.result_container;
        container.price_value = result.price_text.clone();
        container.score_value = result.score_text.clone();
        container.time_value = result.time_text.clone();
        container.chart_src = Some(result.chart.to_src());
        container.score_color = Some(result.score_band.hex());
        container.hidden = false;
    }

    fn clear_results(&mut self) {
        self.results.clear();
    }

    fn set_last_updated(&mut self, time: Option<&str>) {
        match time {
            Some(time) => {
                self.last_updated.time_value = time.to_owned();
                self.last_updated.hidden = false;
            }
            None => self.last_updated.hidden = true,
        }
    }

    fn append_error_line(&mut self, text: &str) {
        self.results.push(ResultNode::ErrorLine(text.to_owned()));
    }

    fn append_result_card(&mut self, card: &ResultCard) {
        let mut node = self.template.clone();
        node.result_title = card.title.clone();
        node.price_value = card.price_text.clone();
        node.price_unit = card.unit_text.clone();
        node.score_value = card.score_text.clone();
        if let Some(band) = card.score_band {
            node.score_color = Some(band.hex());
        }
        if let Some(chart) = &card.chart {
            node.chart_src = Some(chart.to_src());
        }
        self.results.push(ResultNode::Card(node));
    }

    fn scroll_into_view(&mut self, region: Region) {
        self.scrolled_to.push(region);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }
}
