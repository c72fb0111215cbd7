use report::{ResultCard, SingleResultView};

/// Which page contract the view implements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    Single,
    #[default]
    Batch,
}

impl Layout {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single" => Some(Self::Single),
            "batch" => Some(Self::Batch),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Batch => "batch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    ResultContainer,
    ResultsArea,
}

/// Element handles the controller drives.
///
/// Each method is one mutation of the page; the controller decides order and
/// the implementation decides how it looks. Batch-only and single-only
/// methods are never called for the other layout.
pub trait AnalysisView {
    fn set_trigger_disabled(&mut self, disabled: bool);

    fn set_trigger_label(&mut self, label: &str);

    fn set_loading_visible(&mut self, visible: bool);

    /// Populates the result container and reveals it.
    fn show_single_result(&mut self, result: &SingleResultView);

    fn clear_results(&mut self);

    /// `None` hides the "last updated" marker.
    fn set_last_updated(&mut self, time: Option<&str>);

    fn append_error_line(&mut self, text: &str);

    /// Clones the result template, fills it from `card` and appends it.
    fn append_result_card(&mut self, card: &ResultCard);

    fn scroll_into_view(&mut self, region: Region);

    /// Blocking user-facing message.
    fn alert(&mut self, message: &str);
}
