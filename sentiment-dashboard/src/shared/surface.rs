//! Rendering surface the controller reads form controls from and writes
//! content fragments into
//!
//! Element and control ids are a fixed contract with the presentation layer.
//! [`Board`] is the in-memory implementation: the terminal widget draws it
//! and tests inspect it.

use std::collections::{HashMap, HashSet};

use super::calc::TIME_RANGE_DEFAULT_DAYS;
use super::figure::Figure;
use super::types::{Tab, MARKET_TABLE};
use super::view::{CorrelationRow, MentionCard, StockCard};

/// Content containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    StockGrid,
    ComparisonChart,
    HeatmapChart,
    SentimentGauge,
    SentimentPriceChart,
    CorrelationTable,
    PositiveMentions,
    NegativeMentions,
    LastUpdate,
    TimeRangeValue,
    AvgSentiment,
    SentimentVol,
    PriceCorr,
    LeadingCorr,
    MentionVolumeChart,
    SentimentDistribution,
}

impl ElementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::StockGrid => "stockGrid",
            ElementId::ComparisonChart => "comparisonChart",
            ElementId::HeatmapChart => "heatmapChart",
            ElementId::SentimentGauge => "sentimentGauge",
            ElementId::SentimentPriceChart => "sentimentPriceChart",
            ElementId::CorrelationTable => "correlationTable",
            ElementId::PositiveMentions => "positiveMentions",
            ElementId::NegativeMentions => "negativeMentions",
            ElementId::LastUpdate => "lastUpdate",
            ElementId::TimeRangeValue => "timeRangeValue",
            ElementId::AvgSentiment => "avgSentiment",
            ElementId::SentimentVol => "sentimentVol",
            ElementId::PriceCorr => "priceCorr",
            ElementId::LeadingCorr => "leadingCorr",
            ElementId::MentionVolumeChart => "mentionVolumeChart",
            ElementId::SentimentDistribution => "sentimentDistribution",
        }
    }
}

/// Form controls and buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    StockSelector,
    MentionStockSelector,
    TimeRange,
    AutoRefresh,
    RefreshButton,
    TabButton(Tab),
}

impl ControlId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlId::StockSelector => "stockSelector",
            ControlId::MentionStockSelector => "mentionStockSelector",
            ControlId::TimeRange => "timeRange",
            ControlId::AutoRefresh => "autoRefresh",
            ControlId::RefreshButton => "refreshButton",
            ControlId::TabButton(Tab::Overview) => "overview-btn",
            ControlId::TabButton(Tab::Analysis) => "analysis-btn",
            ControlId::TabButton(Tab::Correlation) => "correlation-btn",
            ControlId::TabButton(Tab::Mentions) => "mentions-btn",
        }
    }
}

/// Rendered content placed into a container
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Cards(Vec<StockCard>),
    Chart(Figure),
    Table(Vec<CorrelationRow>),
    Mentions(Vec<MentionCard>),
    Text(String),
}

pub trait Surface {
    fn control_value(&self, control: ControlId) -> Option<String>;

    fn set_control_value(&mut self, control: ControlId, value: String);

    /// Disabled controls ignore interaction until re-enabled
    fn set_control_enabled(&mut self, control: ControlId, enabled: bool);

    fn set_control_active(&mut self, control: ControlId, active: bool);

    /// Replace the whole content of a container
    fn write(&mut self, element: ElementId, fragment: Fragment);

    /// Empty a container
    fn clear(&mut self, element: ElementId);

    fn set_panel_visible(&mut self, tab: Tab, visible: bool);

    fn is_panel_visible(&self, tab: Tab) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub value: String,
    pub enabled: bool,
    pub active: bool,
}

impl ControlState {
    fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            enabled: true,
            active: false,
        }
    }
}

/// In-memory surface holding the latest fragment per container
#[derive(Debug, Clone)]
pub struct Board {
    fragments: HashMap<ElementId, Fragment>,
    revisions: HashMap<ElementId, u64>,
    controls: HashMap<ControlId, ControlState>,
    visible_panels: HashSet<Tab>,
}

impl Board {
    pub fn new() -> Self {
        let first = MARKET_TABLE[0].ticker.as_str();
        let mut controls = HashMap::new();
        controls.insert(ControlId::StockSelector, ControlState::with_value(first));
        controls.insert(ControlId::MentionStockSelector, ControlState::with_value(first));
        controls.insert(
            ControlId::TimeRange,
            ControlState::with_value(TIME_RANGE_DEFAULT_DAYS.to_string()),
        );
        controls.insert(ControlId::AutoRefresh, ControlState::with_value("false"));
        controls.insert(ControlId::RefreshButton, ControlState::with_value(""));
        for tab in Tab::ALL {
            let mut state = ControlState::with_value(tab.name());
            state.active = tab == Tab::Overview;
            controls.insert(ControlId::TabButton(tab), state);
        }

        Self {
            fragments: HashMap::new(),
            revisions: HashMap::new(),
            controls,
            visible_panels: HashSet::from([Tab::Overview]),
        }
    }

    pub fn fragment(&self, element: ElementId) -> Option<&Fragment> {
        self.fragments.get(&element)
    }

    /// Number of times a container has been written
    pub fn revision(&self, element: ElementId) -> u64 {
        self.revisions.get(&element).copied().unwrap_or(0)
    }

    pub fn cards(&self) -> &[StockCard] {
        match self.fragments.get(&ElementId::StockGrid) {
            Some(Fragment::Cards(cards)) => cards,
            _ => &[],
        }
    }

    pub fn chart(&self, element: ElementId) -> Option<&Figure> {
        match self.fragments.get(&element) {
            Some(Fragment::Chart(figure)) => Some(figure),
            _ => None,
        }
    }

    pub fn table(&self) -> &[CorrelationRow] {
        match self.fragments.get(&ElementId::CorrelationTable) {
            Some(Fragment::Table(rows)) => rows,
            _ => &[],
        }
    }

    pub fn mentions(&self, element: ElementId) -> &[MentionCard] {
        match self.fragments.get(&element) {
            Some(Fragment::Mentions(cards)) => cards,
            _ => &[],
        }
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        match self.fragments.get(&element) {
            Some(Fragment::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn control(&self, control: ControlId) -> Option<&ControlState> {
        self.controls.get(&control)
    }

    pub fn is_enabled(&self, control: ControlId) -> bool {
        self.controls.get(&control).is_some_and(|c| c.enabled)
    }

    pub fn is_active(&self, control: ControlId) -> bool {
        self.controls.get(&control).is_some_and(|c| c.active)
    }

    /// The visible panel, if exactly one is shown
    pub fn visible_tab(&self) -> Option<Tab> {
        let mut visible = Tab::ALL.into_iter().filter(|tab| self.visible_panels.contains(tab));
        match (visible.next(), visible.next()) {
            (Some(tab), None) => Some(tab),
            _ => None,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Board {
    fn control_value(&self, control: ControlId) -> Option<String> {
        self.controls.get(&control).map(|c| c.value.clone())
    }

    fn set_control_value(&mut self, control: ControlId, value: String) {
        self.controls
            .entry(control)
            .or_insert_with(|| ControlState::with_value(""))
            .value = value;
    }

    fn set_control_enabled(&mut self, control: ControlId, enabled: bool) {
        self.controls
            .entry(control)
            .or_insert_with(|| ControlState::with_value(""))
            .enabled = enabled;
    }

    fn set_control_active(&mut self, control: ControlId, active: bool) {
        self.controls
            .entry(control)
            .or_insert_with(|| ControlState::with_value(""))
            .active = active;
    }

    fn write(&mut self, element: ElementId, fragment: Fragment) {
        self.fragments.insert(element, fragment);
        *self.revisions.entry(element).or_insert(0) += 1;
    }

    fn clear(&mut self, element: ElementId) {
        if self.fragments.remove(&element).is_some() {
            *self.revisions.entry(element).or_insert(0) += 1;
        }
    }

    fn set_panel_visible(&mut self, tab: Tab, visible: bool) {
        if visible {
            self.visible_panels.insert(tab);
        } else {
            self.visible_panels.remove(&tab);
        }
    }

    fn is_panel_visible(&self, tab: Tab) -> bool {
        self.visible_panels.contains(&tab)
    }
}
