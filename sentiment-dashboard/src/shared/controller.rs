//! View-state controller
//!
//! Owns the selection and refresh state, recomputes view models from the
//! static table and writes them to a [`Surface`]. Every interaction (key
//! press, timer tick) lands here as a method call on the UI loop.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use super::calc::{clamp_time_range, format_time_range};
use super::config::DashboardConfig;
use super::entropy::Entropy;
use super::scheduler::{Scheduler, Tick, TimerId, TimerTick};
use super::surface::{ControlId, ElementId, Fragment, Surface};
use super::types::{lookup, Tab, Ticker};
use super::view::{
    compute_correlation_rows, compute_detail, compute_grid, compute_mentions, compute_overview,
};

/// Format of the `lastUpdate` timestamp
const LAST_UPDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Containers filled by the analysis panel
const DETAIL_ELEMENTS: [ElementId; 8] = [
    ElementId::SentimentGauge,
    ElementId::SentimentPriceChart,
    ElementId::MentionVolumeChart,
    ElementId::SentimentDistribution,
    ElementId::AvgSentiment,
    ElementId::SentimentVol,
    ElementId::PriceCorr,
    ElementId::LeadingCorr,
];

/// Ticker selectors and the panel each one feeds
const SELECTORS: [(ControlId, Tab); 2] = [
    (ControlId::StockSelector, Tab::Analysis),
    (ControlId::MentionStockSelector, Tab::Mentions),
];

/// Mutable UI state owned by the controller
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Selected tickers in display order
    pub selection: Vec<Ticker>,
    /// Recurring auto-refresh timer, present iff auto-refresh is on
    pub auto_refresh: Option<TimerId>,
    /// Control that started the in-flight refresh and its completion timer
    pub refreshing: Option<(ControlId, TimerId)>,
    pub last_update: Option<DateTime<Local>>,
}

pub struct ViewStateController<S, C, E> {
    state: ViewState,
    surface: S,
    scheduler: C,
    entropy: E,
    clock: fn() -> DateTime<Local>,
    initial_time_range: u32,
    start_auto_refresh: bool,
    refresh_delay: Duration,
    auto_refresh_period: Duration,
}

impl<S, C, E> ViewStateController<S, C, E>
where
    S: Surface,
    C: Scheduler,
    E: Entropy,
{
    pub fn new(config: &DashboardConfig, surface: S, scheduler: C, entropy: E) -> Self {
        Self {
            state: ViewState {
                selection: config.initial_selection.clone(),
                auto_refresh: None,
                refreshing: None,
                last_update: None,
            },
            surface,
            scheduler,
            entropy,
            clock: Local::now,
            initial_time_range: config.time_range_days,
            start_auto_refresh: config.auto_refresh,
            refresh_delay: config.refresh_delay,
            auto_refresh_period: config.auto_refresh_period,
        }
    }

    /// Replace the wall clock (timestamps, synthetic series anchor)
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// First paint: grid, timestamp and overview charts
    pub fn initialize(&mut self) {
        self.sync_selectors();
        self.set_time_range(self.initial_time_range);
        self.render_grid();
        self.update_last_update();
        self.render_overview_charts();
        if self.start_auto_refresh {
            self.set_auto_refresh(true);
        }
        info!(selection = ?self.state.selection, "dashboard initialised");
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn selection(&self) -> &[Ticker] {
        &self.state.selection
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub fn auto_refresh_enabled(&self) -> bool {
        self.state.auto_refresh.is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.refreshing.is_some()
    }

    /// Flip membership of `symbol` in the selection and redraw the grid and
    /// overview charts. Symbols missing from the table are ignored.
    pub fn toggle_selection(&mut self, symbol: &str) {
        let Some(record) = lookup(symbol) else {
            debug!(%symbol, "ignoring toggle of unknown ticker");
            return;
        };

        let ticker = record.ticker;
        if let Some(pos) = self.state.selection.iter().position(|t| *t == ticker) {
            self.state.selection.remove(pos);
        } else {
            self.state.selection.push(ticker);
        }
        debug!(%ticker, selection = ?self.state.selection, "selection toggled");

        self.render_grid();
        self.render_overview_charts();
        self.sync_selectors();
    }

    /// Update the time range label. Chart data is unaffected.
    pub fn set_time_range(&mut self, days: u32) {
        let days = clamp_time_range(days);
        self.surface
            .set_control_value(ControlId::TimeRange, days.to_string());
        self.surface
            .write(ElementId::TimeRangeValue, Fragment::Text(format_time_range(days)));
    }

    /// Current slider value in days
    pub fn time_range(&self) -> u32 {
        self.surface
            .control_value(ControlId::TimeRange)
            .and_then(|v| v.parse().ok())
            .map(clamp_time_range)
            .unwrap_or(self.initial_time_range)
    }

    /// Start a simulated fetch: disable `trigger`, re-render after the
    /// configured delay. Returns false if a refresh is already in flight.
    pub fn refresh(&mut self, trigger: ControlId) -> bool {
        if let Some((busy, _)) = self.state.refreshing {
            debug!(trigger = trigger.as_str(), busy = busy.as_str(), "refresh already in flight");
            return false;
        }

        self.surface.set_control_enabled(trigger, false);
        let timer = self
            .scheduler
            .after(self.refresh_delay, Tick::RefreshDone { trigger });
        self.state.refreshing = Some((trigger, timer));
        info!(trigger = trigger.as_str(), "refresh started");
        true
    }

    /// Finish a simulated fetch and re-enable its trigger
    pub fn complete_refresh(&mut self, trigger: ControlId) {
        self.state.refreshing = None;
        self.render_grid();
        self.render_overview_charts();
        self.update_last_update();
        self.surface.set_control_enabled(trigger, true);
        info!(trigger = trigger.as_str(), "refresh complete");
    }

    /// Turn periodic refresh on or off. Enabling twice keeps one timer.
    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.surface
            .set_control_value(ControlId::AutoRefresh, enabled.to_string());

        if enabled {
            if self.state.auto_refresh.is_none() {
                let id = self
                    .scheduler
                    .every(self.auto_refresh_period, Tick::AutoRefresh);
                self.state.auto_refresh = Some(id);
                info!(period = ?self.auto_refresh_period, "auto-refresh enabled");
            }
        } else if let Some(id) = self.state.auto_refresh.take() {
            self.scheduler.cancel(id);
            info!("auto-refresh disabled");
        }
    }

    /// Dispatch a timer tick delivered by the event loop
    pub fn handle_tick(&mut self, timer: TimerTick) {
        match timer.tick {
            Tick::AutoRefresh => {
                if self.state.auto_refresh == Some(timer.id) {
                    self.refresh(ControlId::RefreshButton);
                } else {
                    debug!(id = ?timer.id, "dropping tick from cancelled auto-refresh");
                }
            }
            Tick::RefreshDone { trigger } => {
                self.scheduler.complete(timer.id);
                match self.state.refreshing {
                    Some((_, id)) if id == timer.id => self.complete_refresh(trigger),
                    _ => debug!(id = ?timer.id, "dropping stale refresh completion"),
                }
            }
        }
    }

    pub fn render_grid(&mut self) {
        let cards = compute_grid(&self.state.selection);
        self.surface.write(ElementId::StockGrid, Fragment::Cards(cards));
    }

    pub fn render_overview_charts(&mut self) {
        let (comparison, heatmap) = compute_overview(&self.state.selection);
        self.surface
            .write(ElementId::ComparisonChart, Fragment::Chart(comparison));
        self.surface
            .write(ElementId::HeatmapChart, Fragment::Chart(heatmap));
    }

    /// Gauge, key metrics and synthetic price/sentiment history for `symbol`
    pub fn render_detail_analysis(&mut self, symbol: &str) {
        let Some(record) = lookup(symbol) else {
            debug!(%symbol, "no detail analysis for unknown ticker");
            return;
        };

        let detail = compute_detail(record, (self.clock)(), &mut self.entropy);
        self.surface.write(
            ElementId::AvgSentiment,
            Fragment::Text(detail.metrics.avg_sentiment),
        );
        self.surface.write(
            ElementId::SentimentVol,
            Fragment::Text(detail.metrics.sentiment_volatility),
        );
        self.surface.write(
            ElementId::PriceCorr,
            Fragment::Text(detail.metrics.price_correlation),
        );
        self.surface.write(
            ElementId::LeadingCorr,
            Fragment::Text(detail.metrics.leading_correlation),
        );
        self.surface
            .write(ElementId::SentimentGauge, Fragment::Chart(detail.gauge));
        self.surface.write(
            ElementId::SentimentPriceChart,
            Fragment::Chart(detail.series_chart),
        );
        self.surface.write(
            ElementId::MentionVolumeChart,
            Fragment::Chart(detail.mention_volume),
        );
        self.surface.write(
            ElementId::SentimentDistribution,
            Fragment::Chart(detail.distribution),
        );
    }

    pub fn render_correlation_table(&mut self) {
        let rows = compute_correlation_rows(&self.state.selection, &mut self.entropy);
        self.surface
            .write(ElementId::CorrelationTable, Fragment::Table(rows));
    }

    pub fn render_mentions(&mut self, symbol: &str) {
        let Some(record) = lookup(symbol) else {
            debug!(%symbol, "no mentions for unknown ticker");
            return;
        };

        let mentions = compute_mentions(record);
        self.surface.write(
            ElementId::PositiveMentions,
            Fragment::Mentions(mentions.positive),
        );
        self.surface.write(
            ElementId::NegativeMentions,
            Fragment::Mentions(mentions.negative),
        );
    }

    /// Show `tab`'s panel, hide the others and render its content
    pub fn switch_tab(&mut self, tab: Tab) {
        for other in Tab::ALL {
            self.surface
                .set_control_active(ControlId::TabButton(other), false);
            self.surface.set_panel_visible(other, false);
        }
        self.surface.set_control_active(ControlId::TabButton(tab), true);
        self.surface.set_panel_visible(tab, true);

        match tab {
            Tab::Overview => self.render_overview_charts(),
            Tab::Analysis => self.render_selector_panel(ControlId::StockSelector),
            Tab::Correlation => self.render_correlation_table(),
            Tab::Mentions => self.render_selector_panel(ControlId::MentionStockSelector),
        }
    }

    /// `switch_tab` by panel name; unknown names are ignored
    pub fn switch_tab_by_name(&mut self, name: &str) {
        match Tab::from_name(name) {
            Some(tab) => self.switch_tab(tab),
            None => debug!(%name, "ignoring unknown tab"),
        }
    }

    /// Point a ticker selector at `symbol` and redraw the panel it feeds.
    /// Selectors only offer selected tickers; anything else is ignored.
    pub fn select_ticker(&mut self, selector: ControlId, symbol: &str) {
        if !self.state.selection.iter().any(|t| t.as_str() == symbol) {
            debug!(%symbol, "ignoring selector change to unselected ticker");
            return;
        }
        self.surface.set_control_value(selector, symbol.to_string());
        self.render_selector_panel(selector);
    }

    /// Step a ticker selector through the selection, wrapping at the ends
    pub fn cycle_ticker(&mut self, selector: ControlId, forward: bool) {
        let len = self.state.selection.len();
        if len == 0 {
            return;
        }
        let pos = self
            .selected_symbol(selector)
            .and_then(|symbol| self.state.selection.iter().position(|t| t.as_str() == symbol))
            .unwrap_or(0);
        let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
        let symbol = self.state.selection[next].as_str();
        self.select_ticker(selector, symbol);
    }

    /// Selector value, if it still names a selected ticker
    fn selected_symbol(&self, selector: ControlId) -> Option<&'static str> {
        let value = self.surface.control_value(selector)?;
        self.state
            .selection
            .iter()
            .find(|t| t.as_str() == value)
            .map(Ticker::as_str)
    }

    /// Redraw the panel fed by `selector`, or empty it if nothing is selected
    fn render_selector_panel(&mut self, selector: ControlId) {
        match (selector, self.selected_symbol(selector)) {
            (ControlId::StockSelector, Some(symbol)) => self.render_detail_analysis(symbol),
            (ControlId::StockSelector, None) => {
                for element in DETAIL_ELEMENTS {
                    self.surface.clear(element);
                }
            }
            (ControlId::MentionStockSelector, Some(symbol)) => self.render_mentions(symbol),
            (ControlId::MentionStockSelector, None) => {
                self.surface.clear(ElementId::PositiveMentions);
                self.surface.clear(ElementId::NegativeMentions);
            }
            _ => {}
        }
    }

    /// Re-point selectors whose ticker left the selection at the first
    /// selected ticker (empty when nothing is selected)
    fn sync_selectors(&mut self) {
        for (selector, tab) in SELECTORS {
            if self.selected_symbol(selector).is_some() {
                continue;
            }
            let fallback = self
                .state
                .selection
                .first()
                .map(|t| t.as_str().to_string())
                .unwrap_or_default();
            debug!(selector = selector.as_str(), %fallback, "selector moved");
            self.surface.set_control_value(selector, fallback);
            if self.surface.is_panel_visible(tab) {
                self.render_selector_panel(selector);
            }
        }
    }

    fn update_last_update(&mut self) {
        let now = (self.clock)();
        self.state.last_update = Some(now);
        self.surface.write(
            ElementId::LastUpdate,
            Fragment::Text(now.format(LAST_UPDATE_FORMAT).to_string()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entropy::ScriptedEntropy;
    use crate::shared::scheduler::ManualScheduler;
    use crate::shared::surface::Board;
    use crate::shared::types::SentimentLabel;
    use chrono::TimeZone;

    type TestController = ViewStateController<Board, ManualScheduler, ScriptedEntropy>;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn controller() -> TestController {
        let mut controller = ViewStateController::new(
            &DashboardConfig::default(),
            Board::new(),
            ManualScheduler::new(),
            ScriptedEntropy::constant(0.5),
        )
        .with_clock(fixed_now);
        controller.initialize();
        controller
    }

    fn symbols(controller: &TestController) -> Vec<&'static str> {
        controller.selection().iter().map(|t| t.as_str()).collect()
    }

    #[test]
    fn test_initialize_paints_grid_charts_and_timestamp() {
        let controller = controller();
        let board = controller.surface();
        assert_eq!(board.cards().len(), 5);
        assert!(board.chart(ElementId::ComparisonChart).is_some());
        assert!(board.chart(ElementId::HeatmapChart).is_some());
        assert_eq!(board.text(ElementId::LastUpdate), Some("2024-03-01 09:30:00"));
        assert_eq!(board.text(ElementId::TimeRangeValue), Some("7 days"));
        assert!(!controller.auto_refresh_enabled());
    }

    #[test]
    fn test_deselect_tsla_leaves_four_cards_in_order() {
        let mut controller = controller();
        controller.toggle_selection("TSLA");

        let cards = controller.surface().cards();
        let order: Vec<&str> = cards.iter().map(|c| c.ticker.as_str()).collect();
        assert_eq!(order, vec!["AAPL", "MSFT", "GOOGL", "AMZN"]);
        assert_eq!(cards[0].price, "$182.45");
        assert_eq!(cards[0].change, "▲ 2.34%");
        assert_eq!(cards[0].sentiment_label, SentimentLabel::Bullish);
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut controller = controller();
        controller.toggle_selection("MSFT");
        controller.toggle_selection("MSFT");
        let mut restored = symbols(&controller);
        restored.sort();
        let mut original = vec!["AAPL", "TSLA", "MSFT", "GOOGL", "AMZN"];
        original.sort();
        assert_eq!(restored, original);

        // Deselect then reselect appends, so only the set is restored
        controller.toggle_selection("AMZN");
        let mut before = symbols(&controller);
        controller.toggle_selection("TSLA");
        controller.toggle_selection("TSLA");
        let mut after = symbols(&controller);
        before.sort();
        after.sort();
        assert_eq!(after, before);
    }

    #[test]
    fn test_select_then_deselect_restores_exact_order() {
        let mut controller = controller();
        controller.toggle_selection("TSLA");
        let before = symbols(&controller);
        assert_eq!(before, vec!["AAPL", "MSFT", "GOOGL", "AMZN"]);

        controller.toggle_selection("TSLA");
        assert_eq!(symbols(&controller), vec!["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"]);
        controller.toggle_selection("TSLA");
        assert_eq!(symbols(&controller), before);
    }

    #[test]
    fn test_toggle_rerenders_grid_and_charts() {
        let mut controller = controller();
        let grid = controller.surface().revision(ElementId::StockGrid);
        let chart = controller.surface().revision(ElementId::ComparisonChart);
        controller.toggle_selection("GOOGL");
        assert_eq!(controller.surface().revision(ElementId::StockGrid), grid + 1);
        assert_eq!(controller.surface().revision(ElementId::ComparisonChart), chart + 1);
    }

    #[test]
    fn test_toggle_unknown_is_silent_noop() {
        let mut controller = controller();
        let grid = controller.surface().revision(ElementId::StockGrid);
        controller.toggle_selection("NVDA");
        assert_eq!(controller.selection().len(), 5);
        assert_eq!(controller.surface().revision(ElementId::StockGrid), grid);
    }

    #[test]
    fn test_time_range_changes_label_only() {
        let mut controller = controller();
        let chart = controller.surface().revision(ElementId::ComparisonChart);
        controller.set_time_range(14);
        assert_eq!(controller.surface().text(ElementId::TimeRangeValue), Some("14 days"));
        assert_eq!(controller.time_range(), 14);
        assert_eq!(controller.surface().revision(ElementId::ComparisonChart), chart);

        controller.set_time_range(99);
        assert_eq!(controller.time_range(), 30);
    }

    #[test]
    fn test_auto_refresh_is_idempotent() {
        let mut controller = controller();
        controller.set_auto_refresh(true);
        controller.set_auto_refresh(true);
        assert_eq!(controller.scheduler().active(), 1);
        assert_eq!(
            controller.surface().control_value(ControlId::AutoRefresh).as_deref(),
            Some("true")
        );

        controller.set_auto_refresh(false);
        assert_eq!(controller.scheduler().active(), 0);
        assert!(!controller.auto_refresh_enabled());

        controller.set_auto_refresh(false);
        assert_eq!(controller.scheduler().active(), 0);
    }

    #[test]
    fn test_refresh_disables_trigger_until_complete() {
        let mut controller = controller();
        let grid = controller.surface().revision(ElementId::StockGrid);

        assert!(controller.refresh(ControlId::RefreshButton));
        assert!(!controller.surface().is_enabled(ControlId::RefreshButton));
        assert!(!controller.refresh(ControlId::RefreshButton));
        assert_eq!(controller.scheduler().active(), 1);

        let done = controller
            .scheduler()
            .find(|t| matches!(t, Tick::RefreshDone { .. }))
            .unwrap();
        assert_eq!(
            controller.scheduler().timer(done.id).unwrap().duration,
            Duration::from_millis(1500)
        );
        controller.handle_tick(done);

        assert!(controller.surface().is_enabled(ControlId::RefreshButton));
        assert!(!controller.is_refreshing());
        assert_eq!(controller.scheduler().active(), 0);
        assert_eq!(controller.surface().revision(ElementId::StockGrid), grid + 1);
        assert_eq!(controller.surface().revision(ElementId::LastUpdate), 2);
    }

    #[test]
    fn test_auto_refresh_tick_starts_refresh() {
        let mut controller = controller();
        controller.set_auto_refresh(true);
        let tick = controller.scheduler().find(|t| *t == Tick::AutoRefresh).unwrap();

        controller.handle_tick(tick);
        assert!(controller.is_refreshing());

        // Tick while the fetch is in flight is absorbed
        controller.handle_tick(tick);
        assert_eq!(controller.scheduler().active(), 2);
    }

    #[test]
    fn test_tick_from_cancelled_auto_refresh_is_dropped() {
        let mut controller = controller();
        controller.set_auto_refresh(true);
        let tick = controller.scheduler().find(|t| *t == Tick::AutoRefresh).unwrap();
        controller.set_auto_refresh(false);

        controller.handle_tick(tick);
        assert!(!controller.is_refreshing());
    }

    #[test]
    fn test_switch_tab_shows_single_panel_and_renders() {
        let mut controller = controller();

        controller.switch_tab(Tab::Analysis);
        let board = controller.surface();
        assert_eq!(board.visible_tab(), Some(Tab::Analysis));
        assert!(board.is_active(ControlId::TabButton(Tab::Analysis)));
        assert!(!board.is_active(ControlId::TabButton(Tab::Overview)));
        assert!(board.chart(ElementId::SentimentGauge).is_some());
        assert_eq!(board.text(ElementId::AvgSentiment), Some("0.650"));

        controller.switch_tab(Tab::Correlation);
        assert_eq!(controller.surface().table().len(), 5);
        assert_eq!(controller.surface().visible_tab(), Some(Tab::Correlation));

        controller.switch_tab_by_name("mentions");
        assert_eq!(controller.surface().mentions(ElementId::PositiveMentions).len(), 3);
        assert_eq!(controller.surface().mentions(ElementId::NegativeMentions).len(), 3);

        controller.switch_tab_by_name("nope");
        assert_eq!(controller.surface().visible_tab(), Some(Tab::Mentions));
    }

    #[test]
    fn test_detail_for_unknown_ticker_is_omitted() {
        let mut controller = controller();
        controller.render_detail_analysis("NVDA");
        assert!(controller.surface().chart(ElementId::SentimentGauge).is_none());
    }

    #[test]
    fn test_select_ticker_redraws_detail() {
        let mut controller = controller();
        controller.select_ticker(ControlId::StockSelector, "MSFT");
        let chart = controller.surface().chart(ElementId::SentimentPriceChart).unwrap();
        assert_eq!(chart.layout.title.as_deref(), Some("MSFT - Sentiment vs Price"));

        controller.select_ticker(ControlId::StockSelector, "NVDA");
        assert_eq!(
            controller.surface().control_value(ControlId::StockSelector).as_deref(),
            Some("MSFT")
        );
    }

    #[test]
    fn test_detail_panel_fills_all_metrics() {
        let mut controller = controller();
        controller.switch_tab(Tab::Analysis);
        let board = controller.surface();
        assert_eq!(board.text(ElementId::LeadingCorr), Some("0.648"));
        assert_eq!(board.text(ElementId::PriceCorr), Some("0.720"));
        assert!(board.chart(ElementId::MentionVolumeChart).is_some());
        assert!(board.chart(ElementId::SentimentDistribution).is_some());
    }

    #[test]
    fn test_selectors_follow_selection() {
        let mut controller = controller();
        controller.toggle_selection("AAPL");
        controller.switch_tab(Tab::Analysis);

        let board = controller.surface();
        assert_eq!(board.control_value(ControlId::StockSelector).as_deref(), Some("TSLA"));
        assert_eq!(
            board.control_value(ControlId::MentionStockSelector).as_deref(),
            Some("TSLA")
        );
        let chart = board.chart(ElementId::SentimentPriceChart).unwrap();
        assert_eq!(chart.layout.title.as_deref(), Some("TSLA - Sentiment vs Price"));

        // Deselecting the shown ticker while the panel is open redraws it
        controller.toggle_selection("TSLA");
        let chart = controller.surface().chart(ElementId::SentimentPriceChart).unwrap();
        assert_eq!(chart.layout.title.as_deref(), Some("MSFT - Sentiment vs Price"));

        // Unselected tickers cannot be picked
        controller.select_ticker(ControlId::StockSelector, "AAPL");
        assert_eq!(
            controller.surface().control_value(ControlId::StockSelector).as_deref(),
            Some("MSFT")
        );
    }

    #[test]
    fn test_empty_selection_empties_selector_panels() {
        let mut controller = controller();
        controller.switch_tab(Tab::Analysis);
        assert!(controller.surface().chart(ElementId::SentimentGauge).is_some());

        for symbol in ["AAPL", "TSLA", "MSFT", "GOOGL", "AMZN"] {
            controller.toggle_selection(symbol);
        }
        let board = controller.surface();
        assert_eq!(board.control_value(ControlId::StockSelector).as_deref(), Some(""));
        assert!(board.chart(ElementId::SentimentGauge).is_none());
        assert_eq!(board.text(ElementId::LeadingCorr), None);

        controller.switch_tab(Tab::Mentions);
        assert!(controller.surface().mentions(ElementId::PositiveMentions).is_empty());
        controller.cycle_ticker(ControlId::MentionStockSelector, true);
        assert_eq!(
            controller.surface().control_value(ControlId::MentionStockSelector).as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_cycle_ticker_wraps_within_selection() {
        let config = DashboardConfig::default()
            .with_selection(vec![Ticker::new("GOOGL"), Ticker::new("TSLA")]);
        let mut controller = ViewStateController::new(
            &config,
            Board::new(),
            ManualScheduler::new(),
            ScriptedEntropy::constant(0.5),
        )
        .with_clock(fixed_now);
        controller.initialize();

        let selector = |c: &TestController| {
            c.surface().control_value(ControlId::MentionStockSelector)
        };
        assert_eq!(selector(&controller).as_deref(), Some("GOOGL"));

        controller.cycle_ticker(ControlId::MentionStockSelector, true);
        assert_eq!(selector(&controller).as_deref(), Some("TSLA"));
        controller.cycle_ticker(ControlId::MentionStockSelector, true);
        assert_eq!(selector(&controller).as_deref(), Some("GOOGL"));
        controller.cycle_ticker(ControlId::MentionStockSelector, false);
        assert_eq!(selector(&controller).as_deref(), Some("TSLA"));
    }
}
