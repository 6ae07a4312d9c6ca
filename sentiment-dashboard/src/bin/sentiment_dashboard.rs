/// Stock Sentiment Dashboard
///
/// Terminal dashboard over a static five-stock table: sentiment cards,
/// comparison charts, per-ticker detail analysis, a correlation table and
/// top social mentions. Values beyond the table are placeholders.
///
/// Keys:
///   1-5        toggle AAPL, TSLA, MSFT, GOOGL, AMZN
///   Tab/S-Tab  next/previous panel (o/a/c/m jump directly)
///   [ / ]      cycle the ticker shown in the analysis or mentions panel
///   + / -      widen/narrow the time range label
///   r          refresh
///   t          toggle auto-refresh
///   q / Esc    quit
use std::{error::Error, fs::OpenOptions, io, path::Path, sync::Mutex, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use sentiment_dashboard::{
    render_dashboard, Board, ControlId, DashboardConfig, DashboardError, Entropy, RngEntropy,
    Scheduler, Tab, TimerTick, TokioScheduler, ViewStateController, MARKET_TABLE,
};
use tokio::sync::mpsc;
use tracing::info;

/// How long the UI waits for a key before draining timer ticks
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = DashboardConfig::from_env()?;
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }
    info!(?config, "starting sentiment dashboard");

    // Setup panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (scheduler, mut tick_rx) = TokioScheduler::new();
    let entropy = match config.seed {
        Some(seed) => RngEntropy::seeded(seed),
        None => RngEntropy::from_os(),
    };
    let mut controller = ViewStateController::new(&config, Board::new(), scheduler, entropy);
    controller.initialize();

    // Restore the terminal before surfacing any loop error
    let result = run(&mut terminal, &mut controller, &mut tick_rx);
    restore_terminal(&mut terminal)?;
    result?;

    info!("sentiment dashboard stopped");
    Ok(())
}

fn run<B, C, E>(
    terminal: &mut Terminal<B>,
    controller: &mut ViewStateController<Board, C, E>,
    tick_rx: &mut mpsc::UnboundedReceiver<TimerTick>,
) -> io::Result<()>
where
    B: Backend,
    C: Scheduler,
    E: Entropy,
{
    loop {
        while let Ok(tick) = tick_rx.try_recv() {
            controller.handle_tick(tick);
        }

        terminal.draw(|f| render_dashboard(f, controller.surface()))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !handle_key(controller, key.code) {
                    return Ok(());
                }
            }
        }
    }
}

fn restore_terminal<B: Backend + io::Write>(terminal: &mut Terminal<B>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Apply one key press; returns false when the user asked to quit
fn handle_key<C, E>(controller: &mut ViewStateController<Board, C, E>, code: KeyCode) -> bool
where
    C: Scheduler,
    E: Entropy,
{
    let current_tab = controller.surface().visible_tab().unwrap_or(Tab::Overview);

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            controller.toggle_selection(MARKET_TABLE[idx].ticker.as_str());
        }
        KeyCode::Tab => controller.switch_tab(current_tab.next()),
        KeyCode::BackTab => controller.switch_tab(current_tab.previous()),
        KeyCode::Char('o') => controller.switch_tab(Tab::Overview),
        KeyCode::Char('a') => controller.switch_tab(Tab::Analysis),
        KeyCode::Char('c') => controller.switch_tab(Tab::Correlation),
        KeyCode::Char('m') => controller.switch_tab(Tab::Mentions),
        KeyCode::Char('r') => {
            controller.refresh(ControlId::RefreshButton);
        }
        KeyCode::Char('t') => {
            let enabled = controller.auto_refresh_enabled();
            controller.set_auto_refresh(!enabled);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let days = controller.time_range();
            controller.set_time_range(days.saturating_add(1));
        }
        KeyCode::Char('-') => {
            let days = controller.time_range();
            controller.set_time_range(days.saturating_sub(1));
        }
        KeyCode::Char(c @ ('[' | ']')) => {
            let selector = match current_tab {
                Tab::Analysis => ControlId::StockSelector,
                Tab::Mentions => ControlId::MentionStockSelector,
                _ => return true,
            };
            controller.cycle_ticker(selector, c == ']');
        }
        _ => {}
    }
    true
}

/// Log to a file; stdout belongs to the terminal UI
fn init_logging(path: &Path) -> Result<(), DashboardError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| DashboardError::Logging(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_dashboard::{ElementId, ManualScheduler, ScriptedEntropy, Surface};

    type TestController = ViewStateController<Board, ManualScheduler, ScriptedEntropy>;

    fn controller() -> TestController {
        let mut controller = ViewStateController::new(
            &DashboardConfig::default(),
            Board::new(),
            ManualScheduler::new(),
            ScriptedEntropy::constant(0.5),
        );
        controller.initialize();
        controller
    }

    #[test]
    fn test_quit_keys() {
        let mut controller = controller();
        assert!(!handle_key(&mut controller, KeyCode::Char('q')));
        assert!(!handle_key(&mut controller, KeyCode::Esc));
        assert!(handle_key(&mut controller, KeyCode::Char('x')));
    }

    #[test]
    fn test_number_keys_toggle_tickers() {
        let mut controller = controller();
        assert!(handle_key(&mut controller, KeyCode::Char('2')));
        let symbols: Vec<&str> = controller.selection().iter().map(|t| t.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "GOOGL", "AMZN"]);
    }

    #[test]
    fn test_tab_and_bracket_keys() {
        let mut controller = controller();
        handle_key(&mut controller, KeyCode::Tab);
        assert_eq!(controller.surface().visible_tab(), Some(Tab::Analysis));

        handle_key(&mut controller, KeyCode::Char(']'));
        assert_eq!(
            controller.surface().control_value(ControlId::StockSelector).as_deref(),
            Some("TSLA")
        );
        handle_key(&mut controller, KeyCode::Char('['));
        handle_key(&mut controller, KeyCode::Char('['));
        assert_eq!(
            controller.surface().control_value(ControlId::StockSelector).as_deref(),
            Some("AMZN")
        );

        handle_key(&mut controller, KeyCode::BackTab);
        assert_eq!(controller.surface().visible_tab(), Some(Tab::Overview));
    }

    #[test]
    fn test_refresh_range_and_auto_keys() {
        let mut controller = controller();
        handle_key(&mut controller, KeyCode::Char('+'));
        assert_eq!(controller.surface().text(ElementId::TimeRangeValue), Some("8 days"));
        handle_key(&mut controller, KeyCode::Char('-'));
        handle_key(&mut controller, KeyCode::Char('-'));
        assert_eq!(controller.time_range(), 6);

        handle_key(&mut controller, KeyCode::Char('r'));
        assert!(controller.is_refreshing());
        handle_key(&mut controller, KeyCode::Char('t'));
        assert!(controller.auto_refresh_enabled());
        handle_key(&mut controller, KeyCode::Char('t'));
        assert!(!controller.auto_refresh_enabled());
    }
}
