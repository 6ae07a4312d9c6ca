/// Stock Sentiment Dashboard - Shared Library
///
/// Drives the `sentiment-dashboard` terminal binary:
/// - static instrument table and derived sentiment classification
/// - view models for the stock grid, overview charts, detail analysis,
///   correlation table and mentions panels
/// - a view-state controller that owns selection, tabs and refresh timers
///   and writes rendered fragments to a surface
pub mod shared;

// Re-export commonly used types for convenience
pub use shared::types::{InstrumentRecord, SentimentLabel, Tab, Ticker, MARKET_TABLE};

pub use shared::config::DashboardConfig;
pub use shared::error::DashboardError;

pub use shared::controller::{ViewState, ViewStateController};
pub use shared::entropy::{Entropy, RngEntropy, ScriptedEntropy};
pub use shared::scheduler::{ManualScheduler, Scheduler, Tick, TimerId, TimerTick, TokioScheduler};
pub use shared::surface::{Board, ControlId, ElementId, Fragment, Surface};

pub use shared::widget::render_dashboard;
