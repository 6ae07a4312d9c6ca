/// Dashboard configuration
///
/// Read from environment variables with sensible defaults:
/// - `DASHBOARD_TICKERS`: initial selection, comma separated (default: all)
/// - `DASHBOARD_TIME_RANGE`: time range label in days, 1-30 (default: 7)
/// - `DASHBOARD_AUTO_REFRESH`: start with auto-refresh on (default: false)
/// - `DASHBOARD_REFRESH_DELAY_MS`: simulated fetch delay (default: 1500)
/// - `DASHBOARD_AUTO_REFRESH_SECS`: auto-refresh period (default: 300)
/// - `DASHBOARD_SEED`: fixed RNG seed for reproducible placeholder values
/// - `DASHBOARD_LOG`: log file path; logging is off when unset
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use super::calc::{clamp_time_range, TIME_RANGE_DEFAULT_DAYS};
use super::error::DashboardError;
use super::types::{all_tickers, is_valid_symbol, lookup, Ticker};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Tickers selected on startup, in display order
    pub initial_selection: Vec<Ticker>,
    /// Initial time range label in days
    pub time_range_days: u32,
    /// Start with auto-refresh enabled
    pub auto_refresh: bool,
    /// Artificial delay of a manual refresh
    pub refresh_delay: Duration,
    /// Auto-refresh period
    pub auto_refresh_period: Duration,
    /// Seed for the placeholder random values
    pub seed: Option<u64>,
    /// Log file; the terminal belongs to the UI
    pub log_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            initial_selection: all_tickers(),
            time_range_days: TIME_RANGE_DEFAULT_DAYS,
            auto_refresh: false,
            refresh_delay: Duration::from_millis(1500),
            auto_refresh_period: Duration::from_secs(300),
            seed: None,
            log_path: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, DashboardError> {
        let mut config = Self::default();

        if let Some(raw) = get("DASHBOARD_TICKERS") {
            config.initial_selection = parse_tickers(&raw);
        }
        if let Some(raw) = get("DASHBOARD_TIME_RANGE") {
            let days = parse_number::<u32>("DASHBOARD_TIME_RANGE", &raw)?;
            config.time_range_days = clamp_time_range(days);
        }
        if let Some(raw) = get("DASHBOARD_AUTO_REFRESH") {
            config.auto_refresh = parse_bool("DASHBOARD_AUTO_REFRESH", &raw)?;
        }
        if let Some(raw) = get("DASHBOARD_REFRESH_DELAY_MS") {
            let millis = parse_number::<u64>("DASHBOARD_REFRESH_DELAY_MS", &raw)?;
            config.refresh_delay = Duration::from_millis(millis);
        }
        if let Some(raw) = get("DASHBOARD_AUTO_REFRESH_SECS") {
            let secs = parse_number::<u64>("DASHBOARD_AUTO_REFRESH_SECS", &raw)?;
            if secs == 0 {
                return Err(DashboardError::invalid(
                    "DASHBOARD_AUTO_REFRESH_SECS",
                    &raw,
                    "period must be positive",
                ));
            }
            config.auto_refresh_period = Duration::from_secs(secs);
        }
        if let Some(raw) = get("DASHBOARD_SEED") {
            config.seed = Some(parse_number::<u64>("DASHBOARD_SEED", &raw)?);
        }
        if let Some(raw) = get("DASHBOARD_LOG") {
            if !raw.trim().is_empty() {
                config.log_path = Some(PathBuf::from(raw.trim()));
            }
        }

        Ok(config)
    }

    /// Set initial selection
    pub fn with_selection(mut self, selection: Vec<Ticker>) -> Self {
        self.initial_selection = selection;
        self
    }

    /// Set simulated refresh delay
    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    /// Set auto-refresh period
    pub fn with_auto_refresh_period(mut self, period: Duration) -> Self {
        self.auto_refresh_period = period;
        self
    }

    /// Set RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Split, upper-case and resolve tickers, dropping duplicates and anything
/// not in the market table
fn parse_tickers(raw: &str) -> Vec<Ticker> {
    let mut selection: Vec<Ticker> = Vec::new();
    for symbol in raw.split(',').map(|s| s.trim().to_uppercase()) {
        if symbol.is_empty() {
            continue;
        }
        if !is_valid_symbol(&symbol) {
            warn!(%symbol, "ignoring malformed ticker");
            continue;
        }
        match lookup(&symbol) {
            Some(record) if !selection.contains(&record.ticker) => selection.push(record.ticker),
            Some(_) => {}
            None => warn!(%symbol, "ignoring unknown ticker"),
        }
    }
    selection
}

fn parse_number<T>(key: &'static str, raw: &str) -> Result<T, DashboardError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| DashboardError::invalid(key, raw, e))
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, DashboardError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DashboardError::invalid(key, raw, "expected true/false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<DashboardConfig, DashboardError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.initial_selection.len(), 5);
        assert_eq!(config.refresh_delay, Duration::from_millis(1500));
        assert_eq!(config.auto_refresh_period, Duration::from_secs(300));
    }

    #[test]
    fn test_tickers_filtered_and_ordered() {
        let config = load(&[("DASHBOARD_TICKERS", "msft, aapl,NVDA,BRK.B,MSFT,")]).unwrap();
        let symbols: Vec<&str> = config.initial_selection.iter().map(|t| t.as_str()).collect();
        assert_eq!(symbols, vec!["MSFT", "AAPL"]);
    }

    #[test]
    fn test_numeric_and_bool_values() {
        let config = load(&[
            ("DASHBOARD_TIME_RANGE", "45"),
            ("DASHBOARD_AUTO_REFRESH", "yes"),
            ("DASHBOARD_REFRESH_DELAY_MS", "10"),
            ("DASHBOARD_SEED", "7"),
            ("DASHBOARD_LOG", "/tmp/dashboard.log"),
        ])
        .unwrap();
        assert_eq!(config.time_range_days, 30);
        assert!(config.auto_refresh);
        assert_eq!(config.refresh_delay, Duration::from_millis(10));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/dashboard.log")));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            load(&[("DASHBOARD_SEED", "abc")]),
            Err(DashboardError::InvalidConfig { key: "DASHBOARD_SEED", .. })
        ));
        assert!(load(&[("DASHBOARD_AUTO_REFRESH", "maybe")]).is_err());
        assert!(load(&[("DASHBOARD_AUTO_REFRESH_SECS", "0")]).is_err());
    }
}
