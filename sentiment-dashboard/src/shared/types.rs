/// Core data types for the sentiment dashboard
///
/// The instrument table is static mock data: five large-cap stocks with a
/// fixed price, daily change, aggregate sentiment and sentiment-price
/// correlation.

use serde::Serialize;

/// Short stock symbol identifying an instrument record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Ticker(&'static str);

impl Ticker {
    pub const fn new(symbol: &'static str) -> Self {
        Self(symbol)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Static, read-only instrument record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentRecord {
    pub ticker: Ticker,
    /// Company display name
    pub name: &'static str,
    /// Last price in USD
    pub price: f64,
    /// Percent change since previous close
    pub change: f64,
    /// Aggregate sentiment score in [-1, 1]
    pub sentiment: f64,
    /// Sentiment-to-price correlation in [-1, 1]
    pub correlation: f64,
}

pub const MARKET_TABLE: [InstrumentRecord; 5] = [
    InstrumentRecord {
        ticker: Ticker::new("AAPL"),
        name: "Apple Inc.",
        price: 182.45,
        change: 2.34,
        sentiment: 0.65,
        correlation: 0.72,
    },
    InstrumentRecord {
        ticker: Ticker::new("TSLA"),
        name: "Tesla, Inc.",
        price: 248.92,
        change: -1.23,
        sentiment: 0.45,
        correlation: 0.58,
    },
    InstrumentRecord {
        ticker: Ticker::new("MSFT"),
        name: "Microsoft Corporation",
        price: 378.15,
        change: 1.87,
        sentiment: 0.58,
        correlation: 0.68,
    },
    InstrumentRecord {
        ticker: Ticker::new("GOOGL"),
        name: "Alphabet Inc.",
        price: 142.67,
        change: 0.95,
        sentiment: 0.52,
        correlation: 0.61,
    },
    InstrumentRecord {
        ticker: Ticker::new("AMZN"),
        name: "Amazon.com, Inc.",
        price: 151.34,
        change: -0.67,
        sentiment: 0.48,
        correlation: 0.55,
    },
];

/// Look up a record by symbol. Unknown symbols yield `None`.
pub fn lookup(symbol: &str) -> Option<&'static InstrumentRecord> {
    MARKET_TABLE
        .iter()
        .find(|record| record.ticker.as_str() == symbol)
}

/// Every ticker in the table, in table order
pub fn all_tickers() -> Vec<Ticker> {
    MARKET_TABLE.iter().map(|record| record.ticker).collect()
}

/// Ticker format check: alphabetic, at most five characters
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty() && symbol.len() <= 5 && symbol.chars().all(|c| c.is_ascii_alphabetic())
}

/// Dashboard content panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Overview,
    Analysis,
    Correlation,
    Mentions,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Analysis, Tab::Correlation, Tab::Mentions];

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Analysis => "analysis",
            Tab::Correlation => "correlation",
            Tab::Mentions => "mentions",
        }
    }

    pub fn from_name(name: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.name() == name)
    }

    /// Human readable tab caption
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Analysis => "Detailed Analysis",
            Tab::Correlation => "Correlation",
            Tab::Mentions => "Top Mentions",
        }
    }

    /// Id of the content panel shown for this tab (e.g. `overview-tab`)
    pub fn panel_id(&self) -> &'static str {
        match self {
            Tab::Overview => "overview-tab",
            Tab::Analysis => "analysis-tab",
            Tab::Correlation => "correlation-tab",
            Tab::Mentions => "mentions-tab",
        }
    }

    pub fn next(&self) -> Tab {
        let idx = Tab::ALL.iter().position(|t| t == self).unwrap_or(0);
        Tab::ALL[(idx + 1) % Tab::ALL.len()]
    }

    pub fn previous(&self) -> Tab {
        let idx = Tab::ALL.iter().position(|t| t == self).unwrap_or(0);
        Tab::ALL[(idx + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sentiment bucket derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Bullish => "Bullish",
            SentimentLabel::Bearish => "Bearish",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price direction for the change arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Up,
    Down,
}
