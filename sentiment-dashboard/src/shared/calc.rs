//! Sentiment labelling, gauge scaling, formatting and synthetic series
//!
//! Everything here is a pure function of its inputs (plus an injected
//! `Entropy` for the jittered series).

use chrono::{DateTime, Duration, TimeZone};

use super::entropy::Entropy;
use super::types::{Direction, InstrumentRecord, SentimentLabel};

/// Scores strictly above this are bullish, strictly below the negation bearish
pub const SENTIMENT_THRESHOLD: f64 = 0.2;

/// Hours of synthetic history behind the current point
pub const SERIES_HOURS: i64 = 168;

/// Price jitter amplitude (±2.5%)
const PRICE_JITTER: f64 = 0.05;
/// Sentiment jitter amplitude (±0.2)
const SENTIMENT_JITTER: f64 = 0.4;

pub const TIME_RANGE_MIN_DAYS: u32 = 1;
pub const TIME_RANGE_MAX_DAYS: u32 = 30;
pub const TIME_RANGE_DEFAULT_DAYS: u32 = 7;

pub const COLOR_POSITIVE: &str = "#00C853";
pub const COLOR_NEGATIVE: &str = "#D32F2F";
pub const COLOR_NEUTRAL: &str = "#FFA726";

pub fn sentiment_label(score: f64) -> SentimentLabel {
    if score > SENTIMENT_THRESHOLD {
        SentimentLabel::Bullish
    } else if score < -SENTIMENT_THRESHOLD {
        SentimentLabel::Bearish
    } else {
        SentimentLabel::Neutral
    }
}

pub fn sentiment_color(score: f64) -> &'static str {
    match sentiment_label(score) {
        SentimentLabel::Bullish => COLOR_POSITIVE,
        SentimentLabel::Bearish => COLOR_NEGATIVE,
        SentimentLabel::Neutral => COLOR_NEUTRAL,
    }
}

/// Map sentiment in [-1, 1] onto the [0, 100] gauge dial
pub fn gauge_value(sentiment: f64) -> f64 {
    (sentiment + 1.0) * 50.0
}

pub fn leading_correlation(correlation: f64) -> f64 {
    correlation * 0.9
}

pub fn direction(change: f64) -> Direction {
    if change >= 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

pub fn change_arrow(change: f64) -> &'static str {
    match direction(change) {
        Direction::Up => "▲",
        Direction::Down => "▼",
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// `▲ 2.34%` / `▼ 1.23%`
pub fn format_change(change: f64) -> String {
    format!("{} {:.2}%", change_arrow(change), change.abs())
}

pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

pub fn format_time_range(days: u32) -> String {
    format!("{} days", days)
}

pub fn clamp_time_range(days: u32) -> u32 {
    days.clamp(TIME_RANGE_MIN_DAYS, TIME_RANGE_MAX_DAYS)
}

/// One hourly sample of the synthetic price/sentiment history
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint<Tz: TimeZone> {
    pub time: DateTime<Tz>,
    pub price: f64,
    pub sentiment: f64,
}

/// Hourly history from `now - 168h` to `now` inclusive (169 points, oldest
/// first), jittered around the record's base price and sentiment.
pub fn synthetic_series<Tz: TimeZone>(
    record: &InstrumentRecord,
    now: DateTime<Tz>,
    entropy: &mut impl Entropy,
) -> Vec<SeriesPoint<Tz>> {
    (0..=SERIES_HOURS)
        .rev()
        .map(|hours_back| {
            let time = now.clone() - Duration::hours(hours_back);
            let price = record.price * (1.0 + (entropy.unit() - 0.5) * PRICE_JITTER);
            let sentiment = record.sentiment + (entropy.unit() - 0.5) * SENTIMENT_JITTER;
            SeriesPoint {
                time,
                price,
                sentiment,
            }
        })
        .collect()
}
