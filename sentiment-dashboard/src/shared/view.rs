//! View models: plain data computed from the selection and the static table
//!
//! Nothing here touches a rendering surface. The controller computes these
//! and hands them to a [`Surface`](super::surface::Surface).

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::calc::{
    direction, format_change, format_price, format_score, gauge_value, leading_correlation,
    sentiment_color, sentiment_label, synthetic_series, COLOR_NEGATIVE, COLOR_NEUTRAL,
    COLOR_POSITIVE,
};
use super::entropy::Entropy;
use super::figure::{
    AxisLayout, AxisRange, BarColor, BarTrace, Figure, FigureLayout, GaugeSpec, GaugeStep,
    HeatmapTrace, IndicatorTrace, LineStyle, Marker, PieMarker, PieTrace, ScatterTrace, Trace,
    PRICE_LINE, VOLUME_BAR,
};
use super::types::{lookup, Direction, InstrumentRecord, SentimentLabel, Ticker};

/// Upper bound of the placeholder sentiment volatility
const VOLATILITY_SCALE: f64 = 0.3;
/// Probability threshold for the placeholder significance flag
const SIGNIFICANCE_THRESHOLD: f64 = 0.3;
/// Hourly buckets in the mention volume chart
const MENTION_VOLUME_HOURS: usize = 24;
/// Placeholder mentions per hour span `MENTION_FLOOR..MENTION_FLOOR + MENTION_SPAN`
const MENTION_FLOOR: f64 = 5.0;
const MENTION_SPAN: f64 = 45.0;

/// Resolve a selection to records, silently dropping unknown tickers
pub fn resolve(selection: &[Ticker]) -> impl Iterator<Item = &'static InstrumentRecord> + '_ {
    selection.iter().filter_map(|ticker| lookup(ticker.as_str()))
}

/// One card in the stock grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockCard {
    pub ticker: Ticker,
    pub name: String,
    /// `$182.45`
    pub price: String,
    /// `▲ 2.34%`
    pub change: String,
    pub direction: Direction,
    pub sentiment_label: SentimentLabel,
    /// `0.650`
    pub sentiment: String,
    pub correlation: String,
}

impl StockCard {
    pub fn from_record(record: &InstrumentRecord) -> Self {
        Self {
            ticker: record.ticker,
            name: record.name.to_string(),
            price: format_price(record.price),
            change: format_change(record.change),
            direction: direction(record.change),
            sentiment_label: sentiment_label(record.sentiment),
            sentiment: format_score(record.sentiment),
            correlation: format_score(record.correlation),
        }
    }
}

/// Cards for every selected ticker, in selection order
pub fn compute_grid(selection: &[Ticker]) -> Vec<StockCard> {
    resolve(selection).map(StockCard::from_record).collect()
}

/// Sentiment comparison bar chart and correlation heatmap row
pub fn compute_overview(selection: &[Ticker]) -> (Figure, Figure) {
    let records: Vec<&InstrumentRecord> = resolve(selection).collect();
    let labels: Vec<String> = records.iter().map(|r| r.ticker.to_string()).collect();
    let sentiments: Vec<f64> = records.iter().map(|r| r.sentiment).collect();
    let correlations: Vec<f64> = records.iter().map(|r| r.correlation).collect();

    let colors = sentiments
        .iter()
        .map(|&s| (if s > 0.0 { COLOR_POSITIVE } else { COLOR_NEGATIVE }).to_string())
        .collect();

    let mut comparison_layout = FigureLayout::dark(Some("Average Sentiment by Stock".to_string()));
    comparison_layout.xaxis = Some(AxisLayout::grid(None));
    comparison_layout.yaxis = Some(AxisLayout::grid(Some("Sentiment Score")));

    let comparison = Figure {
        data: vec![Trace::Bar(BarTrace {
            x: labels.clone(),
            y: sentiments,
            name: "Sentiment".to_string(),
            marker: Marker { color: colors },
        })],
        layout: comparison_layout,
    };

    let heatmap = Figure {
        data: vec![Trace::Heatmap(HeatmapTrace {
            z: vec![correlations],
            x: labels,
            y: vec!["Correlation".to_string()],
            colorscale: "RdYlGn".to_string(),
            zmid: 0.0,
        })],
        layout: FigureLayout::dark(Some("Sentiment-Price Correlation".to_string())),
    };

    (comparison, heatmap)
}

/// Headline numbers shown beside the gauge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub avg_sentiment: String,
    pub sentiment_volatility: String,
    pub price_correlation: String,
    pub leading_correlation: String,
}

/// Everything the analysis panel shows for one ticker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailAnalysis {
    pub ticker: Ticker,
    pub gauge_value: f64,
    pub gauge: Figure,
    pub series_chart: Figure,
    pub mention_volume: Figure,
    pub distribution: Figure,
    pub metrics: KeyMetrics,
}

pub fn compute_gauge(record: &InstrumentRecord) -> Figure {
    let mut layout = FigureLayout::dark(None);
    layout.plot_bgcolor = None;
    layout.height = Some(300);

    let step = |from: f64, to: f64, color: &str| GaugeStep {
        range: [from, to],
        color: color.to_string(),
    };

    Figure {
        data: vec![Trace::Indicator(IndicatorTrace {
            mode: "gauge+number".to_string(),
            value: gauge_value(record.sentiment),
            gauge: GaugeSpec {
                axis: AxisRange { range: [0.0, 100.0] },
                bar: BarColor {
                    color: sentiment_color(record.sentiment).to_string(),
                },
                steps: vec![
                    step(0.0, 30.0, "#FFCDD2"),
                    step(30.0, 70.0, "#FFE0B2"),
                    step(70.0, 100.0, "#C8E6C9"),
                ],
            },
        })],
        layout,
    }
}

pub fn compute_detail<Tz>(
    record: &InstrumentRecord,
    now: DateTime<Tz>,
    entropy: &mut impl Entropy,
) -> DetailAnalysis
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let metrics = KeyMetrics {
        avg_sentiment: format_score(record.sentiment),
        sentiment_volatility: format_score(entropy.unit() * VOLATILITY_SCALE),
        price_correlation: format_score(record.correlation),
        leading_correlation: format_score(leading_correlation(record.correlation)),
    };

    let series = synthetic_series(record, now, entropy);
    let times: Vec<String> = series.iter().map(|p| p.time.to_rfc3339()).collect();

    let mut layout = FigureLayout::dark(Some(format!("{} - Sentiment vs Price", record.ticker)));
    layout.xaxis = Some(AxisLayout::grid(None));
    layout.yaxis = Some(AxisLayout::grid(Some("Price ($)")));
    layout.yaxis2 = Some(AxisLayout {
        overlaying: Some("y".to_string()),
        side: Some("right".to_string()),
        ..AxisLayout::grid(Some("Sentiment"))
    });
    layout.height = Some(400);

    let series_chart = Figure {
        data: vec![
            Trace::Scatter(ScatterTrace {
                x: times.clone(),
                y: series.iter().map(|p| p.price).collect(),
                name: "Price".to_string(),
                yaxis: "y".to_string(),
                line: LineStyle {
                    color: PRICE_LINE.to_string(),
                },
            }),
            Trace::Scatter(ScatterTrace {
                x: times,
                y: series.iter().map(|p| p.sentiment).collect(),
                name: "Sentiment".to_string(),
                yaxis: "y2".to_string(),
                line: LineStyle {
                    color: COLOR_POSITIVE.to_string(),
                },
            }),
        ],
        layout,
    };

    let recent: Vec<String> = series
        .iter()
        .rev()
        .take(MENTION_VOLUME_HOURS)
        .rev()
        .map(|p| p.time.format("%H:00").to_string())
        .collect();
    let mention_volume = compute_mention_volume(record, recent, entropy);
    let sentiments: Vec<f64> = series.iter().map(|p| p.sentiment).collect();
    let distribution = compute_distribution(record, &sentiments);

    DetailAnalysis {
        ticker: record.ticker,
        gauge_value: gauge_value(record.sentiment),
        gauge: compute_gauge(record),
        series_chart,
        mention_volume,
        distribution,
        metrics,
    }
}

/// Placeholder mention counts, one bar per hour label
pub fn compute_mention_volume(
    record: &InstrumentRecord,
    hours: Vec<String>,
    entropy: &mut impl Entropy,
) -> Figure {
    let counts = hours
        .iter()
        .map(|_| (MENTION_FLOOR + entropy.unit() * MENTION_SPAN).floor())
        .collect();

    let mut layout = FigureLayout::dark(Some(format!(
        "{} - Volume of Mentions Over Time",
        record.ticker
    )));
    layout.xaxis = Some(AxisLayout::grid(Some("Time")));
    layout.yaxis = Some(AxisLayout::grid(Some("Number of Mentions")));

    let colors = vec![VOLUME_BAR.to_string(); hours.len()];
    Figure {
        data: vec![Trace::Bar(BarTrace {
            x: hours,
            y: counts,
            name: "Mentions".to_string(),
            marker: Marker { color: colors },
        })],
        layout,
    }
}

/// Donut of how many sentiment samples fall in each label band
pub fn compute_distribution(record: &InstrumentRecord, sentiments: &[f64]) -> Figure {
    let count = |label: SentimentLabel| {
        sentiments
            .iter()
            .filter(|&&s| sentiment_label(s) == label)
            .count() as f64
    };

    let mut layout = FigureLayout::dark(Some(format!("{} - Sentiment Distribution", record.ticker)));
    layout.plot_bgcolor = None;

    Figure {
        data: vec![Trace::Pie(PieTrace {
            labels: vec![
                "Positive".to_string(),
                "Neutral".to_string(),
                "Negative".to_string(),
            ],
            values: vec![
                count(SentimentLabel::Bullish),
                count(SentimentLabel::Neutral),
                count(SentimentLabel::Bearish),
            ],
            marker: PieMarker {
                colors: vec![
                    COLOR_POSITIVE.to_string(),
                    COLOR_NEUTRAL.to_string(),
                    COLOR_NEGATIVE.to_string(),
                ],
            },
            hole: 0.4,
        })],
        layout,
    }
}

/// One row of the correlation summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationRow {
    pub ticker: Ticker,
    pub sentiment: f64,
    pub correlation: f64,
    pub leading_correlation: f64,
    pub volatility: f64,
    pub significant: bool,
}

pub fn compute_correlation_rows(
    selection: &[Ticker],
    entropy: &mut impl Entropy,
) -> Vec<CorrelationRow> {
    resolve(selection)
        .map(|record| {
            let significant = entropy.above(SIGNIFICANCE_THRESHOLD);
            CorrelationRow {
                ticker: record.ticker,
                sentiment: record.sentiment,
                correlation: record.correlation,
                leading_correlation: leading_correlation(record.correlation),
                volatility: entropy.unit() * VOLATILITY_SCALE,
                significant,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Sample social post referencing a ticker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentionCard {
    pub source: &'static str,
    pub time: &'static str,
    pub score: f64,
    pub text: String,
    pub polarity: Polarity,
}

impl MentionCard {
    pub fn score_text(&self) -> String {
        format!("Score: {}", format_score(self.score))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentionSet {
    pub positive: Vec<MentionCard>,
    pub negative: Vec<MentionCard>,
}

pub fn compute_mentions(record: &InstrumentRecord) -> MentionSet {
    let ticker = record.ticker;
    let name = record.name;
    let card = |source, time, score, text: String, polarity| MentionCard {
        source,
        time,
        score,
        text,
        polarity,
    };

    MentionSet {
        positive: vec![
            card("Twitter", "2 hours ago", 0.856, format!("${ticker} looking strong! 🚀 Great earnings report."), Polarity::Positive),
            card("Reddit", "3 hours ago", 0.782, format!("Bullish on ${ticker}. This is my top pick for 2024."), Polarity::Positive),
            card("News", "5 hours ago", 0.721, format!("{name} announces new product line."), Polarity::Positive),
        ],
        negative: vec![
            card("Twitter", "1 hour ago", -0.654, format!("${ticker} overvalued at current levels IMO."), Polarity::Negative),
            card("Reddit", "4 hours ago", -0.587, format!("Bearish on ${ticker}. Selling my position."), Polarity::Negative),
            card("News", "6 hours ago", -0.523, format!("Analysts express concerns about {name}."), Polarity::Negative),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entropy::ScriptedEntropy;
    use crate::shared::types::all_tickers;
    use chrono::Utc;

    fn tickers(symbols: &[&'static str]) -> Vec<Ticker> {
        symbols.iter().map(|&s| Ticker::new(s)).collect()
    }

    #[test]
    fn test_grid_follows_selection_order() {
        let cards = compute_grid(&tickers(&["MSFT", "AAPL", "AMZN"]));
        let order: Vec<&str> = cards.iter().map(|c| c.ticker.as_str()).collect();
        assert_eq!(order, vec!["MSFT", "AAPL", "AMZN"]);
    }

    #[test]
    fn test_grid_skips_unknown_tickers() {
        let cards = compute_grid(&tickers(&["AAPL", "NVDA"]));
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_card_arrow_matches_change_sign() {
        for card in compute_grid(&all_tickers()) {
            let record = lookup(card.ticker.as_str()).unwrap();
            assert_eq!(card.change.starts_with('▲'), record.change >= 0.0);
            assert_eq!(card.direction == Direction::Up, record.change >= 0.0);
        }
    }

    #[test]
    fn test_aapl_card() {
        let card = StockCard::from_record(lookup("AAPL").unwrap());
        assert_eq!(card.name, "Apple Inc.");
        assert_eq!(card.price, "$182.45");
        assert_eq!(card.change, "▲ 2.34%");
        assert_eq!(card.sentiment_label, SentimentLabel::Bullish);
        assert_eq!(card.sentiment, "0.650");
        assert_eq!(card.correlation, "0.720");
    }

    #[test]
    fn test_overview_figures() {
        let (comparison, heatmap) = compute_overview(&tickers(&["AAPL", "TSLA"]));

        let Trace::Bar(bar) = &comparison.data[0] else {
            panic!("expected bar trace");
        };
        assert_eq!(bar.x, vec!["AAPL", "TSLA"]);
        assert_eq!(bar.y, vec![0.65, 0.45]);
        assert!(bar.marker.color.iter().all(|c| c == COLOR_POSITIVE));

        let Trace::Heatmap(map) = &heatmap.data[0] else {
            panic!("expected heatmap trace");
        };
        assert_eq!(map.z, vec![vec![0.72, 0.58]]);
        assert_eq!(map.y, vec!["Correlation"]);
        assert_eq!(map.zmid, 0.0);
    }

    #[test]
    fn test_overview_empty_selection() {
        let (comparison, _) = compute_overview(&[]);
        let Trace::Bar(bar) = &comparison.data[0] else {
            panic!("expected bar trace");
        };
        assert!(bar.x.is_empty());
    }

    #[test]
    fn test_detail_analysis() {
        let record = lookup("AAPL").unwrap();
        let mut entropy = ScriptedEntropy::constant(0.5);
        let detail = compute_detail(record, Utc::now(), &mut entropy);

        assert_eq!(detail.gauge_value, 82.5);
        assert_eq!(detail.metrics.avg_sentiment, "0.650");
        assert_eq!(detail.metrics.sentiment_volatility, "0.150");
        assert_eq!(detail.metrics.price_correlation, "0.720");
        assert_eq!(detail.metrics.leading_correlation, "0.648");
        assert_eq!(detail.series_chart.layout.title.as_deref(), Some("AAPL - Sentiment vs Price"));

        for trace in &detail.series_chart.data {
            let Trace::Scatter(scatter) = trace else {
                panic!("expected scatter trace");
            };
            assert_eq!(scatter.x.len(), 169);
            assert_eq!(scatter.y.len(), 169);
        }

        let Trace::Indicator(indicator) = &detail.gauge.data[0] else {
            panic!("expected indicator trace");
        };
        assert_eq!(indicator.gauge.bar.color, COLOR_POSITIVE);
        assert_eq!(indicator.gauge.steps.len(), 3);
    }

    #[test]
    fn test_detail_volume_and_distribution() {
        let record = lookup("TSLA").unwrap();
        let mut entropy = ScriptedEntropy::constant(0.5);
        let detail = compute_detail(record, Utc::now(), &mut entropy);

        let Trace::Bar(volume) = &detail.mention_volume.data[0] else {
            panic!("expected bar trace");
        };
        assert_eq!(volume.x.len(), 24);
        assert!(volume.y.iter().all(|&c| c == 27.0));
        assert_eq!(
            detail.mention_volume.layout.title.as_deref(),
            Some("TSLA - Volume of Mentions Over Time")
        );

        // Constant jitter keeps every sample at the base score of 0.45
        let Trace::Pie(pie) = &detail.distribution.data[0] else {
            panic!("expected pie trace");
        };
        assert_eq!(pie.labels, vec!["Positive", "Neutral", "Negative"]);
        assert_eq!(pie.values, vec![169.0, 0.0, 0.0]);
    }

    #[test]
    fn test_distribution_counts_label_bands() {
        let record = lookup("AMZN").unwrap();
        let figure = compute_distribution(record, &[0.5, 0.2, -0.2, -0.3, 0.0, 0.21]);
        let Trace::Pie(pie) = &figure.data[0] else {
            panic!("expected pie trace");
        };
        assert_eq!(pie.values, vec![2.0, 3.0, 1.0]);
        assert_eq!(pie.marker.colors[2], COLOR_NEGATIVE);
    }

    #[test]
    fn test_correlation_rows() {
        let mut entropy = ScriptedEntropy::new(vec![0.9, 0.5, 0.1, 1.0 / 3.0]);
        let rows = compute_correlation_rows(&tickers(&["AAPL", "TSLA"]), &mut entropy);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].significant);
        assert!((rows[0].volatility - 0.15).abs() < 1e-12);
        assert!((rows[0].leading_correlation - 0.648).abs() < 1e-12);
        assert!(!rows[1].significant);
        assert!((rows[1].volatility - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_mentions_reference_ticker_and_name() {
        let mentions = compute_mentions(lookup("TSLA").unwrap());
        assert_eq!(mentions.positive.len(), 3);
        assert_eq!(mentions.negative.len(), 3);
        assert_eq!(mentions.positive[0].text, "$TSLA looking strong! 🚀 Great earnings report.");
        assert_eq!(mentions.negative[2].text, "Analysts express concerns about Tesla, Inc..");
        assert_eq!(mentions.positive[0].score_text(), "Score: 0.856");
        assert_eq!(mentions.negative[0].time, "1 hour ago");
        assert!(mentions.negative.iter().all(|m| m.score < 0.0));
    }
}
