//! Ratatui rendering of the dashboard [`Board`]
//!
//! Layout:
//! ┌─ status bar: title, auto-refresh, time range, last update ───────────┐
//! ├─ tabs ───────────────────────────────────────────────────────────────┤
//! │ [card] [card] [card] [card] [card]                                   │
//! ├─ active panel (overview / analysis / correlation / mentions) ────────┤
//! └──────────────────────────────────────────────────────────────────────┘

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Cell, Chart, Dataset, Gauge,
        GraphType, Paragraph, Row, Sparkline, Table, Tabs, Wrap,
    },
    Frame,
};

use super::figure::{Figure, Trace};
use super::surface::{Board, ControlId, ElementId, Surface};
use super::types::{Direction as PriceDirection, SentimentLabel, Tab};
use super::view::{MentionCard, Polarity};

const C_BUY: Color = Color::Rgb(0, 200, 83);
const C_SELL: Color = Color::Rgb(211, 47, 47);
const C_NEUTRAL: Color = Color::Rgb(255, 167, 38);
const C_DIM: Color = Color::Rgb(120, 120, 120);
const C_BRIGHT: Color = Color::Rgb(220, 220, 220);
const C_ACCENT: Color = Color::Rgb(25, 118, 210);
const C_BG: Color = Color::Rgb(26, 26, 26);

/// Draw the whole dashboard
pub fn render_dashboard(f: &mut Frame, board: &Board) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(f.area());

    render_status_bar(f, chunks[0], board);
    render_tabs(f, chunks[1], board);
    render_stock_grid(f, chunks[2], board);

    match board.visible_tab().unwrap_or(Tab::Overview) {
        Tab::Overview => render_overview(f, chunks[3], board),
        Tab::Analysis => render_analysis(f, chunks[3], board),
        Tab::Correlation => render_correlation(f, chunks[3], board),
        Tab::Mentions => render_mentions(f, chunks[3], board),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, board: &Board) {
    let auto_on = board.control_value(ControlId::AutoRefresh).as_deref() == Some("true");
    let refreshing = !board.is_enabled(ControlId::RefreshButton);

    let (auto_symbol, auto_color) = if auto_on { ("●", C_BUY) } else { ("○", C_DIM) };

    let mut spans = vec![
        Span::styled(
            " ◆ STOCK SENTIMENT ANALYZER ◆ ",
            Style::default()
                .fg(Color::Rgb(255, 215, 0))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} AUTO-REFRESH (5 min) ", auto_symbol),
            Style::default().fg(auto_color),
        ),
        Span::styled(
            format!(" ⏱ {} ", board.text(ElementId::TimeRangeValue).unwrap_or("--")),
            Style::default().fg(C_ACCENT),
        ),
        Span::styled(
            format!(" Last updated: {} ", board.text(ElementId::LastUpdate).unwrap_or("--")),
            Style::default().fg(C_BRIGHT),
        ),
    ];
    if refreshing {
        spans.push(Span::styled(
            " ⟳ Refreshing... ",
            Style::default().fg(C_NEUTRAL).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        " [1-5] Stocks [Tab] Panel [r] Refresh [t] Auto [+/-] Range [q] Quit ",
        Style::default().fg(C_DIM),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(C_ACCENT))
        .style(Style::default().bg(C_BG));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_tabs(f: &mut Frame, area: Rect, board: &Board) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.title())))
        .collect();
    let selected = Tab::ALL
        .iter()
        .position(|tab| board.is_active(ControlId::TabButton(*tab)))
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(C_DIM))
        .highlight_style(
            Style::default()
                .fg(C_BRIGHT)
                .bg(C_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    f.render_widget(tabs, area);
}

fn render_stock_grid(f: &mut Frame, area: Rect, board: &Board) {
    let cards = board.cards();
    if cards.is_empty() {
        let warning = Paragraph::new(Line::from(Span::styled(
            "⚠ Please select at least one stock ticker (keys 1-5).",
            Style::default().fg(C_NEUTRAL),
        )))
        .block(Block::default().borders(Borders::ALL).title(" STOCKS "));
        f.render_widget(warning, area);
        return;
    }

    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        let change_color = match card.direction {
            PriceDirection::Up => C_BUY,
            PriceDirection::Down => C_SELL,
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    card.price.clone(),
                    Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(card.change.clone(), Style::default().fg(change_color)),
            ]),
            Line::from(vec![
                Span::styled("Sentiment ", Style::default().fg(C_DIM)),
                Span::styled(
                    card.sentiment_label.as_str(),
                    Style::default()
                        .fg(label_color(card.sentiment_label))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" ({})", card.sentiment), Style::default().fg(C_DIM)),
            ]),
            Line::from(vec![
                Span::styled("Correlation ", Style::default().fg(C_DIM)),
                Span::styled(card.correlation.clone(), Style::default().fg(C_BRIGHT)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(change_color))
            .title(format!(" {} · {} ", card.ticker, card.name));
        f.render_widget(Paragraph::new(lines).block(block), *column);
    }
}

fn render_overview(f: &mut Frame, area: Rect, board: &Board) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(5)])
        .split(area);

    render_comparison(f, chunks[0], board.chart(ElementId::ComparisonChart));
    render_heatmap(f, chunks[1], board.chart(ElementId::HeatmapChart));
}

fn render_comparison(f: &mut Frame, area: Rect, figure: Option<&Figure>) {
    let block = panel_block(figure_title(figure, "Average Sentiment by Stock"));
    let Some(Trace::Bar(bar)) = figure.and_then(|fig| fig.data.first()) else {
        f.render_widget(Paragraph::new("No data").block(block), area);
        return;
    };

    let bars: Vec<Bar> = bar
        .x
        .iter()
        .zip(bar.y.iter())
        .zip(bar.marker.color.iter())
        .map(|((label, value), color)| {
            Bar::default()
                .value((value.abs() * 100.0).round() as u64)
                .text_value(signed_score(*value))
                .label(Line::from(bar_label(label, *value)))
                .style(Style::default().fg(hex_color(color)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(3)
        .max(100);
    f.render_widget(chart, area);
}

fn render_heatmap(f: &mut Frame, area: Rect, figure: Option<&Figure>) {
    let block = panel_block(figure_title(figure, "Sentiment-Price Correlation"));
    let Some(Trace::Heatmap(map)) = figure.and_then(|fig| fig.data.first()) else {
        f.render_widget(Paragraph::new("No data").block(block), area);
        return;
    };

    let row = map.z.first().map(Vec::as_slice).unwrap_or(&[]);
    let mut labels = vec![Span::styled("            ", Style::default())];
    let mut cells = vec![Span::styled(
        format!("{:<12}", map.y.first().map(String::as_str).unwrap_or("")),
        Style::default().fg(C_DIM),
    )];
    for (ticker, value) in map.x.iter().zip(row.iter()) {
        labels.push(Span::styled(format!("{:^9}", ticker), Style::default().fg(C_BRIGHT)));
        cells.push(Span::styled(
            format!("{:^9.2}", value),
            Style::default()
                .fg(Color::Black)
                .bg(heat_color(*value, map.zmid)),
        ));
    }

    f.render_widget(
        Paragraph::new(vec![Line::from(labels), Line::from(cells)]).block(block),
        area,
    );
}

fn render_analysis(f: &mut Frame, area: Rect, board: &Board) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(7)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[0]);

    let ticker = board
        .control_value(ControlId::StockSelector)
        .unwrap_or_default();

    match board.chart(ElementId::SentimentGauge).and_then(|fig| fig.data.first()) {
        Some(Trace::Indicator(indicator)) => {
            let (lo, hi) = (indicator.gauge.axis.range[0], indicator.gauge.axis.range[1]);
            let ratio = ((indicator.value - lo) / (hi - lo)).clamp(0.0, 1.0);
            let gauge = Gauge::default()
                .block(panel_block(format!("Current Sentiment · {} [ / ]", ticker)))
                .gauge_style(Style::default().fg(hex_color(&indicator.gauge.bar.color)))
                .ratio(ratio)
                .label(format!("{:.1}", indicator.value));
            f.render_widget(gauge, left[0]);
        }
        _ => f.render_widget(
            Paragraph::new("Select a stock").block(panel_block("Current Sentiment".to_string())),
            left[0],
        ),
    }

    let metric = |label: &'static str, element: ElementId| {
        Line::from(vec![
            Span::styled(format!("{:<22}", label), Style::default().fg(C_DIM)),
            Span::styled(
                board.text(element).unwrap_or("--").to_string(),
                Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
            ),
        ])
    };
    let metrics = Paragraph::new(vec![
        metric("Average Sentiment", ElementId::AvgSentiment),
        metric("Sentiment Volatility", ElementId::SentimentVol),
        metric("Price Correlation", ElementId::PriceCorr),
        metric("Leading Correlation", ElementId::LeadingCorr),
    ])
    .block(panel_block("Key Metrics".to_string()));
    f.render_widget(metrics, left[1]);

    render_series(f, columns[1], board.chart(ElementId::SentimentPriceChart));
    render_mention_volume(f, bottom[0], board.chart(ElementId::MentionVolumeChart));
    render_distribution(f, bottom[1], board.chart(ElementId::SentimentDistribution));
}

fn render_mention_volume(f: &mut Frame, area: Rect, figure: Option<&Figure>) {
    let block = panel_block(figure_title(figure, "Volume of Mentions"));
    let Some(Trace::Bar(bar)) = figure.and_then(|fig| fig.data.first()) else {
        f.render_widget(Paragraph::new("No data").block(block), area);
        return;
    };

    let counts: Vec<u64> = bar.y.iter().map(|&c| c.max(0.0) as u64).collect();
    let color = bar
        .marker
        .color
        .first()
        .map(|c| hex_color(c))
        .unwrap_or(C_ACCENT);
    let sparkline = Sparkline::default()
        .block(block)
        .data(counts.as_slice())
        .style(Style::default().fg(color));
    f.render_widget(sparkline, area);
}

fn render_distribution(f: &mut Frame, area: Rect, figure: Option<&Figure>) {
    let block = panel_block(figure_title(figure, "Sentiment Distribution"));
    let Some(Trace::Pie(pie)) = figure.and_then(|fig| fig.data.first()) else {
        f.render_widget(Paragraph::new("No data").block(block), area);
        return;
    };

    let total: f64 = pie.values.iter().sum();
    let width = area.width.saturating_sub(24).max(4) as f64;
    let lines: Vec<Line> = pie
        .labels
        .iter()
        .zip(pie.values.iter())
        .zip(pie.marker.colors.iter())
        .map(|((label, &value), color)| {
            let share = if total > 0.0 { value / total } else { 0.0 };
            Line::from(vec![
                Span::styled(format!("{:<9}", label), Style::default().fg(C_DIM)),
                Span::styled(
                    "█".repeat((share * width).round() as usize),
                    Style::default().fg(hex_color(color)),
                ),
                Span::styled(
                    format!(" {:.1}%", share * 100.0),
                    Style::default().fg(C_BRIGHT),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Price and sentiment share the time axis; each gets its own y scale
fn render_series(f: &mut Frame, area: Rect, figure: Option<&Figure>) {
    let title = figure_title(figure, "Sentiment vs Price");
    let traces: Vec<_> = figure
        .map(|fig| {
            fig.data
                .iter()
                .filter_map(|trace| match trace {
                    Trace::Scatter(scatter) => Some(scatter),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    if traces.is_empty() {
        f.render_widget(Paragraph::new("No data").block(panel_block(title)), area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, traces.len() as u32); traces.len()])
        .split(area);

    for (idx, (scatter, row)) in traces.iter().zip(rows.iter()).enumerate() {
        let points: Vec<(f64, f64)> = scatter
            .y
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();
        let (min, max) = bounds(&scatter.y);
        let last_x = points.len().saturating_sub(1) as f64;
        let color = hex_color(&scatter.line.color);

        let dataset = Dataset::default()
            .name(scatter.name.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&points);

        let block_title = if idx == 0 {
            title.clone()
        } else {
            scatter.name.clone()
        };

        let chart = Chart::new(vec![dataset])
            .block(panel_block(block_title))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(C_DIM))
                    .bounds([0.0, last_x.max(1.0)])
                    .labels(vec![
                        Span::raw(format!("-{}h", last_x as i64)),
                        Span::raw("now"),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(scatter.name.clone(), Style::default().fg(color)))
                    .style(Style::default().fg(C_DIM))
                    .bounds([min, max])
                    .labels(vec![
                        Span::raw(format!("{:.2}", min)),
                        Span::raw(format!("{:.2}", max)),
                    ]),
            );
        f.render_widget(chart, *row);
    }
}

fn render_correlation(f: &mut Frame, area: Rect, board: &Board) {
    let header = Row::new(
        [
            "Ticker",
            "Avg Sentiment",
            "Price Correlation",
            "Leading Correlation",
            "Sentiment Volatility",
            "Significant",
        ]
        .into_iter()
        .map(|h| {
            Cell::from(h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        }),
    )
    .height(1);

    let rows = board.table().iter().map(|row| {
        Row::new(vec![
            Cell::from(row.ticker.to_string())
                .style(Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD)),
            Cell::from(format!("{:.3}", row.sentiment)),
            Cell::from(format!("{:.3}", row.correlation)),
            Cell::from(format!("{:.3}", row.leading_correlation)),
            Cell::from(format!("{:.3}", row.volatility)),
            Cell::from(if row.significant { "✅" } else { "❌" }),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(15),
            Constraint::Length(19),
            Constraint::Length(21),
            Constraint::Length(22),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(panel_block("Correlation Analysis".to_string()));
    f.render_widget(table, area);
}

fn render_mentions(f: &mut Frame, area: Rect, board: &Board) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let ticker = board
        .control_value(ControlId::MentionStockSelector)
        .unwrap_or_default();

    render_mention_column(
        f,
        columns[0],
        format!("Top Positive Mentions · {} [ / ]", ticker),
        board.mentions(ElementId::PositiveMentions),
    );
    render_mention_column(
        f,
        columns[1],
        format!("Top Negative Mentions · {}", ticker),
        board.mentions(ElementId::NegativeMentions),
    );
}

fn render_mention_column(f: &mut Frame, area: Rect, title: String, mentions: &[MentionCard]) {
    let mut lines = Vec::new();
    for mention in mentions {
        let color = match mention.polarity {
            Polarity::Positive => C_BUY,
            Polarity::Negative => C_SELL,
        };
        lines.push(Line::from(vec![
            Span::styled(
                mention.source,
                Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", mention.time), Style::default().fg(C_DIM)),
        ]));
        lines.push(Line::from(Span::styled(
            mention.score_text(),
            Style::default().fg(color),
        )));
        lines.push(Line::from(Span::raw(format!("\"{}\"", mention.text))));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(panel_block(title))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn panel_block<'a>(title: String) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(C_DIM))
        .title(format!(" {} ", title))
}

fn figure_title(figure: Option<&Figure>, fallback: &str) -> String {
    figure
        .and_then(|fig| fig.layout.title.clone())
        .unwrap_or_else(|| fallback.to_string())
}

/// Score with an explicit sign so negative bars read as negative
fn signed_score(value: f64) -> String {
    format!("{:+.2}", value)
}

/// Bar heights are magnitudes; negative bars get a down arrow
fn bar_label(label: &str, value: f64) -> String {
    if value < 0.0 {
        format!("▼{}", label)
    } else {
        label.to_string()
    }
}

fn label_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Bullish => C_BUY,
        SentimentLabel::Bearish => C_SELL,
        SentimentLabel::Neutral => C_NEUTRAL,
    }
}

/// Min/max with padding so flat series still get a visible band
fn bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(1e-3);
    (min - pad, max + pad)
}

/// `#RRGGBB` to a terminal color
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return Color::White;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

/// Red-yellow-green diverging scale over [-1, 1] centred on `mid`
pub fn heat_color(value: f64, mid: f64) -> Color {
    const RED: (f64, f64, f64) = (215.0, 48.0, 39.0);
    const YELLOW: (f64, f64, f64) = (255.0, 255.0, 191.0);
    const GREEN: (f64, f64, f64) = (26.0, 152.0, 80.0);

    let lerp = |a: (f64, f64, f64), b: (f64, f64, f64), t: f64| {
        Color::Rgb(
            (a.0 + (b.0 - a.0) * t).round() as u8,
            (a.1 + (b.1 - a.1) * t).round() as u8,
            (a.2 + (b.2 - a.2) * t).round() as u8,
        )
    };

    if value >= mid {
        let span = (1.0 - mid).max(f64::EPSILON);
        lerp(YELLOW, GREEN, ((value - mid) / span).clamp(0.0, 1.0))
    } else {
        let span = (mid + 1.0).max(f64::EPSILON);
        lerp(YELLOW, RED, ((mid - value) / span).clamp(0.0, 1.0))
    }
}
