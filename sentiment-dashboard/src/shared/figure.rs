//! Declarative chart descriptors handed to the charting sink
//!
//! The shapes serialize to the plotly-style `{ data, layout }` JSON so any
//! renderer that understands that format can draw them; the terminal widget
//! reads the same structs directly.

use serde::Serialize;

pub const PAPER_BG: &str = "#1A1A1A";
pub const PLOT_BG: &str = "#0A0A0A";
pub const GRID_COLOR: &str = "#333333";
pub const FONT_COLOR: &str = "#FFFFFF";
pub const PRICE_LINE: &str = "#1976D2";
pub const VOLUME_BAR: &str = "#42A5F5";

/// A complete chart: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

impl Figure {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Heatmap(HeatmapTrace),
    Indicator(IndicatorTrace),
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapTrace {
    pub z: Vec<Vec<f64>>,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub colorscale: String,
    pub zmid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorTrace {
    pub mode: String,
    pub value: f64,
    pub gauge: GaugeSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeSpec {
    pub axis: AxisRange,
    pub bar: BarColor,
    pub steps: Vec<GaugeStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisRange {
    pub range: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarColor {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeStep {
    pub range: [f64; 2],
    pub color: String,
}

/// Donut when `hole` is non-zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub marker: PieMarker,
    pub hole: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieMarker {
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    /// RFC 3339 timestamps
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
    pub yaxis: String,
    pub line: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FigureLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub paper_bgcolor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<AxisLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl FigureLayout {
    /// Dark theme shared by every dashboard chart
    pub fn dark(title: Option<String>) -> Self {
        Self {
            title,
            paper_bgcolor: PAPER_BG.to_string(),
            plot_bgcolor: Some(PLOT_BG.to_string()),
            font: Font {
                color: FONT_COLOR.to_string(),
            },
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AxisLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub gridcolor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
}

impl AxisLayout {
    pub fn grid(title: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            gridcolor: GRID_COLOR.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_type_tag() {
        let figure = Figure {
            data: vec![Trace::Bar(BarTrace {
                x: vec!["AAPL".to_string()],
                y: vec![0.65],
                name: "Sentiment".to_string(),
                marker: Marker {
                    color: vec!["#00C853".to_string()],
                },
            })],
            layout: FigureLayout::dark(Some("Average Sentiment by Stock".to_string())),
        };

        let json: serde_json::Value = serde_json::from_str(&figure.to_json().unwrap()).unwrap();
        assert_eq!(json["data"][0]["type"], "bar");
        assert_eq!(json["data"][0]["marker"]["color"][0], "#00C853");
        assert_eq!(json["layout"]["paper_bgcolor"], PAPER_BG);
        assert!(json["layout"].get("yaxis2").is_none());
    }

    #[test]
    fn test_pie_serialises_colors_and_hole() {
        let trace = Trace::Pie(PieTrace {
            labels: vec!["Positive".to_string(), "Negative".to_string()],
            values: vec![3.0, 1.0],
            marker: PieMarker {
                colors: vec!["#00C853".to_string(), "#D32F2F".to_string()],
            },
            hole: 0.4,
        });

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "pie");
        assert_eq!(json["marker"]["colors"][1], "#D32F2F");
        assert_eq!(json["hole"], 0.4);
    }
}
