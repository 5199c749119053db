//! Sankey chart generation.
//!
//! Produces a self-contained HTML page driving ECharts. The page pulls the
//! ECharts bundle and theme from a CDN, the data is embedded as JSON.

use super::view::GraphView;
use crate::utils::config::{
    CHART_THEME, CHART_TITLE, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, ECHARTS_CDN_URL,
    ECHARTS_THEME_URL,
};
use crate::utils::error::RenderError;
use log::{info, warn};
use serde_json::json;

/// Chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub width: String,
    pub height: String,
    pub theme: String,
    pub series_name: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: CHART_TITLE.to_string(),
            width: DEFAULT_CHART_WIDTH.to_string(),
            height: DEFAULT_CHART_HEIGHT.to_string(),
            theme: CHART_THEME.to_string(),
            series_name: String::new(),
        }
    }
}

impl ChartOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the series after the billing period and threshold,
    /// e.g. "2024-01-01-2024-02-01 > $100"
    pub fn with_period(mut self, start_date: &str, end_date: &str, threshold: f64) -> Self {
        self.series_name = format!("{}-{} > ${:.0}", start_date, end_date, threshold);
        self
    }

    pub fn with_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Turns a graph view into a renderable document
pub trait GraphRenderer {
    fn render(&self, view: &GraphView, options: &ChartOptions) -> Result<String, RenderError>;
}

/// ECharts Sankey page renderer
#[derive(Debug, Clone, Default)]
pub struct SankeyHtmlRenderer;

impl SankeyHtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl GraphRenderer for SankeyHtmlRenderer {
    fn render(&self, view: &GraphView, options: &ChartOptions) -> Result<String, RenderError> {
        generate_sankey_html(view, options)
    }
}

/// Generate the HTML page for a graph view
pub fn generate_sankey_html(view: &GraphView, options: &ChartOptions) -> Result<String, RenderError> {
    if view.is_empty() {
        warn!("No edges at or above the threshold, rendering an empty chart");
    }

    info!(
        "Generating Sankey chart with {} nodes and {} links",
        view.nodes.len(),
        view.links.len()
    );

    let option = json!({
        "title": { "text": options.title },
        "tooltip": { "show": true },
        "series": [{
            "name": options.series_name,
            "type": "sankey",
            "data": view.nodes,
            "links": view.links,
            "label": {
                "show": true,
                "fontSize": 12,
                "formatter": "{c} {b}",
            },
        }],
    });

    // JSON only contains '<' inside strings, escaping keeps labels from
    // closing the script element
    let option_json = serde_json::to_string(&option)?.replace('<', "\\u003c");

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <meta charset=\"utf-8\">\n");
    html.push_str(&format!("    <title>{}</title>\n", escape_html(&options.title)));
    html.push_str(&format!("    <script src=\"{}\"></script>\n", ECHARTS_CDN_URL));
    if options.theme == CHART_THEME {
        html.push_str(&format!("    <script src=\"{}\"></script>\n", ECHARTS_THEME_URL));
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<div class=\"container\">\n    <div class=\"item\" id=\"sankey\" style=\"width:{};height:{};\"></div>\n</div>\n",
        escape_html(&options.width),
        escape_html(&options.height)
    ));
    html.push_str("<script type=\"text/javascript\">\n    \"use strict\";\n");
    html.push_str(&format!(
        "    let chart = echarts.init(document.getElementById('sankey'), {}, {{ renderer: \"canvas\" }});\n",
        serde_json::to_string(&options.theme)?.replace('<', "\\u003c")
    ));
    html.push_str(&format!("    let option = {};\n", option_json));
    html.push_str("    chart.setOption(option);\n</script>\n</body>\n</html>\n");

    info!("Sankey chart generated successfully ({} bytes)", html.len());
    Ok(html)
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
