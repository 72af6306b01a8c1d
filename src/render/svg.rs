//! SVG fragments of the heatmap: cells, axes and legend.

use crate::color::ColorScale;
use crate::config::{ChartConfig, RIGHT_MARGIN, TOP_MARGIN};
use crate::render::scale::{BandScale, TimeScale};
use crate::types::display::{DisplayRecord, HeatmapData};
use log::warn;
use std::fmt::{self, Write};

/// Height of the strip below the chart that holds the legend.
pub const LEGEND_HEIGHT: u32 = 50;
const LEGEND_SWATCH_WIDTH: f64 = 30.0;
const LEGEND_SWATCH_HEIGHT: f64 = 15.0;
const TICK_SIZE: f64 = 6.0;

/// Pixel geometry derived from a [`ChartConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Layout {
    pub fn new(config: &ChartConfig) -> Self {
        let width = f64::from(config.width);
        let height = f64::from(config.height);
        let padding = f64::from(config.padding);
        Self {
            width,
            height,
            padding,
            x_range: (padding, width - f64::from(RIGHT_MARGIN)),
            y_range: (f64::from(TOP_MARGIN), height - padding),
        }
    }

    pub fn canvas_height(&self) -> f64 {
        self.height + f64::from(LEGEND_HEIGHT)
    }
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Fills the `{year}`, `{month}`, `{temperature}` and `{variance}`
/// placeholders of a tooltip template.
pub fn tooltip_text(template: &str, record: &DisplayRecord) -> String {
    template
        .replace("{year}", &record.year.to_string())
        .replace("{month}", record.month)
        .replace("{temperature}", &record.temperature.to_string())
        .replace("{variance}", &record.variance.to_string())
}

pub fn write_cells(
    out: &mut String,
    data: &HeatmapData,
    x: &TimeScale,
    y: &BandScale<'_>,
    colors: &ColorScale,
    tooltip_template: &str,
) -> fmt::Result {
    let height = y.bandwidth();
    writeln!(out, r#"<g id="cells" shape-rendering="crispEdges">"#)?;
    for record in &data.monthly_variance {
        let (Some(cx), Some(width), Some(cy), Some(month_index)) = (
            x.x(record.year),
            x.year_width(record.year),
            y.position(record.month),
            data.month_index(record.month),
        ) else {
            warn!(
                "Skipping cell {} {} that falls outside the chart scales",
                record.year, record.month
            );
            continue;
        };
        let tooltip = escape(&tooltip_text(tooltip_template, record));
        writeln!(
            out,
            r#"<rect class="cell" x="{cx:.2}" y="{cy:.2}" width="{width:.2}" height="{height:.2}" fill="{fill}" data-month="{month_index}" data-year="{year}" data-temp="{temp}" data-variance="{variance}" data-tooltip="{tooltip}"><title>{tooltip}</title></rect>"#,
            fill = escape(colors.color_for(record.temperature).as_str()),
            year = record.year,
            temp = record.temperature,
            variance = record.variance,
        )?;
    }
    writeln!(out, "</g>")
}

/// Bottom axis. Without a scale (empty dataset) only the axis line is drawn.
pub fn write_x_axis(
    out: &mut String,
    layout: &Layout,
    x: Option<&TimeScale>,
    max_ticks: usize,
) -> fmt::Result {
    let (x0, x1) = layout.x_range;
    writeln!(
        out,
        r#"<g id="x-axis" transform="translate(0,{:.2})">"#,
        layout.y_range.1
    )?;
    writeln!(
        out,
        r#"<line x1="{x0:.2}" x2="{x1:.2}" y1="0" y2="0" stroke="currentColor"/>"#
    )?;
    if let Some(scale) = x {
        for year in scale.ticks(max_ticks) {
            let Some(tx) = scale.x(year) else { continue };
            writeln!(
                out,
                r#"<g class="tick" transform="translate({tx:.2},0)"><line y2="{TICK_SIZE}" stroke="currentColor"/><text y="{ty}" text-anchor="middle">{year}</text></g>"#,
                ty = TICK_SIZE + 14.0,
            )?;
        }
    }
    writeln!(
        out,
        r#"<text class="axis-label" x="{:.2}" y="{:.2}" text-anchor="middle">Years</text>"#,
        (x0 + x1) / 2.0,
        layout.padding * 0.7,
    )?;
    writeln!(out, "</g>")
}

pub fn write_y_axis(out: &mut String, layout: &Layout, y: &BandScale<'_>) -> fmt::Result {
    let (y0, y1) = layout.y_range;
    writeln!(
        out,
        r#"<g id="y-axis" transform="translate({:.2},0)">"#,
        layout.padding
    )?;
    writeln!(
        out,
        r#"<line x1="0" x2="0" y1="{y0:.2}" y2="{y1:.2}" stroke="currentColor"/>"#
    )?;
    let half_band = y.bandwidth() / 2.0;
    for month in y.domain() {
        let Some(position) = y.position(month) else { continue };
        writeln!(
            out,
            r#"<g class="tick" transform="translate(0,{:.2})"><line x2="-{TICK_SIZE}" stroke="currentColor"/><text x="-{tx}" dy="0.32em" text-anchor="end">{}</text></g>"#,
            position + half_band,
            escape(month),
            tx = TICK_SIZE + 3.0,
        )?;
    }
    writeln!(out, "</g>")?;
    writeln!(
        out,
        r#"<text class="axis-label" transform="rotate(-90)" x="{:.2}" y="15" text-anchor="middle">Months</text>"#,
        -(y0 + y1) / 2.0
    )
}

/// One swatch per bucket, coldest on the left, each boundary labelled
/// with the threshold it starts at.
pub fn write_legend(out: &mut String, layout: &Layout, colors: &ColorScale) -> fmt::Result {
    writeln!(
        out,
        r#"<g id="legend" transform="translate({:.2},{:.2})">"#,
        layout.padding,
        layout.height + 10.0
    )?;
    for (i, bucket) in colors.buckets().iter().rev().enumerate() {
        let x = i as f64 * LEGEND_SWATCH_WIDTH;
        writeln!(
            out,
            r#"<rect x="{x:.2}" y="0" width="{LEGEND_SWATCH_WIDTH}" height="{LEGEND_SWATCH_HEIGHT}" fill="{}" stroke="currentColor"/>"#,
            escape(bucket.color.as_str())
        )?;
        if let Some(lower) = bucket.lower {
            writeln!(
                out,
                r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle">{lower}</text>"#,
                LEGEND_SWATCH_HEIGHT + 14.0
            )?;
        }
    }
    writeln!(out, "</g>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorToken;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("January"), "January");
    }

    #[test]
    fn test_tooltip_text() {
        let record = DisplayRecord {
            year: 2000,
            month: "January",
            variance: -0.1,
            temperature: 8.56,
        };
        assert_eq!(
            tooltip_text("{year} - {month}\n{temperature}°C\n{variance}°C", &record),
            "2000 - January\n8.56°C\n-0.1°C"
        );
        assert_eq!(tooltip_text("static", &record), "static");
    }

    #[test]
    fn test_layout_from_config() {
        let layout = Layout::new(&ChartConfig::default());
        assert_eq!(layout.x_range, (60.0, 985.0));
        assert_eq!(layout.y_range, (10.0, 440.0));
        assert_eq!(layout.canvas_height(), 550.0);
    }

    #[test]
    fn test_legend_has_one_swatch_per_bucket() {
        let mut out = String::new();
        let layout = Layout::new(&ChartConfig::default());
        write_legend(&mut out, &layout, &ColorScale::default()).unwrap();

        assert_eq!(out.matches("<rect").count(), 11);
        assert_eq!(out.matches("<text").count(), 10);
        // coldest first
        let cold = out.find("#313695").unwrap();
        let warm = out.find("#a50026").unwrap();
        assert!(cold < warm);
        assert!(out.contains(">2.8</text>"));
        assert!(out.contains(">12.8</text>"));
    }

    #[test]
    fn test_legend_labels_keep_threshold_precision() {
        let mut out = String::new();
        let layout = Layout::new(&ChartConfig::default());
        let colors = ColorScale::new(
            vec![10.25, 2.85],
            ["#d73027", "#ffffbf", "#4575b4"]
                .into_iter()
                .map(ColorToken::new)
                .collect(),
        )
        .unwrap();
        write_legend(&mut out, &layout, &colors).unwrap();

        assert!(out.contains(">2.85</text>"), "legend: {out}");
        assert!(out.contains(">10.25</text>"), "legend: {out}");
    }
}
