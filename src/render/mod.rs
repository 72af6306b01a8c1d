//! Renders [`HeatmapData`] as a self-contained HTML document.
//!
//! The document holds one `<article>` with the title, a description, a
//! tooltip overlay and the SVG chart. Hovering a cell shows its tooltip
//! text, which is precomputed per cell from the configured template and
//! stored in the cell's `data-tooltip` attribute (and in a `<title>` child,
//! so the chart still has tooltips with scripts disabled).

pub mod error;
pub mod scale;
pub mod svg;

use crate::config::ChartConfig;
use crate::types::display::HeatmapData;
use error::RenderError;
use log::debug;
use scale::{BandScale, TimeScale};
use std::fmt::Write;
use svg::{escape, write_cells, write_legend, write_x_axis, write_y_axis, Layout};

const STYLE: &str = r##"
article { position: relative; font-family: sans-serif; width: fit-content; margin: 0 auto; }
#title, #description { text-align: center; }
#tooltip {
  position: absolute; pointer-events: none; white-space: pre-line;
  padding: 6px 8px; border-radius: 4px; background: #333; color: #fff; font-size: 12px;
}
svg text { font-size: 10px; fill: currentColor; }
svg .axis-label { font-size: 12px; }
rect.cell:hover { stroke: #000; stroke-width: 1; }
"##;

const SCRIPT: &str = r##"
(() => {
  const article = document.querySelector('article');
  const tooltip = document.getElementById('tooltip');
  document.querySelectorAll('rect.cell').forEach((cell) => {
    cell.addEventListener('mouseover', () => {
      const box = cell.getBoundingClientRect();
      const origin = article.getBoundingClientRect();
      tooltip.textContent = cell.dataset.tooltip;
      tooltip.dataset.year = cell.dataset.year;
      tooltip.style.left = `${box.right - origin.left + 4}px`;
      tooltip.style.top = `${box.top - origin.top - 20}px`;
      tooltip.style.visibility = 'visible';
    });
    cell.addEventListener('mouseout', () => {
      tooltip.style.visibility = 'hidden';
    });
  });
})();
"##;

/// Draws heatmaps with a fixed [`ChartConfig`].
pub struct Renderer<'a> {
    config: &'a ChartConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a ChartConfig) -> Self {
        Self { config }
    }

    /// The full HTML page.
    pub fn render(&self, data: &HeatmapData) -> Result<String, RenderError> {
        let title = escape(&self.config.title);
        let mut out = String::new();
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, r#"<html lang="en">"#)?;
        writeln!(out, "<head>")?;
        writeln!(out, r#"<meta charset="utf-8">"#)?;
        writeln!(out, "<title>{title}</title>")?;
        writeln!(out, "<style>{STYLE}</style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<article>")?;
        writeln!(out, r#"<h1 id="title">{title}</h1>"#)?;
        writeln!(
            out,
            r#"<p id="description">{}</p>"#,
            escape(&describe(data))
        )?;
        writeln!(out, r#"<div id="tooltip" style="visibility: hidden"></div>"#)?;
        out.push_str(&self.render_svg(data)?);
        writeln!(out, "</article>")?;
        writeln!(out, "<script>{SCRIPT}</script>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(out)
    }

    /// Only the `<svg>` element: cells, axes and legend.
    pub fn render_svg(&self, data: &HeatmapData) -> Result<String, RenderError> {
        let layout = Layout::new(self.config);
        let y = BandScale::new(data.month_names, layout.y_range);
        let x = data
            .year_range()
            .and_then(|(min, max)| TimeScale::for_years(min, max, layout.x_range));

        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="chart" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = layout.width,
            h = layout.canvas_height(),
        )?;
        if let Some(x) = &x {
            write_cells(
                &mut out,
                data,
                x,
                &y,
                &self.config.color_scale,
                &self.config.tooltip_template,
            )?;
        }
        write_x_axis(&mut out, &layout, x.as_ref(), self.config.x_ticks)?;
        write_y_axis(&mut out, &layout, &y)?;
        write_legend(&mut out, &layout, &self.config.color_scale)?;
        writeln!(out, "</svg>")?;

        debug!(
            "Rendered {} cells into {} bytes of SVG",
            data.len(),
            out.len()
        );
        Ok(out)
    }
}

fn describe(data: &HeatmapData) -> String {
    match data.year_range() {
        Some((min, max)) => format!(
            "{min} - {max}: base temperature {}°C",
            data.base_temperature
        ),
        None => format!(
            "No monthly data: base temperature {}°C",
            data.base_temperature
        ),
    }
}
