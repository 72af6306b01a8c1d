//! This module provides the main entry point: a [`Heatmap`] client that runs
//! the fetch, transform and render pipeline once for a given [`ChartConfig`].

use crate::config::ChartConfig;
use crate::error::HeatmapError;
use crate::fetch::fetcher::DatasetFetcher;
use crate::render::error::RenderError;
use crate::render::Renderer;
use crate::transform::transform;
use crate::types::dataset::RawDataset;
use crate::types::display::HeatmapData;
use bon::bon;
use log::info;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// What [`Heatmap::generate`] writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// A complete HTML page with the chart, tooltips and legend.
    #[default]
    Html,
    /// Only the `<svg>` element.
    Svg,
    /// The transformed data as pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "svg" => Ok(Self::Svg),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Unknown output format '{other}'. Expected html, svg or json"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Html => "html",
            Self::Svg => "svg",
            Self::Json => "json",
        })
    }
}

/// A configured heatmap pipeline.
///
/// Create one with [`Heatmap::new`], then either call [`Heatmap::generate`]
/// to fetch, transform, render and write in one go, or use
/// [`Heatmap::load`] and [`Heatmap::render`] separately.
///
/// # Examples
///
/// ```no_run
/// # use temperature_heatmap::{ChartConfig, Heatmap, HeatmapError};
/// # use std::path::Path;
/// # #[tokio::main]
/// # async fn main() -> Result<(), HeatmapError> {
/// let heatmap = Heatmap::new(ChartConfig::default())?;
/// let data = heatmap
///     .generate()
///     .output(Path::new("heatmap.html"))
///     .call()
///     .await?;
/// println!("Rendered {} months", data.len());
/// # Ok(())
/// # }
/// ```
pub struct Heatmap {
    config: ChartConfig,
    fetcher: DatasetFetcher,
}

#[bon]
impl Heatmap {
    /// Creates a pipeline for `config`.
    ///
    /// # Errors
    ///
    /// * [`HeatmapError::Config`] if the config fails [`ChartConfig::validate`].
    /// * [`HeatmapError::Fetch`] if the HTTP client cannot be built.
    pub fn new(config: ChartConfig) -> Result<Self, HeatmapError> {
        config.validate()?;
        let fetcher = DatasetFetcher::new(
            &config.endpoint,
            config.timeout_secs.map(Duration::from_secs),
        )?;
        Ok(Self { config, fetcher })
    }

    /// Fetches the dataset from the configured endpoint and transforms it.
    ///
    /// Fetch failures are returned as [`HeatmapError::Fetch`]; nothing is
    /// substituted for a failed download. A body without the expected fields
    /// fails with [`HeatmapError::Dataset`].
    pub async fn load(&self) -> Result<HeatmapData, HeatmapError> {
        let body = self.fetcher.fetch().await?;
        Self::prepare(body)
    }

    /// Same as [`Heatmap::load`], reading the response body from a file.
    pub async fn load_file(&self, path: &Path) -> Result<HeatmapData, HeatmapError> {
        let body = DatasetFetcher::read_file(path).await?;
        Self::prepare(body)
    }

    fn prepare(body: Value) -> Result<HeatmapData, HeatmapError> {
        let raw = RawDataset::from_envelope(body)?;
        let data = transform(&raw)?;
        info!(
            "Prepared {} monthly records (base temperature {}°C)",
            data.len(),
            data.base_temperature
        );
        Ok(data)
    }

    pub fn render(&self, data: &HeatmapData, format: OutputFormat) -> Result<String, HeatmapError> {
        let renderer = Renderer::new(&self.config);
        Ok(match format {
            OutputFormat::Html => renderer.render(data)?,
            OutputFormat::Svg => renderer.render_svg(data)?,
            OutputFormat::Json => {
                serde_json::to_string_pretty(data).map_err(HeatmapError::Serialize)?
            }
        })
    }

    /// Runs the whole pipeline once and writes the result to `output`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.output(&Path)`: **Required.** File to write.
    /// * `.input(&Path)`: Optional. Read the dataset from this file instead of the endpoint.
    /// * `.format(OutputFormat)`: Optional. Defaults to [`OutputFormat::Html`].
    ///
    /// # Returns
    ///
    /// The transformed data that was rendered.
    #[builder]
    pub async fn generate(
        &self,
        output: &Path,
        input: Option<&Path>,
        format: Option<OutputFormat>,
    ) -> Result<HeatmapData, HeatmapError> {
        let format = format.unwrap_or_default();
        let data = match input {
            Some(path) => self.load_file(path).await?,
            None => self.load().await?,
        };

        let rendered = self.render(&data, format)?;
        tokio::fs::write(output, &rendered)
            .await
            .map_err(|e| RenderError::Write(output.to_path_buf(), e))?;
        info!(
            "Wrote {} chart ({} bytes) to {}",
            format,
            rendered.len(),
            output.display()
        );
        Ok(data)
    }
}
