//! Chart configuration: data endpoint, canvas dimensions, palette and
//! tooltip text.
//!
//! A [`ChartConfig`] can be built in code through [`ChartConfig::builder`] or
//! loaded from a YAML file. Every field has a default, so a config file only
//! needs to name what it changes:
//!
//! ```yaml
//! endpoint: https://example.org/global-temperature
//! width: 1200
//! color_scale:
//!   thresholds: [10.0, 5.0]
//!   colors: ["#d73027", "#ffffbf", "#4575b4"]
//! ```

use crate::color::ColorScale;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5555/api";
pub const DEFAULT_TOOLTIP_TEMPLATE: &str = "{year} - {month}\n{temperature}°C\n{variance}°C";
pub const DEFAULT_TITLE: &str = "Monthly Global Land-Surface Temperature";

/// Space between the right edge of the x-axis and the canvas edge, in px.
pub(crate) const RIGHT_MARGIN: u32 = 15;
/// Space above the first month band, in px.
pub(crate) const TOP_MARGIN: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] serde_yaml::Error),

    #[error("Invalid color scale: {0}")]
    InvalidColorScale(String),

    #[error("Invalid chart dimensions: {0}")]
    InvalidDimensions(String),
}

/// Everything that varies between heatmap renderings.
///
/// # Examples
///
/// ```
/// use temperature_heatmap::ChartConfig;
///
/// let config = ChartConfig::builder()
///     .endpoint("http://localhost:8080/api")
///     .width(860)
///     .build();
/// assert_eq!(config.width, 860);
/// assert_eq!(config.height, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct ChartConfig {
    /// URL serving `{"data": {baseTemperature, monthlyVariance}}`.
    #[builder(into, default = DEFAULT_ENDPOINT.to_string())]
    pub endpoint: String,
    /// Canvas width in px.
    #[builder(default = 1000)]
    pub width: u32,
    /// Canvas height in px, excluding the legend strip.
    #[builder(default = 500)]
    pub height: u32,
    /// Room left of and below the plot area for the axes, in px.
    #[builder(default = 60)]
    pub padding: u32,
    /// Upper bound on the number of year ticks on the x-axis.
    #[builder(default = 20)]
    pub x_ticks: usize,
    #[builder(into, default = DEFAULT_TITLE.to_string())]
    pub title: String,
    /// Tooltip text. `{year}`, `{month}`, `{temperature}` and `{variance}`
    /// are replaced per cell; newlines are kept.
    #[builder(into, default = DEFAULT_TOOLTIP_TEMPLATE.to_string())]
    pub tooltip_template: String,
    #[builder(default)]
    pub color_scale: ColorScale,
    /// Request timeout for the fetch. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ChartConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::parse(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Parse configuration from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Checks that the plot area left after padding and margins is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // widened so a huge padding cannot wrap around
        let padding = u64::from(self.padding);
        if u64::from(self.width) <= padding + u64::from(RIGHT_MARGIN) {
            return Err(ConfigError::InvalidDimensions(format!(
                "width {} leaves no room for padding {} and right margin {}",
                self.width, self.padding, RIGHT_MARGIN
            )));
        }
        if u64::from(self.height) <= padding + u64::from(TOP_MARGIN) {
            return Err(ConfigError::InvalidDimensions(format!(
                "height {} leaves no room for padding {} and top margin {}",
                self.height, self.padding, TOP_MARGIN
            )));
        }
        if self.x_ticks == 0 {
            return Err(ConfigError::InvalidDimensions(
                "x_ticks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
