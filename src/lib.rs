mod color;
mod config;
mod error;
mod fetch;
mod heatmap;
mod render;
mod transform;
mod types;

#[cfg(test)]
mod test_support;

pub use error::HeatmapError;
pub use heatmap::*;

pub use color::{ColorBucket, ColorScale, ColorScaleSpec, ColorToken, DEFAULT_COLORS, DEFAULT_THRESHOLDS};
pub use config::{ChartConfig, ConfigError, DEFAULT_ENDPOINT, DEFAULT_TOOLTIP_TEMPLATE};

pub use fetch::error::FetchError;
pub use fetch::fetcher::DatasetFetcher;

pub use transform::error::DatasetError;
pub use transform::months::{month_name, MONTH_NAMES};
pub use transform::rounding::round2;
pub use transform::transform;

pub use render::error::RenderError;
pub use render::scale::{BandScale, TimeScale};
pub use render::Renderer;

pub use types::dataset::{RawDataset, RawVarianceRecord};
pub use types::display::{DisplayRecord, HeatmapData};
