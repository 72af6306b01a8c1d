use crate::config::ConfigError;
use crate::fetch::error::FetchError;
use crate::render::error::RenderError;
use crate::transform::error::DatasetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to serialize heatmap data")]
    Serialize(#[source] serde_json::Error),
}
