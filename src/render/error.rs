use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to format chart markup")]
    Format(#[from] std::fmt::Error),

    #[error("Failed to write chart to '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}
