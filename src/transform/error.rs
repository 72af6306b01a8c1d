use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset is not a JSON object")]
    NotAnObject,

    #[error("Dataset is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Failed to parse dataset")]
    Parse(#[source] serde_json::Error),

    #[error("Record {index} has month {month}, expected a value between 1 and 12")]
    InvalidMonth { index: usize, month: u32 },

    // `index` is None for dataset-level fields
    #[error("Field '{field}' is not a finite number (record {index:?})")]
    NonFinite {
        field: &'static str,
        index: Option<usize>,
    },

    #[error("Field '{field}' of record {index} is too large to round to two decimals")]
    OutOfRange { field: &'static str, index: usize },
}
