//! Defines the raw dataset as served by the temperature endpoint, and the
//! boundary that turns loosely-typed JSON into it.
//!
//! The endpoint wraps the dataset in an envelope (`{"data": {...}}`). Parsing
//! goes through [`RawDataset::from_envelope`] or [`RawDataset::from_value`],
//! which report absent fields as [`DatasetError::MissingField`] instead of
//! letting them surface later as undefined values.

use crate::transform::error::DatasetError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ENVELOPE_KEY: &str = "data";
const BASE_TEMPERATURE_KEY: &str = "baseTemperature";
const MONTHLY_VARIANCE_KEY: &str = "monthlyVariance";

/// A single observed month: the deviation of that month from the base temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawVarianceRecord {
    /// Calendar year of the observation.
    pub year: i32,
    /// Calendar month, 1-based (1 = January).
    pub month: u32,
    /// Signed deviation from the base temperature, in °C.
    pub variance: f64,
}

/// The dataset exactly as fetched: a base temperature and the ordered list
/// of monthly variances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataset {
    /// Reference average temperature in °C.
    pub base_temperature: f64,
    /// Monthly anomalies, in the order served.
    pub monthly_variance: Vec<RawVarianceRecord>,
}

impl RawDataset {
    /// Parses a dataset from the endpoint's response body.
    ///
    /// The body is expected to carry the dataset under a `data` key. A body
    /// that already looks like a dataset (it has a `baseTemperature` key) is
    /// accepted as-is, which is the shape of the public reference file.
    ///
    /// # Errors
    ///
    /// * [`DatasetError::MissingField`] with `"data"` if neither shape matches,
    ///   or if `data` is `null`.
    /// * Any error from [`RawDataset::from_value`] for the inner dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use temperature_heatmap::RawDataset;
    ///
    /// let body = json!({
    ///     "data": {
    ///         "baseTemperature": 8.66,
    ///         "monthlyVariance": [{ "year": 1753, "month": 1, "variance": -1.366 }]
    ///     }
    /// });
    /// let raw = RawDataset::from_envelope(body).unwrap();
    /// assert_eq!(raw.monthly_variance.len(), 1);
    /// ```
    pub fn from_envelope(mut body: Value) -> Result<Self, DatasetError> {
        if let Some(inner) = body.get_mut(ENVELOPE_KEY).filter(|inner| !inner.is_null()) {
            return Self::from_value(inner.take());
        }
        if body.get(BASE_TEMPERATURE_KEY).is_some() {
            return Self::from_value(body);
        }
        Err(DatasetError::MissingField(ENVELOPE_KEY))
    }

    /// Parses a dataset object (`{ baseTemperature, monthlyVariance }`).
    ///
    /// Fields are checked for presence before deserializing, so an empty
    /// object reports the first missing field by name.
    pub fn from_value(value: Value) -> Result<Self, DatasetError> {
        let object = value.as_object().ok_or(DatasetError::NotAnObject)?;
        for key in [BASE_TEMPERATURE_KEY, MONTHLY_VARIANCE_KEY] {
            if object.get(key).map_or(true, Value::is_null) {
                return Err(DatasetError::MissingField(key));
            }
        }
        serde_json::from_value(value).map_err(DatasetError::Parse)
    }

    pub fn len(&self) -> usize {
        self.monthly_variance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_variance.is_empty()
    }
}
