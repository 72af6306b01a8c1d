//! Maps temperatures to heatmap colors.
//!
//! A [`ColorScale`] is an ordered table of `(threshold, color)` steps plus a
//! default color. Thresholds are inclusive lower bounds and strictly
//! descending, so lookup walks the table top-down and the first threshold at
//! or below the temperature wins. Anything below every threshold (or NaN)
//! falls into the default, coldest bucket.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bounds of the default buckets, warmest first, in °C.
pub const DEFAULT_THRESHOLDS: [f64; 10] = [12.8, 11.7, 10.6, 9.5, 8.3, 7.2, 6.1, 5.0, 3.9, 2.8];

/// Colors of the default buckets, warmest first. The last entry is the default bucket.
pub const DEFAULT_COLORS: [&str; 11] = [
    "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8", "#abd9e9",
    "#74add1", "#4575b4", "#313695",
];

/// An opaque color identifier, used verbatim as an SVG `fill`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One bucket of a [`ColorScale`], as shown in the legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBucket<'a> {
    pub color: &'a ColorToken,
    /// Inclusive lower bound, `None` for the default bucket.
    pub lower: Option<f64>,
    /// Exclusive upper bound, `None` for the warmest bucket.
    pub upper: Option<f64>,
}

/// The serialized form of a [`ColorScale`]: `colors` has exactly one more
/// entry than `thresholds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScaleSpec {
    pub thresholds: Vec<f64>,
    pub colors: Vec<ColorToken>,
}

/// Step function from temperature to color.
///
/// # Examples
///
/// ```
/// use temperature_heatmap::ColorScale;
///
/// let scale = ColorScale::default();
/// assert_eq!(scale.color_for(12.8), scale.color_for(99.0));
/// assert_eq!(scale.bucket_index(2.8), 9);
/// assert_eq!(scale.bucket_index(2.79), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorScaleSpec", into = "ColorScaleSpec")]
pub struct ColorScale {
    steps: Vec<(f64, ColorToken)>,
    default: ColorToken,
}

impl ColorScale {
    /// Builds a scale from descending thresholds and one color per bucket.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidColorScale`] if `colors.len() != thresholds.len() + 1`,
    /// if a threshold is not finite, or if thresholds are not strictly descending.
    pub fn new(thresholds: Vec<f64>, colors: Vec<ColorToken>) -> Result<Self, ConfigError> {
        if colors.len() != thresholds.len() + 1 {
            return Err(ConfigError::InvalidColorScale(format!(
                "expected {} colors for {} thresholds, found {}",
                thresholds.len() + 1,
                thresholds.len(),
                colors.len()
            )));
        }
        if let Some(bad) = thresholds.iter().find(|t| !t.is_finite()) {
            return Err(ConfigError::InvalidColorScale(format!(
                "threshold {bad} is not finite"
            )));
        }
        if let Some(pair) = thresholds.windows(2).find(|pair| pair[0] <= pair[1]) {
            return Err(ConfigError::InvalidColorScale(format!(
                "thresholds must be strictly descending, found {} before {}",
                pair[0], pair[1]
            )));
        }

        let mut colors = colors.into_iter();
        let steps = thresholds.into_iter().zip(colors.by_ref()).collect();
        let default = colors
            .next()
            .ok_or_else(|| ConfigError::InvalidColorScale("missing default color".into()))?;
        Ok(Self { steps, default })
    }

    /// The color for `temperature`.
    pub fn color_for(&self, temperature: f64) -> &ColorToken {
        self.steps
            .iter()
            .find(|(threshold, _)| temperature >= *threshold)
            .map_or(&self.default, |(_, color)| color)
    }

    /// Bucket rank of `temperature`: `0` is the warmest bucket,
    /// [`ColorScale::bucket_count`]` - 1` the default one.
    pub fn bucket_index(&self, temperature: f64) -> usize {
        self.steps
            .iter()
            .position(|(threshold, _)| temperature >= *threshold)
            .unwrap_or(self.steps.len())
    }

    pub fn bucket_count(&self) -> usize {
        self.steps.len() + 1
    }

    /// All buckets, warmest first.
    pub fn buckets(&self) -> Vec<ColorBucket<'_>> {
        let mut upper = None;
        let mut buckets: Vec<ColorBucket<'_>> = self
            .steps
            .iter()
            .map(|(threshold, color)| {
                let bucket = ColorBucket {
                    color,
                    lower: Some(*threshold),
                    upper,
                };
                upper = Some(*threshold);
                bucket
            })
            .collect();
        buckets.push(ColorBucket {
            color: &self.default,
            lower: None,
            upper,
        });
        buckets
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            steps: DEFAULT_THRESHOLDS
                .iter()
                .zip(DEFAULT_COLORS)
                .map(|(threshold, color)| (*threshold, ColorToken::new(color)))
                .collect(),
            default: ColorToken::new(DEFAULT_COLORS[DEFAULT_COLORS.len() - 1]),
        }
    }
}

impl TryFrom<ColorScaleSpec> for ColorScale {
    type Error = ConfigError;

    fn try_from(spec: ColorScaleSpec) -> Result<Self, Self::Error> {
        Self::new(spec.thresholds, spec.colors)
    }
}

impl From<ColorScale> for ColorScaleSpec {
    fn from(scale: ColorScale) -> Self {
        let (thresholds, mut colors): (Vec<f64>, Vec<ColorToken>) = scale.steps.into_iter().unzip();
        colors.push(scale.default);
        Self { thresholds, colors }
    }
}
