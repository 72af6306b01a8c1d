//! Chart-ready data produced by [`crate::transform`].

use serde::Serialize;

/// One heatmap cell: a month of a year with its rounded variance and
/// absolute temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub year: i32,
    /// Resolved month name, e.g. `"January"`.
    pub month: &'static str,
    /// Variance rounded to two decimals, in °C.
    pub variance: f64,
    /// `base_temperature + variance`, rounded to two decimals, in °C.
    pub temperature: f64,
}

/// Everything the renderer needs: the base temperature, one
/// [`DisplayRecord`] per input record (same order), and the month names
/// used for the vertical axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapData {
    pub base_temperature: f64,
    pub monthly_variance: Vec<DisplayRecord>,
    pub month_names: &'static [&'static str; 12],
}

impl HeatmapData {
    pub fn len(&self) -> usize {
        self.monthly_variance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_variance.is_empty()
    }

    /// Earliest and latest year present, or `None` for an empty dataset.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let mut years = self.monthly_variance.iter().map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Zero-based position of `month` in [`HeatmapData::month_names`].
    pub fn month_index(&self, month: &str) -> Option<usize> {
        self.month_names.iter().position(|name| *name == month)
    }
}
