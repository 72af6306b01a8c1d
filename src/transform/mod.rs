//! Converts a [`RawDataset`] into chart-ready [`HeatmapData`].
//!
//! This is the only step with real logic: month-name resolution, two-decimal
//! rounding, and the absolute temperature of every cell. It is pure; calling
//! it twice on the same input gives the same output.

pub mod error;
pub mod months;
pub mod rounding;

use crate::types::dataset::RawDataset;
use crate::types::display::{DisplayRecord, HeatmapData};
use error::DatasetError;
use log::debug;
use months::{month_name, MONTH_NAMES};
use rounding::round2;

/// Transforms raw monthly variances into display records.
///
/// For every input record, in order:
///
/// * `month` is resolved through [`MONTH_NAMES`] (`1` is `"January"`).
/// * `variance` is rounded to two decimals.
/// * `temperature` is `round2(base_temperature + rounded variance)`. The
///   variance is rounded *before* the addition and the sum is rounded again,
///   so results match what the chart has always displayed.
///
/// An empty record list yields an empty result.
///
/// # Errors
///
/// * [`DatasetError::NonFinite`] if the base temperature or a variance is NaN or infinite.
/// * [`DatasetError::InvalidMonth`] if a month lies outside `1..=12`.
/// * [`DatasetError::OutOfRange`] if a variance or temperature is too large to round.
///
/// # Examples
///
/// ```
/// use temperature_heatmap::{transform, RawDataset, RawVarianceRecord};
///
/// let raw = RawDataset {
///     base_temperature: 8.66,
///     monthly_variance: vec![RawVarianceRecord { year: 2000, month: 1, variance: -0.1 }],
/// };
/// let data = transform(&raw).unwrap();
/// let cell = &data.monthly_variance[0];
/// assert_eq!(cell.month, "January");
/// assert_eq!(cell.variance, -0.1);
/// assert_eq!(cell.temperature, 8.56);
/// ```
pub fn transform(raw: &RawDataset) -> Result<HeatmapData, DatasetError> {
    let base_temperature = raw.base_temperature;
    if !base_temperature.is_finite() {
        return Err(DatasetError::NonFinite {
            field: "baseTemperature",
            index: None,
        });
    }

    let monthly_variance = raw
        .monthly_variance
        .iter()
        .enumerate()
        .map(|(index, record)| {
            if !record.variance.is_finite() {
                return Err(DatasetError::NonFinite {
                    field: "variance",
                    index: Some(index),
                });
            }
            let month = month_name(record.month).ok_or(DatasetError::InvalidMonth {
                index,
                month: record.month,
            })?;
            let out_of_range = |field| DatasetError::OutOfRange { field, index };
            let variance = round2(record.variance).ok_or_else(|| out_of_range("variance"))?;
            let temperature = round2(base_temperature + variance)
                .ok_or_else(|| out_of_range("temperature"))?;
            Ok(DisplayRecord {
                year: record.year,
                month,
                variance,
                temperature,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Transformed {} monthly records (base temperature {})",
        monthly_variance.len(),
        base_temperature
    );

    Ok(HeatmapData {
        base_temperature,
        monthly_variance,
        month_names: &MONTH_NAMES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::dataset::RawVarianceRecord;

    fn dataset(base_temperature: f64, records: &[(i32, u32, f64)]) -> RawDataset {
        RawDataset {
            base_temperature,
            monthly_variance: records
                .iter()
                .map(|&(year, month, variance)| RawVarianceRecord {
                    year,
                    month,
                    variance,
                })
                .collect(),
        }
    }

    #[test]
    fn test_end_to_end_single_record() -> Result<(), DatasetError> {
        let data = transform(&dataset(8.66, &[(2000, 1, -0.1)]))?;
        assert_eq!(data.base_temperature, 8.66);
        assert_eq!(
            data.monthly_variance,
            vec![DisplayRecord {
                year: 2000,
                month: "January",
                variance: -0.1,
                temperature: 8.56,
            }]
        );
        Ok(())
    }

    #[test]
    fn test_every_month_resolves() -> Result<(), DatasetError> {
        for month in 1..=12u32 {
            let data = transform(&dataset(8.0, &[(1900, month, 0.0)]))?;
            assert_eq!(
                data.monthly_variance[0].month,
                MONTH_NAMES[(month - 1) as usize]
            );
        }
        Ok(())
    }

    #[test]
    fn test_variance_is_rounded_before_adding() -> Result<(), DatasetError> {
        let data = transform(&dataset(8.0, &[(1900, 6, 1.005)]))?;
        let cell = data.monthly_variance[0];
        assert_eq!(cell.variance, 1.01);
        assert_eq!(cell.temperature, 9.01);
        Ok(())
    }

    #[test]
    fn test_double_rounding_differs_from_single_rounding() -> Result<(), DatasetError> {
        // round2(0.004 + 0.004) would be 0.01; rounding the variance first gives 0.0
        let data = transform(&dataset(0.004, &[(1900, 1, 0.004)]))?;
        assert_eq!(data.monthly_variance[0].variance, 0.0);
        assert_eq!(data.monthly_variance[0].temperature, 0.0);
        Ok(())
    }

    #[test]
    fn test_empty_input_gives_empty_output() -> Result<(), DatasetError> {
        let data = transform(&dataset(8.66, &[]))?;
        assert!(data.is_empty());
        assert_eq!(data.month_names.len(), 12);
        assert_eq!(data.year_range(), None);
        Ok(())
    }

    #[test]
    fn test_cardinality_and_order_are_preserved() -> Result<(), DatasetError> {
        let records: Vec<(i32, u32, f64)> = (0..36)
            .map(|i| (1990 + i / 12, (i % 12 + 1) as u32, i as f64 * 0.137 - 2.0))
            .collect();
        let raw = dataset(8.66, &records);
        let data = transform(&raw)?;

        assert_eq!(data.len(), raw.len());
        for (raw_record, cell) in raw.monthly_variance.iter().zip(&data.monthly_variance) {
            assert_eq!(cell.year, raw_record.year);
            assert_eq!(cell.month, MONTH_NAMES[(raw_record.month - 1) as usize]);
            let variance = round2(raw_record.variance);
            assert_eq!(Some(cell.variance), variance);
            assert_eq!(
                Some(cell.temperature),
                variance.and_then(|v| round2(raw.base_temperature + v))
            );
        }
        assert_eq!(data.year_range(), Some((1990, 1992)));
        Ok(())
    }

    #[test]
    fn test_transform_is_repeatable() -> Result<(), DatasetError> {
        let raw = dataset(8.66, &[(1753, 1, -1.366), (1753, 2, -2.223)]);
        assert_eq!(transform(&raw)?, transform(&raw)?);
        Ok(())
    }

    #[test]
    fn test_out_of_range_month() {
        let err = transform(&dataset(8.66, &[(2000, 1, 0.1), (2000, 13, 0.1)])).unwrap_err();
        assert!(
            matches!(err, DatasetError::InvalidMonth { index: 1, month: 13 }),
            "unexpected error: {err:?}"
        );

        let err = transform(&dataset(8.66, &[(2000, 0, 0.1)])).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidMonth { index: 0, month: 0 }));
    }

    #[test]
    fn test_huge_variance_is_out_of_range() {
        let err = transform(&dataset(8.66, &[(2000, 1, 0.5), (2000, 2, 1.7e308)])).unwrap_err();
        assert!(
            matches!(
                err,
                DatasetError::OutOfRange {
                    field: "variance",
                    index: 1
                }
            ),
            "unexpected error: {err:?}"
        );

        let err = transform(&dataset(1e30, &[(2000, 1, 0.5)])).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::OutOfRange {
                field: "temperature",
                index: 0
            }
        ));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let err = transform(&dataset(f64::NAN, &[])).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NonFinite {
                field: "baseTemperature",
                index: None
            }
        ));

        let err = transform(&dataset(8.66, &[(2000, 1, f64::INFINITY)])).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NonFinite {
                field: "variance",
                index: Some(0)
            }
        ));
    }
}
