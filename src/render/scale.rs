//! Position scales for the heatmap axes.

use chrono::{Datelike, NaiveDate};

/// Maps years onto a horizontal pixel range.
///
/// Each year is placed at its 1st of January, measured in days, so leap
/// years take a slightly wider slot, as on a calendar axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start_year: i32,
    end_year: i32,
    start_day: i64,
    end_day: i64,
    range: (f64, f64),
}

fn year_start_day(year: i32) -> Option<i64> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(|date| i64::from(date.num_days_from_ce()))
}

impl TimeScale {
    /// A scale whose domain is padded by one year on each side of
    /// `[min_year, max_year]`. `None` if those years are outside the
    /// representable calendar.
    pub fn for_years(min_year: i32, max_year: i32, range: (f64, f64)) -> Option<Self> {
        let start_year = min_year.checked_sub(1)?;
        let end_year = max_year.checked_add(1)?;
        Some(Self {
            start_year,
            end_year,
            start_day: year_start_day(start_year)?,
            end_day: year_start_day(end_year)?,
            range,
        })
    }

    pub fn domain(&self) -> (i32, i32) {
        (self.start_year, self.end_year)
    }

    /// Pixel position of the start of `year`.
    pub fn x(&self, year: i32) -> Option<f64> {
        let day = year_start_day(year)?;
        let span = (self.end_day - self.start_day) as f64;
        let t = (day - self.start_day) as f64 / span;
        Some(self.range.0 + t * (self.range.1 - self.range.0))
    }

    /// Pixel width of `year`.
    pub fn year_width(&self, year: i32) -> Option<f64> {
        Some(self.x(year.checked_add(1)?)? - self.x(year)?)
    }

    /// Round tick years covering the domain, at most `max_ticks` of them.
    ///
    /// The step is the smallest of 1, 2, 5, 10, 20, 50, … years that keeps the
    /// tick count within `max_ticks`; ticks sit on multiples of the step.
    pub fn ticks(&self, max_ticks: usize) -> Vec<i32> {
        let (start_year, end_year) = self.domain();
        let span = i64::from(end_year) - i64::from(start_year);
        let max_ticks = i64::try_from(max_ticks.max(1)).unwrap_or(i64::MAX);
        let step = nice_steps()
            .find(|step| span / step + 1 <= max_ticks)
            .unwrap_or(i64::from(i32::MAX));

        let first = (i64::from(start_year) + step - 1).div_euclid(step) * step;
        (0..)
            .map(|i| first + i * step)
            .take_while(|year| *year <= i64::from(end_year))
            .filter_map(|year| i32::try_from(year).ok())
            .collect()
    }
}

fn nice_steps() -> impl Iterator<Item = i64> {
    (0..10u32).flat_map(|exponent| {
        let magnitude = 10i64.pow(exponent);
        [magnitude, 2 * magnitude, 5 * magnitude]
    })
}

/// Splits a vertical pixel range into equal bands, one per category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale<'a> {
    domain: &'a [&'a str],
    range: (f64, f64),
}

impl<'a> BandScale<'a> {
    pub fn new(domain: &'a [&'a str], range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn bandwidth(&self) -> f64 {
        if self.domain.is_empty() {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.domain.len() as f64
    }

    /// Start of the band for `category`.
    pub fn position(&self, category: &str) -> Option<f64> {
        let index = self.domain.iter().position(|c| *c == category)?;
        Some(self.range.0 + index as f64 * self.bandwidth())
    }

    pub fn domain(&self) -> &'a [&'a str] {
        self.domain
    }
}
