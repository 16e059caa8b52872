use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{ChartError, ChartResult};

/// Padding added on both ends of the axis: at least a week, or 5% of the
/// total data span for long timelines.
pub fn axis_buffer_days(total_span_days: i64) -> i64 {
    (((total_span_days as f64) * 0.05) as i64).max(7)
}

fn day_number(d: NaiveDate) -> f64 {
    d.num_days_from_ce() as f64
}

/// One axis tick: a Monday with its pixel position.
#[derive(Clone, Copy, Debug)]
pub struct Tick {
    pub date: NaiveDate,
    pub x: f64,
    /// Major ticks get a label and a stronger gridline.
    pub major: bool,
}

/// Affine map from calendar time to pixel x, with the axis buffer applied.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    domain_start: NaiveDate,
    domain_end: NaiveDate,
    d0: f64,
    d1: f64,
    px0: f64,
    px1: f64,
}

impl TimeScale {
    /// Fit the scale to the data extent `[min_start, max_end]` over the pixel
    /// range `[px0, px1]`.
    pub fn fit(
        min_start: NaiveDate,
        max_end: NaiveDate,
        px0: f64,
        px1: f64,
    ) -> ChartResult<Self> {
        if max_end < min_start {
            return Err(ChartError::validation(
                "time scale data extent is inverted",
            ));
        }
        if !(px1 > px0) {
            return Err(ChartError::validation("time scale pixel range is empty"));
        }
        let buffer = axis_buffer_days((max_end - min_start).num_days());
        let domain_start = min_start - Duration::days(buffer);
        let domain_end = max_end + Duration::days(buffer);
        Ok(Self {
            domain_start,
            domain_end,
            d0: day_number(domain_start),
            d1: day_number(domain_end),
            px0,
            px1,
        })
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        (self.domain_start, self.domain_end)
    }

    /// Pixel position of a fractional day number.
    pub fn x_day(&self, day: f64) -> f64 {
        let t = (day - self.d0) / (self.d1 - self.d0);
        self.px0 + t * (self.px1 - self.px0)
    }

    /// Pixel position of a calendar date (midnight).
    pub fn x(&self, date: NaiveDate) -> f64 {
        self.x_day(day_number(date))
    }

    /// Pixel position of the day *after* `date`; the right edge of a bar
    /// whose inclusive end is `date`.
    pub fn x_after(&self, date: NaiveDate) -> f64 {
        self.x_day(day_number(date) + 1.0)
    }

    /// Weekly ticks on Mondays across the domain. Every `major_every`-th
    /// Monday (starting from the first) is major; the rest are minor.
    pub fn week_ticks(&self, major_every: u32) -> Vec<Tick> {
        let major_every = major_every.max(1) as usize;
        let to_monday = (7 - self.domain_start.weekday().num_days_from_monday()) % 7;
        let mut date = self.domain_start + Duration::days(to_monday as i64);
        let mut ticks = Vec::new();
        let mut i = 0usize;
        while date <= self.domain_end {
            ticks.push(Tick {
                date,
                x: self.x(date),
                major: i % major_every == 0,
            });
            date += Duration::days(7);
            i += 1;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn buffer_is_at_least_a_week() {
        assert_eq!(axis_buffer_days(0), 7);
        assert_eq!(axis_buffer_days(30), 7);
        assert_eq!(axis_buffer_days(139), 7);
    }

    #[test]
    fn buffer_grows_with_long_spans() {
        assert_eq!(axis_buffer_days(200), 10);
        assert_eq!(axis_buffer_days(1000), 50);
    }

    #[test]
    fn mapping_is_monotone_and_hits_the_edges() {
        let scale = TimeScale::fit(d("2025-01-10"), d("2025-02-10"), 100.0, 1100.0).unwrap();
        let (ds, de) = scale.domain();
        assert_eq!(ds, d("2025-01-03"));
        assert_eq!(de, d("2025-02-17"));
        assert!((scale.x(ds) - 100.0).abs() < 1e-9);
        assert!((scale.x(de) - 1100.0).abs() < 1e-9);
        assert!(scale.x(d("2025-01-10")) < scale.x(d("2025-01-11")));
    }

    #[test]
    fn bar_right_edge_is_one_day_past_inclusive_end() {
        let scale = TimeScale::fit(d("2025-01-01"), d("2025-03-01"), 0.0, 590.0).unwrap();
        assert!((scale.x_after(d("2025-01-05")) - scale.x(d("2025-01-06"))).abs() < 1e-9);
    }

    #[test]
    fn ticks_fall_on_mondays() {
        let scale = TimeScale::fit(d("2025-01-10"), d("2025-02-10"), 0.0, 1000.0).unwrap();
        let ticks = scale.week_ticks(2);
        assert!(!ticks.is_empty());
        for t in &ticks {
            assert_eq!(t.date.weekday(), chrono::Weekday::Mon);
        }
        assert!(ticks[0].major);
        assert!(!ticks[1].major);
        assert!(ticks[2].major);
        for pair in ticks.windows(2) {
            assert_eq!((pair[1].date - pair[0].date).num_days(), 7);
        }
    }

    #[test]
    fn inverted_extent_is_rejected() {
        assert!(TimeScale::fit(d("2025-02-01"), d("2025-01-01"), 0.0, 100.0).is_err());
    }
}
