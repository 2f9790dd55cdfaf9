use std::collections::HashMap;

use crate::calendar::date::Date;
use crate::calendar::month::Month;

/// A fantasy calendar: an origin year, a year-zero policy, and an ordered
/// list of months. Month order is significant: it is the calendar order
/// used for day summation and for `Date.month` indices.
///
/// The calendar itself is immutable and has no derived per-query state, so
/// it is safe to share between any number of readers.
#[derive(Debug, Clone)]
pub struct Calendar {
    origin_year: i64,
    has_year_zero: bool,
    months: Vec<Month>,
    /// Derived name → index lookup; rebuilt on construction, never mutated.
    month_lookup: HashMap<String, usize>,
}

impl Calendar {
    pub fn new(origin_year: i64, has_year_zero: bool, months: Vec<Month>) -> Self {
        let mut month_lookup = HashMap::with_capacity(months.len());
        for (index, month) in months.iter().enumerate() {
            month_lookup.insert(month.name().to_string(), index);
        }
        Self {
            origin_year,
            has_year_zero,
            months,
            month_lookup,
        }
    }

    pub fn origin_year(&self) -> i64 {
        self.origin_year
    }

    pub fn has_year_zero(&self) -> bool {
        self.has_year_zero
    }

    /// The months in calendar order.
    pub fn months(&self) -> &[Month] {
        &self.months
    }

    /// Look up a month by its index in calendar order.
    pub fn month(&self, index: usize) -> Option<&Month> {
        self.months.get(index)
    }

    /// Look up a month's calendar-order index by name.
    pub fn month_index(&self, name: &str) -> Option<usize> {
        self.month_lookup.get(name).copied()
    }

    /// Total days in `year`. Leap rules make this year-dependent, so it is
    /// recomputed per call rather than cached.
    pub fn days_in_year(&self, year: i64) -> i64 {
        self.months
            .iter()
            .map(|month| month.days_in_month(year))
            .sum()
    }

    /// Build a date from a month name. An unknown name yields a date with
    /// no resolvable month, which is never valid.
    pub fn date(&self, year: i64, month_name: &str, day: i64) -> Date {
        match self.month_index(month_name) {
            Some(index) => Date::new(year, index, day),
            None => Date::unresolved(year, day),
        }
    }

    /// Whether `date` is a real day of this calendar: on or after the
    /// origin year, not year zero unless the calendar has one, with a
    /// resolvable month and a day inside that month's year-adjusted length.
    pub fn is_valid(&self, date: &Date) -> bool {
        let Some(index) = date.month else {
            return false;
        };
        let Some(month) = self.months.get(index) else {
            return false;
        };
        date.year >= self.origin_year
            && (date.year != 0 || self.has_year_zero)
            && date.day >= 1
            && date.day <= month.days_in_month(date.year)
    }

    /// Convert a date to its 1-based ordinal day count from the start of
    /// the origin year. Returns `None` for invalid dates.
    ///
    /// When the calendar has no year zero, year 0 contributes no days and
    /// is skipped entirely.
    pub fn date_to_number(&self, date: &Date) -> Option<i64> {
        if !self.is_valid(date) {
            return None;
        }
        let month_index = date.month?;

        let mut total = 0;
        let mut year = self.origin_year;
        while year < date.year {
            if year != 0 || self.has_year_zero {
                total += self.days_in_year(year);
            }
            year += 1;
        }
        for month in &self.months[..month_index] {
            total += month.days_in_month(date.year);
        }
        Some(total + date.day)
    }

    /// Sentinel-style variant of [`date_to_number`](Self::date_to_number):
    /// invalid dates map to `0`. Callers that need to distinguish "invalid"
    /// from a genuine result must use the `Option` form or check
    /// [`is_valid`](Self::is_valid) first.
    pub fn date_to_number_or_zero(&self, date: &Date) -> i64 {
        self.date_to_number(date).unwrap_or(0)
    }

    /// Convert an ordinal day count back to a date.
    ///
    /// A linear scan from the origin year: cost is proportional to the
    /// elapsed years, which bounds practical ordinal magnitude for
    /// interactive use but is exact. Year zero is skipped when the calendar
    /// has none, mirroring [`date_to_number`](Self::date_to_number) so the
    /// two are exact inverses over valid dates.
    ///
    /// Ordinals below 1 produce a day-of-month below 1; the result is an
    /// invalid date rather than an error.
    pub fn number_to_date(&self, ordinal: i64) -> Date {
        if self.months.is_empty() {
            return Date::unresolved(self.origin_year, ordinal);
        }

        let mut remaining = ordinal;
        let mut year = self.origin_year;
        if year == 0 && !self.has_year_zero {
            year = 1;
        }
        while remaining > self.days_in_year(year) {
            remaining -= self.days_in_year(year);
            year += 1;
            if year == 0 && !self.has_year_zero {
                year = 1;
            }
        }

        let mut index = 0;
        while index + 1 < self.months.len() && remaining > self.months[index].days_in_month(year) {
            remaining -= self.months[index].days_in_month(year);
            index += 1;
        }
        Date::new(year, index, remaining)
    }
}
