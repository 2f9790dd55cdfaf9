/// A calendar date: year, month (as an index into the owning calendar's
/// ordered month list), and 1-based day of month.
///
/// A `Date` is only meaningful relative to the calendar it was built
/// against; validity and conversions live on [`Calendar`](super::Calendar),
/// which takes the date by reference. `month` is `None` when the date was
/// constructed from an unknown month name; such a date is never valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date {
    pub year: i64,
    pub month: Option<usize>,
    pub day: i64,
}

impl Date {
    pub fn new(year: i64, month: usize, day: i64) -> Self {
        Self {
            year,
            month: Some(month),
            day,
        }
    }

    /// A date whose month could not be resolved. Always invalid.
    pub fn unresolved(year: i64, day: i64) -> Self {
        Self {
            year,
            month: None,
            day,
        }
    }
}
