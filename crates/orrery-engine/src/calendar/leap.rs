/// Recursive leap-year rules.
///
/// A `LeapPeriod` is "every N years", optionally carrying a nested
/// exception period that suppresses the match ("every 4, except every 100,
/// except every 400" reproduces Gregorian leap logic). Exceptions nest to
/// arbitrary depth.

/// A periodic year pattern with an optional nested exception.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapPeriod {
    /// Match every `every` years. Zero or negative disables matching.
    every: i64,
    /// Years matching this sub-period are excluded from the outer match.
    except: Option<Box<LeapPeriod>>,
}

impl LeapPeriod {
    pub fn new(every: i64) -> Self {
        Self {
            every,
            except: None,
        }
    }

    pub fn with_exception(mut self, except: LeapPeriod) -> Self {
        self.except = Some(Box::new(except));
        self
    }

    pub fn every(&self) -> i64 {
        self.every
    }

    pub fn exception(&self) -> Option<&LeapPeriod> {
        self.except.as_deref()
    }

    /// Whether `year` falls on this period.
    ///
    /// Negative years are folded into the equivalent positive residue class
    /// so the periodicity extends symmetrically before the origin. Rust's
    /// `%` truncates toward zero, so `every + (year % every)` lands in
    /// `1..=every` for negative years (and `every` itself divides evenly).
    pub fn matches(&self, year: i64) -> bool {
        if self.every <= 0 {
            return false;
        }
        let mut y = year;
        if y < 0 {
            y = self.every + (y % self.every);
        }
        let mut is_match = y % self.every == 0;
        if is_match {
            if let Some(except) = &self.except {
                is_match = !except.matches(year);
            }
        }
        is_match
    }
}

/// Grants `extra_days` to a month in years matched by `period`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeapRule {
    extra_days: i64,
    period: LeapPeriod,
}

impl LeapRule {
    pub fn new(extra_days: i64, period: LeapPeriod) -> Self {
        Self { extra_days, period }
    }

    pub fn extra_days(&self) -> i64 {
        self.extra_days
    }

    pub fn period(&self) -> &LeapPeriod {
        &self.period
    }

    /// Whether `year` is a leap year under this rule.
    pub fn is_leap(&self, year: i64) -> bool {
        self.period.matches(year)
    }

    /// Extra days this rule grants in `year` (zero for non-leap years).
    pub fn extra_days_for(&self, year: i64) -> i64 {
        if self.is_leap(year) {
            self.extra_days
        } else {
            0
        }
    }
}
