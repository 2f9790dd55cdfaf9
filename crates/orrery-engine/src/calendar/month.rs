use crate::calendar::leap::LeapRule;

/// A month in a fantasy calendar: a base day count plus an optional leap
/// rule granting (or removing) days in matching years.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Month {
    name: String,
    base_days: i64,
    leap: Option<LeapRule>,
}

impl Month {
    pub fn new(name: impl Into<String>, base_days: i64) -> Self {
        Self {
            name: name.into(),
            base_days,
            leap: None,
        }
    }

    pub fn with_leap(mut self, leap: LeapRule) -> Self {
        self.leap = Some(leap);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_days(&self) -> i64 {
        self.base_days
    }

    pub fn leap(&self) -> Option<&LeapRule> {
        self.leap.as_ref()
    }

    /// Day count of this month in `year`, leap rule applied.
    pub fn days_in_month(&self, year: i64) -> i64 {
        let extra = self
            .leap
            .as_ref()
            .map_or(0, |leap| leap.extra_days_for(year));
        self.base_days + extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::leap::LeapPeriod;

    #[test]
    fn base_days_without_leap() {
        let month = Month::new("Frostfall", 30);
        assert_eq!(month.days_in_month(1), 30);
        assert_eq!(month.days_in_month(4), 30);
    }

    #[test]
    fn leap_rule_extends_matching_years() {
        let month = Month::new("Thaw", 28).with_leap(LeapRule::new(1, LeapPeriod::new(4)));
        assert_eq!(month.days_in_month(4), 29);
        assert_eq!(month.days_in_month(5), 28);
    }
}
