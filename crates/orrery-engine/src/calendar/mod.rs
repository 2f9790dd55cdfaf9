//! Fantasy calendar engine: recursive leap rules, year-aware month
//! lengths, and bidirectional date ↔ ordinal conversion.

#[allow(clippy::module_inception)]
mod calendar;
mod date;
mod leap;
mod month;

pub use calendar::Calendar;
pub use date::Date;
pub use leap::{LeapPeriod, LeapRule};
pub use month::Month;
