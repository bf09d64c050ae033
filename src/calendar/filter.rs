use crate::calendar::errors::CalendarError;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Reporting window applied to period totals and category breakdowns.
///
/// Windows are always evaluated against an explicit `now`; nothing in this
/// module reads the wall clock.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum DateFilter {
    #[default]
    All,
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear
}

impl DateFilter {
    pub const VARIANTS: [DateFilter; 5] = [
        DateFilter::All,
        DateFilter::Today,
        DateFilter::ThisWeek,
        DateFilter::ThisMonth,
        DateFilter::ThisYear
    ];

    /// Returns true when `date` falls inside this window relative to `now`.
    ///
    /// `ThisWeek` only has a lower bound: anything on or after the most recent
    /// start of week matches.
    pub fn matches(self, date: NaiveDateTime, now: NaiveDateTime, week_start: Weekday) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::Today => date.date() == now.date(),
            DateFilter::ThisWeek => date >= start_of_week(now.date(), week_start).and_time(NaiveTime::MIN),
            DateFilter::ThisMonth => date.year() == now.year() && date.month() == now.month(),
            DateFilter::ThisYear => date.year() == now.year()
        }
    }
}

/// The most recent `week_start` on or before `date`.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    date - Days::new(u64::from(offset))
}

impl Display for DateFilter {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateFilter::All => "all",
            DateFilter::Today => "today",
            DateFilter::ThisWeek => "this_week",
            DateFilter::ThisMonth => "this_month",
            DateFilter::ThisYear => "this_year"
        };

        formatter.write_str(label)
    }
}

impl FromStr for DateFilter {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "all" => Ok(DateFilter::All),
            "today" => Ok(DateFilter::Today),
            "week" | "this_week" => Ok(DateFilter::ThisWeek),
            "month" | "this_month" => Ok(DateFilter::ThisMonth),
            "year" | "this_year" => Ok(DateFilter::ThisYear),
            _ => Err(CalendarError::UnknownFilter(value.to_string()))
        }
    }
}
