use crate::errors::WeekParseError;
use chrono::{Datelike, Duration, NaiveDate};
use std::{fmt, str::FromStr};

/// An ISO-8601 week, written `YYYY-Www`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoWeek {
    year: i32,
    week: u32,
}

impl IsoWeek {
    pub fn new(year: i32, week: u32) -> Result<Self, WeekParseError> {
        let max = weeks_in_year(year).ok_or(WeekParseError::OutOfRange { year, week })?;
        if week == 0 || week > max {
            return Err(WeekParseError::OutOfRange { year, week });
        }
        Ok(Self { year, week })
    }

    pub fn containing(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Monday through Sunday of this week, both inclusive.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        let week_one_monday = week_one_monday(self.year);
        let start = week_one_monday + Duration::weeks(i64::from(self.week) - 1);
        (start, start + Duration::days(6))
    }
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

impl FromStr for IsoWeek {
    type Err = WeekParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let format_error = || WeekParseError::Format(value.to_string());
        let (year, week) = value.split_once("-W").ok_or_else(format_error)?;
        let all_digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(year, 4) || !all_digits(week, 2) {
            return Err(format_error());
        }

        let year = year.parse::<i32>().map_err(|_| format_error())?;
        let week = week.parse::<u32>().map_err(|_| format_error())?;
        Self::new(year, week)
    }
}

fn week_one_monday(year: i32) -> NaiveDate {
    let jan4 = NaiveDate::from_ymd_opt(year, 1, 4).unwrap_or(NaiveDate::MIN);
    jan4 - Duration::days(i64::from(jan4.weekday().number_from_monday()) - 1)
}

/// 53 when December 28th falls in week 53, otherwise 52.
fn weeks_in_year(year: i32) -> Option<u32> {
    let dec28 = NaiveDate::from_ymd_opt(year, 12, 28)?;
    Some(dec28.iso_week().week())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
