//! Input validation for birth dates and event entries.
//!
//! Dates arrive as `dd-MM-yyyy` strings, zero-padded or not. Structural
//! checks (format, month range, day range with leap years) apply to every
//! date; the birth date additionally gets a policy layer: not before 1900,
//! not after today, and at most 125 years back.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::model::{DAYS_IN_YEAR, LifeEvent, days_between};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_AGE_YEARS: f64 = 125.0;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("expected a dd-MM-yyyy date, got {0:?}")]
    BadFormat(String),

    #[error("invalid month: {0} (must be 1..=12)")]
    BadMonth(u32),

    #[error("invalid day {day} for month {month} of {year}")]
    BadDay { day: u32, month: u32, year: i32 },

    #[error("birth year {0} is before {MIN_YEAR}")]
    BeforeMinYear(i32),

    #[error("birth date {0} has not happened yet")]
    InFuture(NaiveDate),

    #[error("an age over 125 years is not plausible")]
    ImplausiblyOld,

    #[error("expected an event as date=label, got {0:?}")]
    BadEvent(String),

    #[error("event label is empty")]
    EmptyEventLabel,
}

/// Parse a `dd-MM-yyyy` date, checking only that the date exists on the
/// calendar.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let bad = || ValidationError::BadFormat(input.to_string());

    let mut parts = input.trim().splitn(3, '-');
    let (day, month, year) = match (parts.next(), parts.next(), parts.next()) {
        (Some(d), Some(m), Some(y)) => (d, m, y),
        _ => return Err(bad()),
    };

    let day: u32 = day.parse().map_err(|_| bad())?;
    let month: u32 = month.parse().map_err(|_| bad())?;
    let year: i32 = year.parse().map_err(|_| bad())?;

    if !(1..=12).contains(&month) {
        return Err(ValidationError::BadMonth(month));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(ValidationError::BadDay { day, month, year });
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(bad)
}

/// Parse and policy-check a birth date: structural validity, year >= 1900,
/// not after `today`, and no more than 125 years back. The age ceiling uses
/// the day-count quotient, not the calendar-aware split.
pub fn validate_dob(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let dob = parse_date(input)?;

    if dob.year() < MIN_YEAR {
        return Err(ValidationError::BeforeMinYear(dob.year()));
    }
    if dob > today {
        return Err(ValidationError::InFuture(dob));
    }
    if days_between(dob, today) as f64 / DAYS_IN_YEAR > MAX_AGE_YEARS {
        return Err(ValidationError::ImplausiblyOld);
    }

    Ok(dob)
}

/// Parse a `date=label` event entry. The date is checked structurally only;
/// an event before the birth date is handled later by the negative-index
/// rule, not here.
pub fn parse_event(input: &str) -> Result<LifeEvent, ValidationError> {
    let Some((date_part, label_part)) = input.split_once('=') else {
        return Err(ValidationError::BadEvent(input.to_string()));
    };

    let label = label_part.trim();
    if label.is_empty() {
        return Err(ValidationError::EmptyEventLabel);
    }

    Ok(LifeEvent {
        date: parse_date(date_part)?,
        label: label.to_string(),
    })
}

/// Number of days in a given year/month. Out-of-range months yield 0 so
/// every day value fails the range check; callers reject those months
/// before the day check anyway.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
