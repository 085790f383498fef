//! model.rs
//!
//! The calendar model: everything between a birth date and a rendered grid.
//!
//! All arithmetic works on whole-day counts. Unit conversion divides the day
//! count by the unit divisor *before* any flooring; the loop bound is the
//! floored total, while the lived/remaining boundary keeps the fractional
//! quotient and compares it against integer cell indices. Event indices use
//! the same day-count formula, so an event always lands on a valid index
//! under the unit it was computed for.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::validate::days_in_month;

pub const DAYS_IN_YEAR: f64 = 365.25;
pub const SECS_PER_DAY: i64 = 86_400;

/// Display granularity of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Days,
    Weeks,
    Years,
}

/// Divisor applied to a raw day count, and the grid width in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConfig {
    pub divisor: f64,
    pub columns: usize,
}

impl Unit {
    /// Lossy conversion from user input. Anything that is not one of the
    /// three known unit names falls back to weeks; an unknown unit is a
    /// default, not an error.
    pub fn from_arg(arg: &str) -> Unit {
        match arg.trim().to_ascii_lowercase().as_str() {
            "days" => Unit::Days,
            "years" => Unit::Years,
            _ => Unit::Weeks,
        }
    }

    pub fn config(self) -> UnitConfig {
        match self {
            Unit::Days => UnitConfig {
                divisor: 1.0,
                columns: 60,
            },
            Unit::Weeks => UnitConfig {
                divisor: 7.0,
                columns: 52,
            },
            Unit::Years => UnitConfig {
                divisor: DAYS_IN_YEAR,
                columns: 25,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Unit::Days => "days",
            Unit::Weeks => "weeks",
            Unit::Years => "years",
        }
    }
}

/// Whole days from `a` to `b`. Negative when `b` is before `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// A user-supplied annotation tied to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeEvent {
    pub date: NaiveDate,
    pub label: String,
}

/// One session's worth of state: birth date, chosen unit, the expectancy
/// estimate, and the events entered so far. Every derivation takes "today"
/// (or "now") as an argument, so nothing here reads the clock.
#[derive(Debug, Clone)]
pub struct LifeCalendar {
    pub dob: NaiveDate,
    pub unit: Unit,
    pub expectancy_years: u32,
    pub events: Vec<LifeEvent>,
}

impl LifeCalendar {
    pub fn new(dob: NaiveDate, unit: Unit, expectancy_years: u32) -> Self {
        Self {
            dob,
            unit,
            expectancy_years,
            events: Vec::new(),
        }
    }

    pub fn with_events(mut self, events: Vec<LifeEvent>) -> Self {
        self.events = events;
        self
    }

    /// Estimated lifespan in whole days.
    pub fn total_days(&self) -> i64 {
        (self.expectancy_years as f64 * DAYS_IN_YEAR).floor() as i64
    }

    pub fn total_seconds(&self) -> i64 {
        self.total_days() * SECS_PER_DAY
    }

    pub fn lived_days(&self, today: NaiveDate) -> i64 {
        days_between(self.dob, today)
    }

    /// Grid parameters under the session's unit. A zero-cell grid is a
    /// valid outcome when the lifespan rounds down to nothing.
    pub fn grid(&self, today: NaiveDate) -> Grid {
        let cfg = self.unit.config();
        Grid {
            lived_units: self.lived_days(today) as f64 / cfg.divisor,
            total_units: (self.total_days() as f64 / cfg.divisor).floor() as i64,
            columns: cfg.columns,
        }
    }

    /// Cell index -> label for every event on or after the birth date.
    ///
    /// Events before the birth date (negative index) are dropped. Two events
    /// on the same index keep the later one in insertion order; the map is a
    /// strict key -> value map, not a multi-map. Indices past the end of the
    /// grid are kept; they simply never match a rendered cell.
    pub fn event_map(&self) -> HashMap<i64, String> {
        let divisor = self.unit.config().divisor;
        let mut map = HashMap::new();
        for event in &self.events {
            let days = days_between(self.dob, event.date);
            let index = (days as f64 / divisor).floor() as i64;
            if index >= 0 {
                map.insert(index, event.label.clone());
            }
        }
        map
    }
}

/// Classification of a cell relative to the current moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Lived,
    Remaining,
}

/// A single renderable cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<'a> {
    pub index: i64,
    pub kind: CellKind,
    pub event: Option<&'a str>,
    pub last: bool,
}

/// Grid parameters: the fractional lived quotient and the floored total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub lived_units: f64,
    pub total_units: i64,
    pub columns: usize,
}

impl Grid {
    /// How many cells will classify as lived.
    pub fn lived_cells(&self) -> i64 {
        (self.lived_units.ceil() as i64).clamp(0, self.total_units)
    }

    /// Cells in index order. The lived/remaining split compares the integer
    /// index against the unfloored quotient.
    pub fn cells<'a>(
        &self,
        events: &'a HashMap<i64, String>,
    ) -> impl Iterator<Item = Cell<'a>> + 'a {
        let lived = self.lived_units;
        let total = self.total_units;
        (0..total).map(move |index| Cell {
            index,
            kind: if (index as f64) < lived {
                CellKind::Lived
            } else {
                CellKind::Remaining
            },
            event: events.get(&index).map(String::as_str),
            last: index == total - 1,
        })
    }
}

/// Seconds elapsed since the midnight that started the birth date.
pub fn seconds_lived(dob: NaiveDate, now: NaiveDateTime) -> i64 {
    now.signed_duration_since(dob.and_time(NaiveTime::MIN))
        .num_seconds()
}

/// Seconds until the estimated lifespan runs out, clamped at zero.
pub fn seconds_remaining(total_seconds: i64, lived: i64) -> i64 {
    (total_seconds - lived).max(0)
}

/// Calendar-aware age split into years, months, and days.
///
/// Chrono has no year/month/day diff, so the borrowing rules are done by
/// hand: a negative day count borrows the length of the month before
/// `today`, a negative month count borrows a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeBreakdown {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl AgeBreakdown {
    pub fn between(dob: NaiveDate, today: NaiveDate) -> Self {
        let mut years = today.year() - dob.year();
        let mut months = today.month() as i32 - dob.month() as i32;
        let mut days = today.day() as i32 - dob.day() as i32;

        if days < 0 {
            months -= 1;
            let (prev_year, prev_month) = if today.month() == 1 {
                (today.year() - 1, 12)
            } else {
                (today.year(), today.month() - 1)
            };
            days += days_in_month(prev_year, prev_month) as i32;
        }

        if months < 0 {
            years -= 1;
            months += 12;
        }

        Self {
            years,
            months,
            days,
        }
    }
}

impl fmt::Display for AgeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn plural(n: i32) -> &'static str {
            if n == 1 { "" } else { "s" }
        }
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unit_from_arg_known_values() {
        assert_eq!(Unit::from_arg("days"), Unit::Days);
        assert_eq!(Unit::from_arg("weeks"), Unit::Weeks);
        assert_eq!(Unit::from_arg("years"), Unit::Years);
        assert_eq!(Unit::from_arg("YEARS"), Unit::Years);
        assert_eq!(Unit::from_arg(" days "), Unit::Days);
    }

    #[test]
    fn unit_from_arg_unknown_falls_back_to_weeks() {
        assert_eq!(Unit::from_arg("fortnights"), Unit::Weeks);
        assert_eq!(Unit::from_arg(""), Unit::Weeks);
        assert_eq!(Unit::from_arg("day"), Unit::Weeks);
    }

    #[test]
    fn unit_config_table() {
        assert_eq!(Unit::Days.config().divisor, 1.0);
        assert_eq!(Unit::Days.config().columns, 60);
        assert_eq!(Unit::Weeks.config().divisor, 7.0);
        assert_eq!(Unit::Weeks.config().columns, 52);
        assert_eq!(Unit::Years.config().divisor, 365.25);
        assert_eq!(Unit::Years.config().columns, 25);
    }

    #[test]
    fn days_between_exact_whole_days() {
        assert_eq!(days_between(date(2000, 1, 1), date(2024, 1, 1)), 8766);
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 1)), 0);
        assert_eq!(days_between(date(2024, 1, 2), date(2024, 1, 1)), -1);
    }

    #[test]
    fn total_days_floors_the_year_product() {
        let cal = LifeCalendar::new(date(2000, 1, 1), Unit::Years, 70);
        assert_eq!(cal.total_days(), 25_567);
        assert_eq!(cal.total_seconds(), 25_567 * 86_400);
    }

    #[test]
    fn worked_example_seventy_years() {
        // dob 2000-01-01, today 2024-01-01, expectancy 70, unit years:
        // 25567 total days floors to 69 year cells, exactly 24.0 years lived.
        let cal = LifeCalendar::new(date(2000, 1, 1), Unit::Years, 70);
        let today = date(2024, 1, 1);
        let grid = cal.grid(today);

        assert_eq!(cal.lived_days(today), 8766);
        assert_eq!(grid.total_units, 69);
        assert_eq!(grid.lived_units, 24.0);
        assert_eq!(grid.lived_cells(), 24);

        let events = HashMap::new();
        let cells: Vec<_> = grid.cells(&events).collect();
        assert_eq!(cells.len(), 69);
        for cell in &cells[..24] {
            assert_eq!(cell.kind, CellKind::Lived);
        }
        for cell in &cells[24..] {
            assert_eq!(cell.kind, CellKind::Remaining);
        }
        assert!(cells[68].last);
        assert!(!cells[67].last);
    }

    #[test]
    fn total_units_is_floor_of_total_days_over_divisor() {
        let dob = date(1990, 5, 20);
        for unit in [Unit::Days, Unit::Weeks, Unit::Years] {
            let cal = LifeCalendar::new(dob, unit, 83);
            let expected = (cal.total_days() as f64 / unit.config().divisor).floor() as i64;
            assert_eq!(cal.grid(date(2024, 1, 1)).total_units, expected);
        }
    }

    #[test]
    fn zero_cell_grid_is_valid() {
        let cal = LifeCalendar::new(date(2024, 1, 1), Unit::Years, 0);
        let grid = cal.grid(date(2024, 1, 2));
        assert_eq!(grid.total_units, 0);
        assert_eq!(grid.lived_cells(), 0);
        let events = HashMap::new();
        assert_eq!(grid.cells(&events).count(), 0);
    }

    #[test]
    fn classification_is_idempotent() {
        let cal = LifeCalendar::new(date(1984, 3, 7), Unit::Weeks, 81).with_events(vec![
            LifeEvent {
                date: date(2002, 9, 1),
                label: "Moved out".into(),
            },
        ]);
        let today = date(2024, 6, 15);
        let events = cal.event_map();
        let first: Vec<_> = cal.grid(today).cells(&events).collect();
        let second: Vec<_> = cal.grid(today).cells(&events).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn event_exactly_k_units_after_dob_lands_on_index_k() {
        let dob = date(2000, 1, 1);

        let weeks = LifeCalendar::new(dob, Unit::Weeks, 70).with_events(vec![LifeEvent {
            date: dob + chrono::Duration::weeks(5),
            label: "w".into(),
        }]);
        assert_eq!(weeks.event_map().get(&5).map(String::as_str), Some("w"));

        let days = LifeCalendar::new(dob, Unit::Days, 70).with_events(vec![LifeEvent {
            date: dob + chrono::Duration::days(17),
            label: "d".into(),
        }]);
        assert_eq!(days.event_map().get(&17).map(String::as_str), Some("d"));

        // Two calendar years = 731 days across the 2000 leap year; still
        // floors to index 2 under the 365.25 divisor.
        let years = LifeCalendar::new(dob, Unit::Years, 70).with_events(vec![LifeEvent {
            date: date(2002, 1, 1),
            label: "y".into(),
        }]);
        assert_eq!(years.event_map().get(&2).map(String::as_str), Some("y"));
    }

    #[test]
    fn event_before_dob_is_dropped() {
        let cal = LifeCalendar::new(date(2000, 1, 1), Unit::Weeks, 70).with_events(vec![
            LifeEvent {
                date: date(1999, 12, 25),
                label: "Before".into(),
            },
        ]);
        assert!(cal.event_map().is_empty());
    }

    #[test]
    fn event_collision_keeps_the_later_label() {
        let dob = date(2000, 1, 1);
        let cal = LifeCalendar::new(dob, Unit::Weeks, 70).with_events(vec![
            LifeEvent {
                date: date(2000, 2, 1),
                label: "First".into(),
            },
            LifeEvent {
                date: date(2000, 2, 2),
                label: "Second".into(),
            },
        ]);
        // Both dates fall in week 4.
        let map = cal.event_map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&4).map(String::as_str), Some("Second"));
    }

    #[test]
    fn event_past_the_grid_stays_in_the_map() {
        let dob = date(2000, 1, 1);
        let cal = LifeCalendar::new(dob, Unit::Years, 70).with_events(vec![LifeEvent {
            date: date(2090, 1, 1),
            label: "Far".into(),
        }]);
        let map = cal.event_map();
        let grid = cal.grid(date(2024, 1, 1));
        let index = *map.keys().next().unwrap();
        assert!(index >= grid.total_units);
        // It never matches a rendered cell.
        assert!(grid.cells(&map).all(|c| c.event.is_none()));
    }

    #[test]
    fn seconds_lived_and_remaining() {
        let dob = date(2000, 1, 1);
        let now = dob.and_hms_opt(1, 0, 0).unwrap();
        assert_eq!(seconds_lived(dob, now), 3600);

        assert_eq!(seconds_remaining(10_000, 4_000), 6_000);
        assert_eq!(seconds_remaining(10_000, 12_000), 0);
    }

    #[test]
    fn age_breakdown_borrows_days_and_months() {
        // One day short of a birthday borrows from May (31 days).
        let age = AgeBreakdown::between(date(1992, 6, 14), date(2024, 6, 13));
        assert_eq!(
            age,
            AgeBreakdown {
                years: 31,
                months: 11,
                days: 30
            }
        );

        let exact = AgeBreakdown::between(date(1992, 6, 14), date(2024, 6, 14));
        assert_eq!(
            exact,
            AgeBreakdown {
                years: 32,
                months: 0,
                days: 0
            }
        );
    }

    #[test]
    fn age_breakdown_handles_leap_day_birth() {
        let age = AgeBreakdown::between(date(2000, 2, 29), date(2001, 3, 1));
        assert_eq!(
            age,
            AgeBreakdown {
                years: 1,
                months: 0,
                days: 0
            }
        );
    }

    #[test]
    fn age_breakdown_display_pluralizes() {
        let one = AgeBreakdown {
            years: 1,
            months: 1,
            days: 1,
        };
        assert_eq!(one.to_string(), "1 year, 1 month, 1 day");

        let many = AgeBreakdown {
            years: 24,
            months: 0,
            days: 2,
        };
        assert_eq!(many.to_string(), "24 years, 0 months, 2 days");
    }
}
