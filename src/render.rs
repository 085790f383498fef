//! Terminal renderer: header, cell grid, event legend, seconds line.
//!
//! Pure model-to-writer functions; the caller owns stdout. Cell precedence
//! matches the overlay order: event styling beats the last-cell marker,
//! which beats the plain lived/remaining split.

use std::io::{self, Write};

use chrono::NaiveDate;
use crossterm::style::Stylize;

use crate::model::{AgeBreakdown, CellKind, LifeCalendar};

/// Write the full calendar view for `cal` as of `today`.
pub fn write_calendar<W: Write>(
    out: &mut W,
    cal: &LifeCalendar,
    today: NaiveDate,
) -> io::Result<()> {
    let grid = cal.grid(today);
    let events = cal.event_map();
    let age = AgeBreakdown::between(cal.dob, today);

    writeln!(out, "Age: {}", age.to_string().bold())?;
    writeln!(out, "Life expectancy: {} years", cal.expectancy_years)?;
    writeln!(
        out,
        "Grid: {} of {} {} lived",
        grid.lived_cells(),
        grid.total_units,
        cal.unit.label()
    )?;
    writeln!(out)?;

    if grid.total_units > 0 {
        let columns = grid.columns as i64;
        for cell in grid.cells(&events) {
            let glyph = if cell.event.is_some() {
                "◆".yellow().bold()
            } else if cell.last {
                "✖".red().bold()
            } else {
                match cell.kind {
                    CellKind::Lived => "■".dark_green(),
                    CellKind::Remaining => "·".dark_grey(),
                }
            };
            write!(out, "{glyph}")?;
            if (cell.index + 1) % columns == 0 {
                writeln!(out)?;
            }
        }
        if grid.total_units % columns != 0 {
            writeln!(out)?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{} lived   {} remaining   {} event   {} last cell",
            "■".dark_green(),
            "·".dark_grey(),
            "◆".yellow().bold(),
            "✖".red().bold()
        )?;
    }

    let mut entries: Vec<_> = events.iter().collect();
    entries.sort_by_key(|(index, _)| **index);
    if !entries.is_empty() {
        writeln!(out)?;
        writeln!(out, "Events:")?;
        for (index, label) in entries {
            if *index < grid.total_units {
                writeln!(out, "  cell {index}: {label}")?;
            } else {
                writeln!(out, "  cell {index}: {label} (past the end of the grid)")?;
            }
        }
    }

    out.flush()
}

/// One line of the seconds counter, styled for the chosen mode.
pub fn seconds_line(value: i64, remaining: bool) -> String {
    let count = format_thousands(value);
    if remaining {
        format!("Seconds left: {}", count.red().bold())
    } else {
        format!("Seconds lived: {}", count.green().bold())
    }
}

/// Group digits with commas: 8766 days is 757,382,400 seconds.
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut groups = Vec::new();
    let mut end = digits.len();
    while end > 3 {
        groups.push(&digits[end - 3..end]);
        end -= 3;
    }
    groups.push(&digits[..end]);
    groups.reverse();
    let joined = groups.join(",");
    if n < 0 { format!("-{joined}") } else { joined }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LifeCalendar, LifeEvent, Unit};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rendered(cal: &LifeCalendar, today: NaiveDate) -> String {
        let mut out = Vec::new();
        write_calendar(&mut out, cal, today).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(986), "986");
        assert_eq!(format_thousands(1_234), "1,234");
        assert_eq!(format_thousands(757_382_400), "757,382,400");
        assert_eq!(format_thousands(-4_000), "-4,000");
    }

    #[test]
    fn calendar_output_lists_events_and_counts() {
        let cal = LifeCalendar::new(date(2000, 1, 1), Unit::Years, 70).with_events(vec![
            LifeEvent {
                date: date(2018, 9, 1),
                label: "Left home".into(),
            },
            LifeEvent {
                date: date(2090, 1, 1),
                label: "Unreachable".into(),
            },
        ]);
        let output = rendered(&cal, date(2024, 1, 1));

        assert!(output.contains("Age:"));
        assert!(output.contains("Life expectancy: 70 years"));
        assert!(output.contains("Grid: 24 of 69 years lived"));
        assert!(output.contains("cell 18: Left home"));
        assert!(output.contains("cell 90: Unreachable (past the end of the grid)"));
    }

    #[test]
    fn zero_cell_grid_renders_header_only() {
        let cal = LifeCalendar::new(date(2024, 1, 1), Unit::Years, 0);
        let output = rendered(&cal, date(2024, 1, 2));
        assert!(output.contains("Grid: 0 of 0 years lived"));
        assert!(!output.contains("lived   "));
    }

    #[test]
    fn seconds_line_names_the_mode() {
        assert!(seconds_line(757_382_400, false).contains("Seconds lived"));
        assert!(seconds_line(757_382_400, false).contains("757,382,400"));
        assert!(seconds_line(12, true).contains("Seconds left"));
    }
}
