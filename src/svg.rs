//! SVG renderer for the life calendar.
//!
//! Produces a self-contained document: a rounded background and one rect
//! per cell, laid out `columns` wide. Event and last cells carry `<title>`
//! tooltips, which most viewers surface on hover.

use chrono::NaiveDate;

use crate::model::{CellKind, LifeCalendar};

const CELL: i32 = 12;
const GAP: i32 = 2;
const PADDING: i32 = 15;

#[derive(Clone, Copy)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub lived: &'static str,
    pub remaining: &'static str,
    pub event: &'static str,
    pub last: &'static str,
}

impl Theme {
    /// Lossy conversion from user input; anything but "light" is dark.
    pub fn from_arg(arg: &str) -> Theme {
        match arg.trim().to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                lived: "#3fb950",
                remaining: "#30363d",
                event: "#ffa657",
                last: "#f85149",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                lived: "#2da44e",
                remaining: "#d0d7de",
                event: "#bf8700",
                last: "#cf222e",
            },
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the grid for `cal` as of `today` into an SVG document.
pub fn render_svg(cal: &LifeCalendar, today: NaiveDate, theme: Theme) -> String {
    let colors = theme.colors();
    let grid = cal.grid(today);
    let events = cal.event_map();

    let columns = grid.columns as i32;
    let rows = (grid.total_units as i32 + columns - 1) / columns;
    let width = PADDING * 2 + columns * (CELL + GAP) - GAP;
    let height = PADDING * 2 + (rows * (CELL + GAP) - GAP).max(0);

    let mut cells = String::new();
    for cell in grid.cells(&events) {
        let col = cell.index as i32 % columns;
        let row = cell.index as i32 / columns;
        let x = PADDING + col * (CELL + GAP);
        let y = PADDING + row * (CELL + GAP);

        let fill = if cell.event.is_some() {
            colors.event
        } else if cell.last {
            colors.last
        } else {
            match cell.kind {
                CellKind::Lived => colors.lived,
                CellKind::Remaining => colors.remaining,
            }
        };

        let tooltip = match (cell.event, cell.last) {
            (Some(label), _) => Some(escape_xml(label)),
            (None, true) => Some("The last cell".to_string()),
            (None, false) => None,
        };

        match tooltip {
            Some(title) => cells.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{CELL}\" height=\"{CELL}\" rx=\"2\" fill=\"{fill}\"><title>{title}</title></rect>\n"
            )),
            None => cells.push_str(&format!(
                "<rect x=\"{x}\" y=\"{y}\" width=\"{CELL}\" height=\"{CELL}\" rx=\"2\" fill=\"{fill}\"/>\n"
            )),
        }
    }

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}px" height="{height}px">

<rect width="{width}px" height="{height}px" fill="{bg}" rx="15"/>

{cells}
</svg>
"#,
        bg = colors.bg,
    )
}
