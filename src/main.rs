mod cli;
mod expectancy;
mod logging;
mod model;
mod render;
mod svg;
mod validate;

use std::fs;
use std::io::{self, Write};
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use crate::cli::{Cli, Command, RenderArgs, SecondsArgs};
use crate::expectancy::WorldBankClient;
use crate::model::{LifeCalendar, Unit, seconds_lived, seconds_remaining};
use crate::svg::Theme;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Render(args) => render_cmd(args).await,
        Command::Seconds(args) => seconds_cmd(args).await,
    }
}

/// Validate, fetch, compute, draw. Validation runs first: a bad birth date
/// or event aborts before any network call.
async fn render_cmd(args: RenderArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let dob = validate::validate_dob(&args.dob, today)?;
    let events = args
        .events
        .iter()
        .map(|raw| validate::parse_event(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let client = WorldBankClient::new();
    let expectancy = client.life_expectancy(&args.country).await;

    let cal = LifeCalendar::new(dob, Unit::from_arg(&args.unit), expectancy).with_events(events);

    let mut stdout = io::stdout().lock();
    render::write_calendar(&mut stdout, &cal, today)?;

    if let Some(path) = &args.svg {
        let doc = svg::render_svg(&cal, today, Theme::from_arg(&args.theme));
        fs::write(path, doc).with_context(|| format!("writing {}", path.display()))?;
        writeln!(stdout, "Wrote {}", path.display())?;
    }

    Ok(())
}

async fn seconds_cmd(args: SecondsArgs) -> Result<()> {
    let now = Local::now().naive_local();
    let dob = validate::validate_dob(&args.dob, now.date())?;

    let client = WorldBankClient::new();
    let expectancy = client.life_expectancy(&args.country).await;
    let total = LifeCalendar::new(dob, Unit::Weeks, expectancy).total_seconds();

    let line = |now| {
        let lived = seconds_lived(dob, now);
        let value = if args.remaining {
            seconds_remaining(total, lived)
        } else {
            lived
        };
        render::seconds_line(value, args.remaining)
    };

    if args.watch {
        // One ticker per invocation, dropped on exit; runs until interrupted.
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        loop {
            ticker.tick().await;
            print!("\r{}", line(Local::now().naive_local()));
            io::stdout().flush()?;
        }
    }

    println!("{}", line(now));
    Ok(())
}
