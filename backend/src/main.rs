use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use appointment_calendar::domain::availability::generate_sample_availability;
use appointment_calendar::domain::ingestion::{decode_records, Ingested};
use appointment_calendar::domain::navigation::navigate;
use appointment_calendar::{CalendarConfig, CalendarService, RenderedCalendar};
use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{info, warn};
use serde::de::DeserializeOwned;
use shared::{
    AppointmentRecord, AvailabilityRecord, CalendarFocus, CalendarView, CalendarViewKind, DayGrid, MonthGrid,
    NavigationDirection, TimeSlotCell, WeekGrid,
};

/// Render a doctor's appointment calendar from JSON exports
#[derive(Parser, Debug)]
#[command(name = "appointment-calendar")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON array of appointment records
    #[arg(short, long)]
    appointments: Option<PathBuf>,

    /// JSON array of availability records
    #[arg(long)]
    availability: Option<PathBuf>,

    /// Generate weekday sample availability for this many days instead of reading a file
    #[arg(long, conflicts_with = "availability")]
    sample_availability: Option<u32>,

    /// Grid granularity: day, week or month
    #[arg(short, long, default_value = "month")]
    view: CalendarViewKind,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Navigation steps applied before rendering: previous or next (repeatable)
    #[arg(short, long)]
    navigate: Vec<NavigationDirection>,

    /// Path to a YAML calendar configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the grid as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CalendarConfig::load(path)?,
        None => CalendarConfig::default(),
    };
    let service = CalendarService::new(config)?;

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let appointments: Ingested<AppointmentRecord> = match &args.appointments {
        Some(path) => read_records(path)?,
        None => Ingested::default(),
    };
    let availability: Ingested<AvailabilityRecord> = match (&args.availability, args.sample_availability) {
        (Some(path), _) => read_records(path)?,
        (None, Some(days)) => Ingested {
            accepted: generate_sample_availability(today, days)?
                .iter()
                .map(|slot| slot.to_record())
                .collect(),
            rejected: Vec::new(),
        },
        (None, None) => Ingested::default(),
    };

    let mut focus = CalendarFocus::new(args.date.unwrap_or(today), args.view);
    for direction in &args.navigate {
        focus = navigate(&focus, *direction)?;
    }
    info!("Rendering {} view for {}", focus.view, focus.reference_date);

    let mut rendered = service.render(&focus, today, &appointments.accepted, &availability.accepted);
    rendered.rejected_appointments.extend(appointments.rejected);
    rendered.rejected_availability.extend(availability.rejected);
    report_rejections(&rendered);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rendered.view)?);
    } else {
        match &rendered.view {
            CalendarView::Month(grid) => print_month(grid),
            CalendarView::Week(grid) => print_week(grid),
            CalendarView::Day(grid) => print_day(grid),
        }
    }

    Ok(())
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Ingested<T>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    decode_records(&content).with_context(|| format!("{} is not a JSON array", path.display()))
}

fn report_rejections(rendered: &RenderedCalendar) {
    let skipped = rendered.rejected_appointments.len() + rendered.rejected_availability.len();
    if skipped > 0 {
        warn!("{} record(s) could not be placed on the calendar", skipped);
    }
}

fn print_month(grid: &MonthGrid) {
    println!("{}", grid.title);
    println!("{}", ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"].map(|d| format!("{:>5}", d)).join(""));

    for week in grid.cells.chunks(7) {
        let line: String = week
            .iter()
            .map(|cell| {
                let marker = if cell.is_today { "*" } else { " " };
                if cell.is_current_month {
                    format!("{:>4}{}", cell.day, marker)
                } else {
                    format!("{:>4}{}", format!("({})", cell.day), marker)
                }
            })
            .collect();
        println!("{}", line);
    }

    let busy_days: Vec<_> = grid
        .cells
        .iter()
        .filter(|cell| !cell.appointments.is_empty() || !cell.availability.is_empty())
        .collect();
    if busy_days.is_empty() {
        return;
    }

    println!();
    for cell in busy_days {
        println!("{}", cell.date);
        for appointment in &cell.appointments {
            println!("    {}", appointment.label);
        }
        for slot in &cell.availability {
            println!("    {}", slot.label);
        }
    }
}

fn print_week(grid: &WeekGrid) {
    println!("{}", grid.title);
    let header: String = grid.header.iter().map(|h| format!("{:>12}", h.label)).collect();
    println!("{:>6}{}", "", header);

    for row in &grid.rows {
        let cells: String = row.cells.iter().map(|cell| format!("{:>12}", summarize(cell))).collect();
        println!("{:>6}{}", row.label, cells);
    }
}

fn print_day(grid: &DayGrid) {
    println!("{}", grid.title);
    for row in &grid.rows {
        println!("{}  {}", row.time.format("%H:%M"), summarize(row));
    }
}

fn summarize(cell: &TimeSlotCell) -> String {
    match cell.appointments.as_slice() {
        [] if cell.has_availability => "available".to_string(),
        [] => "-".to_string(),
        [only] => only.patient_name.clone(),
        many => format!("{} appts", many.len()),
    }
}
