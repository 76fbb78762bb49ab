mod geo;
mod providers;
mod qibla;
mod schedule;
mod store;
mod web;

use clap::{Parser, Subcommand};
use chrono::{NaiveDate, Utc};
use std::process::ExitCode;

use crate::geo::Coordinates;
use crate::qibla::qibla_bearing_deg;
use crate::schedule::{civil_date_at, compute_progress, compute_window, DaySet, Method, Timetable};

#[derive(Parser)]
#[command(name = "salat-o-mat")]
#[command(about = "Prayer schedule and qibla companion")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve { config: String },
    /// Print the day's prayer timetable for a "lat,lon" coordinate
    Timetable {
        coordinates: String,
        /// Calculation method id, e.g. MuslimWorldLeague, Egyptian, Karachi
        #[arg(long)]
        method: Option<String>,
        /// Civil date (YYYY-MM-DD), default today at the location
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print the qibla bearing for a "lat,lon" coordinate
    Qibla { coordinates: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config).await,
        Commands::Timetable {
            coordinates,
            method,
            date,
        } => timetable(&coordinates, method.as_deref(), date),
        Commands::Qibla { coordinates } => qibla(&coordinates),
    }
}

async fn serve(path: &str) -> ExitCode {
    let config = match web::Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_coordinates(raw: &str) -> Option<Coordinates> {
    let coords = Coordinates::from_coordinates(raw);
    if coords.is_none() {
        eprintln!("Invalid coordinates (expected \"lat,lon\"): {}", raw);
    }
    coords
}

fn timetable(raw: &str, method: Option<&str>, date: Option<NaiveDate>) -> ExitCode {
    let Some(coords) = parse_coordinates(raw) else {
        return ExitCode::FAILURE;
    };
    let method = method.map(Method::from_id).unwrap_or_default();
    let now = Utc::now();
    let date = date.unwrap_or_else(|| civil_date_at(coords, now));

    let table = match Timetable::compute(coords, date, method) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Prayer times for {} at {} ({})", date, raw, method);
    for (prayer, time) in table.instants() {
        println!("  {:<8} {}", prayer.to_string(), time.format("%H:%M UTC"));
    }

    if let Ok(days) = DaySet::compute(coords, now, method) {
        let window = compute_window(&days, now);
        let progress = compute_progress(&window, now);
        match window.next {
            Some(next) => println!("Next: {} in {}", next, progress.countdown),
            None => println!("Next: fajr (tomorrow) in {}", progress.countdown),
        }
    }
    ExitCode::SUCCESS
}

fn qibla(raw: &str) -> ExitCode {
    let Some(coords) = parse_coordinates(raw) else {
        return ExitCode::FAILURE;
    };
    println!("Qibla bearing from {}: {:.1}°", raw, qibla_bearing_deg(coords));
    ExitCode::SUCCESS
}
