use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use orrery_engine::{calendar_from_json, system_from_json, Body, Calendar, OrbitalTree};

const DEFAULT_SYSTEM: &str = include_str!("../data/helia.json");
const DEFAULT_CALENDAR: &str = include_str!("../data/meridian-calendar.json");

#[derive(Parser)]
#[command(name = "orrery", about = "Fantasy orrery engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Body positions at a point in time
    Positions {
        /// Ordinal day, possibly fractional
        time: f64,
        /// Path to a system JSON (defaults to the bundled sample)
        #[arg(long)]
        system: Option<PathBuf>,
    },
    /// Convert a calendar date to its day ordinal
    ToOrdinal {
        year: i64,
        month: String,
        day: i64,
        /// Path to a calendar JSON (defaults to the bundled sample)
        #[arg(long)]
        calendar: Option<PathBuf>,
    },
    /// Convert a day ordinal to a calendar date
    FromOrdinal {
        ordinal: i64,
        /// Path to a calendar JSON (defaults to the bundled sample)
        #[arg(long)]
        calendar: Option<PathBuf>,
    },
    /// Maximum orbital extent of a system
    Extent {
        /// Path to a system JSON (defaults to the bundled sample)
        #[arg(long)]
        system: Option<PathBuf>,
    },
}

fn load_system(path: Option<&PathBuf>) -> Result<OrbitalTree, Box<dyn std::error::Error>> {
    let json = match path {
        Some(path) => fs::read_to_string(path)?,
        None => String::from(DEFAULT_SYSTEM),
    };
    Ok(system_from_json(&json)?)
}

fn load_calendar(path: Option<&PathBuf>) -> Result<Calendar, Box<dyn std::error::Error>> {
    let json = match path {
        Some(path) => fs::read_to_string(path)?,
        None => String::from(DEFAULT_CALENDAR),
    };
    Ok(calendar_from_json(&json)?)
}

fn print_bodies(body: &Body, depth: usize) {
    println!(
        "{:indent$}{:<16} x={:12.3} y={:12.3} rot={:8.4}",
        "",
        body.name,
        body.position.x,
        body.position.y,
        body.rotation_angle,
        indent = depth * 2
    );
    for child in &body.children {
        print_bodies(child, depth + 1);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Positions { time, system } => {
            let mut tree = load_system(system.as_ref())?;
            tree.evaluate(time);
            print_bodies(tree.root(), 0);
        }
        Commands::ToOrdinal {
            year,
            month,
            day,
            calendar,
        } => {
            let calendar = load_calendar(calendar.as_ref())?;
            let date = calendar.date(year, &month, day);
            match calendar.date_to_number(&date) {
                Some(ordinal) => println!("{ordinal}"),
                None => {
                    eprintln!("invalid date: {year} {month} {day}");
                    std::process::exit(1);
                }
            }
        }
        Commands::FromOrdinal { ordinal, calendar } => {
            let calendar = load_calendar(calendar.as_ref())?;
            let date = calendar.number_to_date(ordinal);
            let month_name = date
                .month
                .and_then(|index| calendar.month(index))
                .map(|month| month.name().to_string())
                .unwrap_or_else(|| String::from("?"));
            println!("{} {} {}", date.year, month_name, date.day);
        }
        Commands::Extent { system } => {
            let tree = load_system(system.as_ref())?;
            println!("{}", tree.max_orbital_distance());
        }
    }
    Ok(())
}
