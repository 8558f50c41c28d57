//! `roster` CLI — inspect a roster snapshot from the command line.
//!
//! A snapshot is a JSON object `{"shifts": [...], "events": [...]}`. Every
//! subcommand prints its result as pretty JSON on stdout.
//!
//! ## Usage
//!
//! ```sh
//! # Status of one profile at an instant
//! roster -i roster.json --tz Australia/Sydney status --profile P --at 2026-03-09T10:15:00+11:00
//!
//! # Lane layout of one profile's events on a day
//! roster -i roster.json layout --profile P --date 2026-03-09
//!
//! # Next status change and the visible hour window for a day
//! cat roster.json | roster next-change --date 2026-03-09 --now 2026-03-09T08:00:00+11:00
//! roster -i roster.json --config calendar.json window --date 2026-03-09
//!
//! # Shift occurrences over a range
//! roster -i roster.json week --profile P --from 2026-03-09 --to 2026-03-15
//! ```
//!
//! Set `RUST_LOG=debug` to see skipped records and computed values on stderr.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use roster_engine::zone;
use roster_engine::{
    CalendarConfig, Event, EventsByProfile, Interval, ShiftInterval, ShiftsByProfile,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster", version, about = "Inspect staff roster snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Snapshot JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Display timezone (IANA name); unknown names fall back to the configured default
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Calendar configuration JSON file
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Status of a profile at an instant
    Status {
        #[arg(long)]
        profile: String,
        /// RFC 3339 instant (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Overlapping events, per profile
    Conflicts {
        /// Only this profile's events
        #[arg(long)]
        profile: Option<String>,
    },
    /// Lane layout of events
    Layout {
        /// Only this profile's events
        #[arg(long)]
        profile: Option<String>,
        /// Only events overlapping this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Next instant at which anyone's status changes
    NextChange {
        #[arg(long)]
        date: String,
        /// RFC 3339 instant (defaults to now)
        #[arg(long)]
        now: Option<String>,
    },
    /// Visible hour window for a day view
    Window {
        #[arg(long)]
        date: String,
    },
    /// Shift occurrences of a profile between two dates (inclusive)
    Week {
        #[arg(long)]
        profile: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
}

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    shifts: Vec<ShiftInterval>,
    #[serde(default)]
    events: Vec<Event>,
}

impl Snapshot {
    fn shifts_by_profile(&self) -> ShiftsByProfile {
        roster_engine::group_by_profile(&self.shifts)
    }

    fn events_by_profile(&self) -> EventsByProfile {
        roster_engine::group_by_profile(&self.events)
    }

    fn events_of(&self, profile: Option<&str>) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| profile.is_none_or(|p| e.profile_id == p))
            .cloned()
            .collect()
    }
}

#[derive(Serialize)]
struct NextChangeOutput {
    next_change: Option<DateTime<Utc>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();

    let config = load_config(cli.config.as_deref())?;
    let tz = config.resolve_zone(cli.tz.as_deref());
    let snapshot: Snapshot = serde_json::from_str(&read_input(cli.input.as_deref())?)
        .context("Failed to parse roster snapshot JSON")?;

    let output = match cli.command {
        Commands::Status { profile, at } => {
            let at = parse_instant_or_now(at.as_deref())?;
            let info = roster_engine::compute_status(
                &profile,
                at,
                tz,
                &snapshot.shifts,
                &snapshot.events,
            );
            serde_json::to_string_pretty(&info)?
        }
        Commands::Conflicts { profile } => {
            let events = snapshot.events_of(profile.as_deref());
            serde_json::to_string_pretty(&roster_engine::find_conflicts(&events))?
        }
        Commands::Layout { profile, date } => {
            let mut events = snapshot.events_of(profile.as_deref());
            if let Some(date) = date.as_deref() {
                let day = zone::day_bounds(parse_date(date)?, tz)
                    .context("Failed to compute day bounds")?;
                events.retain(|e| e.interval().overlaps(&day));
            }
            let layout: std::collections::BTreeMap<_, _> =
                roster_engine::layout_events(&events).into_iter().collect();
            serde_json::to_string_pretty(&layout)?
        }
        Commands::NextChange { date, now } => {
            let next = roster_engine::next_change(
                parse_date(&date)?,
                &snapshot.shifts_by_profile(),
                &snapshot.events_by_profile(),
                tz,
                parse_instant_or_now(now.as_deref())?,
            );
            serde_json::to_string_pretty(&NextChangeOutput { next_change: next })?
        }
        Commands::Window { date } => {
            let window = roster_engine::compute_day_window(
                parse_date(&date)?,
                &snapshot.shifts_by_profile(),
                &snapshot.events_by_profile(),
                tz,
                &config,
            );
            serde_json::to_string_pretty(&window)?
        }
        Commands::Week { profile, from, to } => {
            let (from, to) = (parse_date(&from)?, parse_date(&to)?);
            let mut occurrences: Vec<Interval> = Vec::new();
            for shift in snapshot.shifts.iter().filter(|s| s.profile_id == profile) {
                occurrences.extend(
                    roster_engine::shift_occurrences(shift, from, to, tz)
                        .with_context(|| format!("Failed to expand shift for '{}'", profile))?,
                );
            }
            occurrences.sort_by_key(|i| i.start);
            serde_json::to_string_pretty(&occurrences)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<CalendarConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            CalendarConfig::from_json(&json)
                .with_context(|| format!("Failed to load config file: {}", path))
        }
        None => Ok(CalendarConfig::default()),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

fn parse_instant_or_now(s: Option<&str>) -> Result<DateTime<Utc>> {
    match s {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid instant '{}', expected RFC 3339", s)),
        None => Ok(Utc::now()),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
