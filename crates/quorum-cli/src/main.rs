//! `quorum` CLI — compute common free windows from availability data.
//!
//! ## Usage
//!
//! ```sh
//! # Compute windows where at least 3 participants are free (stdin → stdout)
//! quorum compute --quorum 3 < event.json
//!
//! # Compute from file to file, overriding the event's required duration
//! quorum compute -i event.json -o windows.json --quorum 2 --duration 3h30m
//!
//! # Bridge dips below quorum of up to 5 minutes
//! quorum compute -i event.json --quorum 2 --merge-gap 5
//!
//! # Human-readable output
//! quorum compute -i event.json --quorum 2 --pretty
//!
//! # Project weekly patterns into concrete slots for a date range
//! quorum project -i patterns.json --from 2026-02-16 --until 2026-03-02
//!
//! # Summarize an event's collected availability
//! quorum stats -i event.json
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use quorum_engine::{
    compute, project_patterns, CommonWindow, Event, GapPolicy, MergePolicy, WeeklyPattern,
};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "quorum",
    version,
    about = "Common free windows from participant availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute common free windows for an event
    Compute {
        /// Input event JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Minimum number of participants that must be simultaneously free
        #[arg(short, long)]
        quorum: usize,
        /// Override the event's required duration (e.g. "3h30m", "4h", "90m")
        #[arg(short, long)]
        duration: Option<String>,
        /// Bridge dips below quorum of up to this many minutes when the
        /// same participants come back
        #[arg(long)]
        merge_gap: Option<i64>,
        /// Print a human-readable table instead of JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Project weekly availability patterns into concrete UTC slots
    Project {
        /// Input patterns JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// First local date of the projection range (inclusive)
        #[arg(long)]
        from: NaiveDate,
        /// Last local date of the projection range (exclusive)
        #[arg(long)]
        until: NaiveDate,
        /// What to do with slots in a DST spring-forward gap: "shift" or "skip"
        #[arg(long, default_value = "shift")]
        gap_policy: String,
    },
    /// Summarize an event's collected availability per participant
    Stats {
        /// Input event JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            input,
            output,
            quorum,
            duration,
            merge_gap,
            pretty,
        } => {
            let raw = read_input(input.as_deref())?;
            let mut event: Event =
                serde_json::from_str(&raw).context("Failed to parse event JSON")?;

            if let Some(raw) = duration {
                event.required_duration_minutes = parse_duration_minutes(&raw)?;
            }

            let policy = match merge_gap {
                Some(max_gap_minutes) => MergePolicy::BridgeGapsUpTo { max_gap_minutes },
                None => MergePolicy::Separate,
            };

            let windows =
                compute(&event, quorum, policy).context("Failed to compute common windows")?;

            let rendered = if pretty {
                render_windows(&event, &windows)
            } else {
                serde_json::to_string_pretty(&windows)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Project {
            input,
            output,
            from,
            until,
            gap_policy,
        } => {
            let raw = read_input(input.as_deref())?;
            let patterns: Vec<WeeklyPattern> =
                serde_json::from_str(&raw).context("Failed to parse patterns JSON")?;

            let policy = match gap_policy.as_str() {
                "shift" => GapPolicy::ShiftForward,
                "skip" => GapPolicy::Skip,
                other => anyhow::bail!(
                    "Unknown gap policy: '{}'. Available policies: shift, skip",
                    other
                ),
            };

            let slots = project_patterns(&patterns, from, until, policy)
                .context("Failed to project weekly patterns")?;

            let json = serde_json::to_string_pretty(&slots)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Stats { input } => {
            let raw = read_input(input.as_deref())?;
            let event: Event = serde_json::from_str(&raw).context("Failed to parse event JSON")?;
            print!("{}", render_stats(&event));
        }
    }

    Ok(())
}

/// Parse a duration like "3h30m", "4h", or "90m" into minutes.
///
/// This is the duration grammar of the chat command the event was created
/// with; zero or malformed durations are rejected here, before the engine
/// sees them.
fn parse_duration_minutes(raw: &str) -> Result<i64> {
    let text = raw.trim();
    let mut minutes: i64 = 0;
    let mut digits = String::new();
    let mut any_unit = false;

    for ch in text.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if ch == 'h' || ch == 'm' {
            if digits.is_empty() {
                anyhow::bail!("Invalid duration '{}': unit without a number", raw);
            }
            let value: i64 = digits.parse()?;
            minutes += if ch == 'h' { value * 60 } else { value };
            digits.clear();
            any_unit = true;
        } else {
            anyhow::bail!(
                "Invalid duration '{}': expected forms like 3h30m, 4h, 90m",
                raw
            );
        }
    }

    if !digits.is_empty() || !any_unit || minutes == 0 {
        anyhow::bail!(
            "Invalid duration '{}': expected forms like 3h30m, 4h, 90m",
            raw
        );
    }
    Ok(minutes)
}

fn render_windows(event: &Event, windows: &[CommonWindow]) -> String {
    let mut out = String::new();
    if windows.is_empty() {
        out.push_str(&format!(
            "No common window of {} min found for '{}'.\n",
            event.required_duration_minutes, event.event_id
        ));
        return out;
    }

    out.push_str(&format!(
        "{} window(s) for '{}':\n",
        windows.len(),
        event.event_id
    ));
    for w in windows {
        let names: Vec<&str> = w.participants.iter().map(|p| p.as_str()).collect();
        out.push_str(&format!(
            "  {} – {} UTC  ({} min)  {}\n",
            w.start.format("%Y-%m-%d %H:%M"),
            w.end.format("%Y-%m-%d %H:%M"),
            w.duration_minutes,
            names.join(", ")
        ));
    }
    out
}

fn render_stats(event: &Event) -> String {
    let grouped = event.slots_by_participant();
    let responded = grouped.len();

    let mut out = String::new();
    out.push_str(&format!("Event:         {}\n", event.event_id));
    out.push_str(&format!(
        "Duration:      {} min required\n",
        event.required_duration_minutes
    ));
    out.push_str(&format!(
        "Participants:  {} ({} responded)\n",
        event.participants.len(),
        responded
    ));
    match event.span_minutes() {
        Some(span) => out.push_str(&format!("Slot span:     {} min\n", span)),
        None => out.push_str("Slot span:     no slots collected\n"),
    }

    for participant in &event.participants {
        match grouped.get(participant.as_str()) {
            Some(slots) => {
                let total: i64 = slots.iter().map(|s| s.duration_minutes()).sum();
                out.push_str(&format!(
                    "  {:<12} {} slot(s), {} min free\n",
                    participant,
                    slots.len(),
                    total
                ));
            }
            None => {
                out.push_str(&format!("  {:<12} no response\n", participant));
            }
        }
    }
    out
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
