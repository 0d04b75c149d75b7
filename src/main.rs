//! # Hydration Tracker Application Entry Point
//!
//! This binary crate wires the planner core to the filesystem and the
//! terminal: it loads the persisted day from the state file, applies the
//! requested command, re-evaluates the reminder schedule, stores the result,
//! and prints an ASCII status report.
//!
//! The `watch` command keeps the process alive, sleeping until the planner's
//! next scheduled reminder and nagging when a deficit is due.


use std::env;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use hydration_lib::clock::SystemClock;
use hydration_lib::config::Config;
use hydration_lib::planner::HydrationPlanner;
use hydration_lib::scheduler::PendingReminder;
use hydration_lib::storage::StateFile;
use hydration_lib::{report, TimeOfDay};

/// Parse a "HH:MM" argument into a time of day.
fn parse_time_of_day(arg: &str) -> anyhow::Result<TimeOfDay> {
    let (hour, minute) = arg
        .split_once(':')
        .with_context(|| format!("expected HH:MM, got '{}'", arg))?;
    let hour: i32 = hour
        .parse()
        .with_context(|| format!("invalid hour in '{}'", arg))?;
    let minute: i32 = minute
        .parse()
        .with_context(|| format!("invalid minute in '{}'", arg))?;
    if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
        bail!("time of day out of range: '{}'", arg);
    }
    Ok(TimeOfDay::new(hour, minute))
}

fn parse_ml(arg: &str) -> anyhow::Result<i32> {
    arg.parse()
        .with_context(|| format!("expected millilitres, got '{}'", arg))
}

fn print_usage() {
    eprintln!("Usage: hydration-tracker [COMMAND]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status                   Show today's progress (default)");
    eprintln!("  drink <ml>               Record a drink");
    eprintln!("  goal <ml>                Set the daily goal");
    eprintln!("  window <HH:MM> <HH:MM>   Set the tracked drinking window");
    eprintln!("  reset                    Start a new day from the configured profile");
    eprintln!("  watch                    Stay running and nag when behind pace");
}

/// Load the persisted day into a fresh planner.
fn load_planner(
    state_file: &StateFile,
) -> anyhow::Result<HydrationPlanner<SystemClock, PendingReminder>> {
    let state = state_file
        .load()
        .with_context(|| format!("loading state from {}", state_file.path().display()))?;
    let mut planner = HydrationPlanner::new(SystemClock, PendingReminder::new());
    planner.load_state(&state);
    Ok(planner)
}

/// Evaluate, print the report, and persist the day.
fn finish(
    planner: &mut HydrationPlanner<SystemClock, PendingReminder>,
    state_file: &StateFile,
) -> anyhow::Result<()> {
    planner.evaluate();
    report::draw_ascii(&planner.summary(), planner.scheduler().pending_minutes());
    state_file
        .store(&planner.to_state())
        .with_context(|| format!("storing state to {}", state_file.path().display()))?;
    Ok(())
}

/// Sleep-loop reminder delivery for the `watch` command.
///
/// Re-loads the state every iteration so drinks recorded from another
/// terminal are picked up, sleeps until the planner's next scheduled
/// reminder (capped so edits are noticed), and prints the nag when the
/// deficit is due.
fn watch(config: &Config, state_file: &StateFile) -> anyhow::Result<()> {
    let sleep_cap = config.tracker.watch_max_sleep_minutes.max(1);
    eprintln!(
        "Watching {} (checking at most every {} minutes, Ctrl+C to stop)",
        state_file.path().display(),
        sleep_cap
    );

    loop {
        let mut planner = load_planner(state_file)?;
        planner.evaluate();

        let sleep_minutes = match planner.scheduler_mut().take() {
            Some(0) => {
                // Deficit already at or past the threshold
                println!(
                    "Time to drink! You are {} ml behind pace.",
                    planner.deficit_ml()
                );
                sleep_cap
            }
            Some(minutes) => minutes.min(sleep_cap),
            // Window closed or no usable plan; check back later
            None => sleep_cap,
        };

        thread::sleep(Duration::from_secs(sleep_minutes as u64 * 60));
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = Config::load();
    let state_file = StateFile::new(&config.tracker.state_path);

    match args.first().map(String::as_str) {
        None | Some("status") => {
            let mut planner = load_planner(&state_file)?;
            planner.evaluate();
            report::draw_ascii(&planner.summary(), planner.scheduler().pending_minutes());
        }
        Some("drink") => {
            let ml = parse_ml(args.get(1).context("drink: missing <ml>")?)?;
            let mut planner = load_planner(&state_file)?;
            planner.drink_ml(ml);
            finish(&mut planner, &state_file)?;
        }
        Some("goal") => {
            let ml = parse_ml(args.get(1).context("goal: missing <ml>")?)?;
            let mut planner = load_planner(&state_file)?;
            planner.set_daily_plan_ml(ml);
            finish(&mut planner, &state_file)?;
        }
        Some("window") => {
            let from = parse_time_of_day(args.get(1).context("window: missing <from>")?)?;
            let to = parse_time_of_day(args.get(2).context("window: missing <to>")?)?;
            let mut planner = load_planner(&state_file)?;
            planner.set_plan_from(from.hour, from.minute);
            planner.set_plan_to(to.hour, to.minute);
            finish(&mut planner, &state_file)?;
        }
        Some("reset") => {
            let mut planner = load_planner(&state_file)?;
            planner.reset();
            println!(
                "Day closed with {} ml consumed ({} ml behind pace).",
                planner.prev_consumed_ml(),
                planner.prev_deficit_ml()
            );

            // Seed the fresh day from the configured profile
            let profile = &config.profile;
            planner.set_daily_plan_ml(profile.daily_plan_ml);
            planner.set_plan_from(profile.from_hour, profile.from_minute);
            planner.set_plan_to(profile.to_hour, profile.to_minute);
            finish(&mut planner, &state_file)?;
        }
        Some("watch") => {
            watch(&config, &state_file)?;
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }

    Ok(())
}
