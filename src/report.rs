//! # ASCII Status Rendering
//!
//! This module renders a [`DailySummary`] to the terminal: a progress bar
//! of consumption against the daily goal with a marker at the current
//! ideal-pace position, plus the numbers behind it and the pending reminder
//! if one is scheduled.
//!
//! Rendering is deliberately dumb — it draws whatever snapshot it is given
//! and never recomputes planner state.

use crate::planner::DailySummary;

/// Width of the progress bar in characters.
const BAR_WIDTH: usize = 40;

/// Format a millilitre amount, switching to litres from 1000 ml up.
fn format_volume(ml: i32) -> String {
    if ml.abs() >= 1000 {
        let litres = ml as f32 / 1000.0;
        if (litres * 10.0).fract() == 0.0 {
            format!("{:.1} L", litres)
        } else {
            format!("{:.2} L", litres)
        }
    } else {
        format!("{} ml", ml)
    }
}

/// Format a consumed/goal ratio as a whole percentage.
fn format_ratio(ratio: f32) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Format a minute count as hours and minutes, e.g. "2h 18m".
fn format_minutes(minutes: i32) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

/// Build the progress bar row: consumed volume as fill, the ideal-pace
/// position as a marker.
///
/// Both positions clamp into the bar, so over-consumption or out-of-window
/// times never index past the end.
fn progress_bar(summary: &DailySummary) -> String {
    let goal = summary.daily_plan_ml.max(1) as f32;

    let fill_cells = ((summary.consumed_ml as f32 / goal) * BAR_WIDTH as f32) as usize;
    let fill_cells = fill_cells.min(BAR_WIDTH);

    let ideal_ml = summary.consumed_ml + summary.deficit_ml;
    let ideal_cell = ((ideal_ml as f32 / goal) * BAR_WIDTH as f32) as usize;
    let ideal_cell = ideal_cell.min(BAR_WIDTH.saturating_sub(1));

    let mut bar: Vec<char> = Vec::with_capacity(BAR_WIDTH);
    for i in 0..BAR_WIDTH {
        if i < fill_cells {
            bar.push('#');
        } else {
            bar.push('.');
        }
    }
    // Pace marker overlays the fill when behind, the gap when ahead
    if summary.deficit_ml > 0 {
        bar[ideal_cell] = '|';
    }

    format!("[{}]", bar.into_iter().collect::<String>())
}

/// Human-readable position of `now` relative to the plan window.
fn window_phase(summary: &DailySummary) -> &'static str {
    if summary.range_minutes <= 0 {
        "no plan window configured"
    } else if summary.elapsed_minutes < 0 {
        "window not open yet"
    } else if summary.elapsed_minutes > summary.range_minutes {
        "window closed for today"
    } else {
        "window open"
    }
}

/// Render the full status report to stdout.
pub fn draw_ascii(summary: &DailySummary, pending_reminder_minutes: Option<i32>) {
    let window = summary.window;
    println!(
        "Plan window  {:02}:{:02} - {:02}:{:02}  ({})",
        window.from.hour,
        window.from.minute,
        window.to.hour,
        window.to.minute,
        window_phase(summary)
    );
    println!(
        "Consumed     {} of {}  ({})",
        format_volume(summary.consumed_ml),
        format_volume(summary.daily_plan_ml),
        format_ratio(summary.consumed_plan_ratio)
    );
    println!("{}", progress_bar(summary));

    if summary.deficit_ml > 0 {
        println!("Deficit      {} behind pace", format_volume(summary.deficit_ml));
    } else {
        println!("Deficit      none, on pace");
    }

    match pending_reminder_minutes {
        Some(0) => println!("Reminder     due now"),
        Some(minutes) => println!("Reminder     in {}", format_minutes(minutes)),
        None => println!("Reminder     none scheduled"),
    }
}
