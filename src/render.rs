//! Plain-text output for the CLI.

use crate::calendar::{DayCell, MonthView, is_today_at};
use crate::provider::DataProvider;
use crate::state::WorkoutDetailState;
use crate::types::{ActivityType, Workout};
use chrono::{Datelike, NaiveDate};

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Activity letters shown per day; busier days are cut to the first ones.
const MAX_ICONS: usize = 3;

/// Day number, today marker, icons, one space of gutter.
const CELL_WIDTH: usize = 2 + 1 + MAX_ICONS + 1;

fn cell_text(cell: &DayCell, today: NaiveDate) -> String {
    let mark = if is_today_at(cell.date, today) { '*' } else { ' ' };
    let icons: String = cell
        .activity_types
        .iter()
        .take(MAX_ICONS)
        .map(|t| t.icon())
        .collect();
    format!("{:>2}{mark}{icons}", cell.date.day())
}

fn pad(text: &str) -> String {
    format!("{text:<width$}", width = CELL_WIDTH)
}

/// Title, weekday header, one line per week, then the icon legend.
///
/// Today is starred; each day shows a letter per activity type that started on
/// it, at most three.
pub fn month_grid(view: &MonthView, today: NaiveDate) -> String {
    let mut lines = vec![view.title()];

    let header: String = WEEKDAYS.iter().map(|d| pad(d)).collect();
    lines.push(header.trim_end().to_string());

    for row in view.rows() {
        let line: String = row
            .iter()
            .map(|c| pad(&c.map(|cell| cell_text(cell, today)).unwrap_or_default()))
            .collect();
        lines.push(line.trim_end().to_string());
    }

    let legend: Vec<String> = ActivityType::ALL
        .iter()
        .map(|t| format!("{}={}", t.icon(), t.display_name()))
        .collect();
    lines.push(String::new());
    lines.push(legend.join("  "));
    lines.join("\n")
}

/// One line per workout: time, id, activity.
pub fn day_listing(date: NaiveDate, workouts: &[Workout]) -> String {
    let mut lines = vec![date.format("%-d %B %Y").to_string()];
    if workouts.is_empty() {
        lines.push("no workouts".to_string());
    }
    lines.extend(workouts.iter().map(|w| {
        format!(
            "{}\t{}\t{}",
            w.time_string(),
            w.id,
            w.activity_type.display_name()
        )
    }));
    lines.join("\n")
}

pub fn workout_detail<P: DataProvider>(detail: &WorkoutDetailState<P>) -> String {
    let mut lines = Vec::new();
    if let Some(w) = detail.workout() {
        lines.push(format!("{} ({})", w.activity_type.display_name(), w.id));
        lines.push(detail.formatted_date());
    }

    match detail.metadata() {
        Some(m) => {
            lines.push(format!("distance\t{}", m.formatted_distance()));
            lines.push(format!("duration\t{}", m.formatted_duration()));
            lines.push(format!("temperature\t{}", m.formatted_temperature()));
            lines.push(format!("humidity\t{}", m.formatted_humidity()));
            if let Some(c) = m.comment.as_deref()
                && !c.is_empty()
            {
                lines.push(format!("comment\t{c}"));
            }
        }
        None => lines.push("no metadata".to_string()),
    }

    match (detail.diagram_data(), detail.heart_rate_summary()) {
        (Some(points), Some(hr)) => {
            lines.push(format!("samples\t{}", points.len()));
            lines.push(format!(
                "heart rate\tavg {} / max {} / min {} bpm",
                hr.average, hr.max, hr.min
            ));
            if let Some(speed) = detail.average_speed() {
                lines.push(format!("avg speed\t{speed:.1} km/h"));
            }
        }
        _ => lines.push("no heart-rate data".to_string()),
    }
    lines.join("\n")
}
