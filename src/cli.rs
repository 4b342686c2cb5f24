use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Parser, Debug)]
#[command(
    name = "workout-calendar",
    about = "Browse workouts by month and day from a fixture bundle (dir or ZIP)"
)]
pub struct Cli {
    /// Directory or `.zip` holding `list_workouts.json`, `metadata.json` and
    /// `diagram_data.json`.
    #[arg(
        long,
        value_name = "PATH",
        env = "WORKOUT_CALENDAR_DATA",
        default_value = DEFAULT_DATA_DIR,
        global = true
    )]
    pub data: PathBuf,

    /// Use generated workouts around today instead of a bundle.
    #[arg(long, global = true)]
    pub mock: bool,

    /// Artificial delay for every mock fetch, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 0, global = true)]
    pub latency_ms: u64,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Month grid with workout markers.
    Month {
        /// `YYYY-MM`; defaults to the current month.
        #[arg(value_name = "YYYY-MM", value_parser = parse_month)]
        month: Option<NaiveDate>,
    },

    /// Workouts that started on one day.
    Day {
        #[arg(value_name = "YYYY-MM-DD", value_parser = parse_day)]
        date: NaiveDate,
    },

    /// Metadata, weather and heart-rate summary of one workout.
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },
}

/// First day of the month named by `YYYY-MM`.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .with_context(|| format!("expected YYYY-MM, got {s:?}"))
}

pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("expected YYYY-MM-DD, got {s:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2025-11").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 1).unwrap()
        );
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("11/2025").is_err());
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("2025-11-25").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 25).unwrap()
        );
        assert!(parse_day("2025-02-30").is_err());
    }

    #[test]
    fn test_cli_shape() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show_with_mock() {
        let cli = Cli::try_parse_from([
            "workout-calendar",
            "--mock",
            "--latency-ms",
            "50",
            "show",
            "mock-1",
        ])
        .unwrap();
        assert!(cli.mock);
        assert_eq!(cli.latency_ms, 50);
        assert!(matches!(cli.cmd, Cmd::Show { ref id } if id == "mock-1"));
    }

    #[test]
    fn test_parse_month_default() {
        let cli = Cli::try_parse_from(["workout-calendar", "month"]).unwrap();
        assert!(matches!(cli.cmd, Cmd::Month { month: None }));
    }
}
