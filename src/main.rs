#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use workout_calendar::cli::{self, Cmd};
use workout_calendar::fixtures::FixtureProvider;
use workout_calendar::mock::MockProvider;
use workout_calendar::provider::AnyProvider;
use workout_calendar::state::{CalendarState, DayEventsState, WorkoutDetailState};
use workout_calendar::{calendar, render, utils};

#[macro_use]
extern crate workout_calendar;

fn open_provider(cli: &cli::Cli, today: NaiveDate) -> Result<AnyProvider> {
    if cli.mock {
        dlog!(latency_ms = cli.latency_ms, %today, "mode=mock");
        let mock = MockProvider::new(today).with_latency(Duration::from_millis(cli.latency_ms));
        return Ok(mock.into());
    }

    let provider = FixtureProvider::open(&cli.data)
        .with_context(|| format!("opening workout data at {}", cli.data.display()))?;
    dlog!(root = %provider.root().display(), "mode=fixtures");
    Ok(provider.into())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let today = calendar::today();
    let provider = Arc::new(open_provider(&cli, today)?);

    match cli.cmd {
        Cmd::Month { month } => {
            let mut state = CalendarState::new(provider, today);
            if let Some(anchor) = month {
                state = state.with_month(anchor);
            }
            state.load_workouts().await;
            if let Some(msg) = state.error_message() {
                bail!("Could not load workouts: {msg}");
            }
            println!("{}", render::month_grid(&state.month_view(), state.today()));
            Ok(())
        }
        Cmd::Day { date } => {
            let mut state = DayEventsState::new(date, provider);
            state.load_workouts().await;
            if let Some(msg) = state.error_message() {
                bail!("Could not load workouts for {}: {msg}", state.formatted_date());
            }
            println!("{}", render::day_listing(state.date(), state.workouts()));
            Ok(())
        }
        Cmd::Show { id } => {
            let mut state = WorkoutDetailState::for_id(id, provider);
            state.load_data().await;
            if let Some(msg) = state.error_message() {
                bail!("Could not load workout {}: {msg}", state.workout_id());
            }
            if state.workout().is_none() && state.metadata().is_none() {
                bail!("No workout with id {}", state.workout_id());
            }
            println!("{}", render::workout_detail(&state));
            Ok(())
        }
    }
}
