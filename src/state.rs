//! Screen-level state: the calendar month, one day's workouts, one workout's
//! detail.
//!
//! Every load follows the same protocol. `is_loading` goes up, the provider is
//! awaited, success replaces the data and clears the last error, failure
//! records the error text and leaves the data as it was, and `is_loading`
//! comes down last whatever happened. Loads take `&mut self`, so one container
//! never has two in flight. Calling a load again is the retry.

use crate::calendar::{self, MonthView};
use crate::dlog;
use crate::errors::DataError;
use crate::index::WorkoutIndex;
use crate::provider::DataProvider;
use crate::stats::{self, HeartRateSummary};
use crate::types::{ActivityType, DiagramDataPoint, Workout, WorkoutMetadata};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug)]
pub struct CalendarState<P> {
    provider: Arc<P>,
    today: NaiveDate,
    current_date: NaiveDate,
    selected_date: NaiveDate,
    showing_day_events: bool,
    workouts: WorkoutIndex,
    is_loading: bool,
    error_message: Option<String>,
}

impl<P: DataProvider> CalendarState<P> {
    /// Starts on the month of `today`, with nothing loaded.
    pub fn new(provider: Arc<P>, today: NaiveDate) -> Self {
        Self {
            provider,
            today,
            current_date: today,
            selected_date: today,
            showing_day_events: false,
            workouts: WorkoutIndex::default(),
            is_loading: false,
            error_message: None,
        }
    }

    /// Display the month containing `anchor` instead.
    #[must_use]
    pub fn with_month(mut self, anchor: NaiveDate) -> Self {
        self.current_date = anchor;
        self
    }

    pub async fn load_workouts(&mut self) {
        self.is_loading = true;
        match self.provider.fetch_all_workouts().await {
            Ok(all) => {
                tracing::info!(workouts = all.len(), "calendar workouts loaded");
                self.workouts = WorkoutIndex::new(all);
                self.error_message = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading calendar workouts failed");
                self.error_message = Some(e.to_string());
            }
        }
        self.is_loading = false;
    }

    pub const fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    pub const fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub const fn showing_day_events(&self) -> bool {
        self.showing_day_events
    }

    pub const fn workouts(&self) -> &WorkoutIndex {
        &self.workouts
    }

    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn provider(&self) -> Arc<P> {
        Arc::clone(&self.provider)
    }

    pub fn month_title(&self) -> String {
        calendar::month_title(self.current_date)
    }

    pub fn month_view(&self) -> MonthView {
        MonthView::build(self.current_date, &self.workouts)
    }

    pub fn dates_in_month(&self) -> Vec<NaiveDate> {
        calendar::dates_in_month(self.current_date)
    }

    pub fn weekday_offset(&self) -> u32 {
        calendar::weekday_offset(self.current_date)
    }

    pub fn workouts_on_day(&self, day: NaiveDate) -> Vec<&Workout> {
        self.workouts.workouts_on_day(day)
    }

    pub fn has_workouts_on_day(&self, day: NaiveDate) -> bool {
        self.workouts.has_workouts_on_day(day)
    }

    pub fn activity_types_on_day(&self, day: NaiveDate) -> BTreeSet<ActivityType> {
        self.workouts.activity_types_on_day(day)
    }

    pub fn is_today(&self, day: NaiveDate) -> bool {
        calendar::is_today_at(day, self.today)
    }

    pub fn is_current_month(&self, day: NaiveDate) -> bool {
        calendar::is_same_month(day, self.current_date)
    }

    pub fn go_to_previous_month(&mut self) {
        self.current_date = calendar::previous_month(self.current_date);
    }

    pub fn go_to_next_month(&mut self) {
        self.current_date = calendar::next_month(self.current_date);
    }

    pub const fn go_to_today(&mut self) {
        self.current_date = self.today;
    }

    pub fn select_day(&mut self, day: NaiveDate) {
        dlog!(%day, "day selected");
        self.selected_date = day;
        self.showing_day_events = true;
    }

    pub const fn dismiss_day_events(&mut self) {
        self.showing_day_events = false;
    }

    /// Day listing for the selected date, sharing this calendar's provider.
    pub fn day_events(&self) -> DayEventsState<P> {
        DayEventsState::new(self.selected_date, self.provider())
    }
}

#[derive(Debug)]
pub struct DayEventsState<P> {
    provider: Arc<P>,
    date: NaiveDate,
    workouts: Vec<Workout>,
    is_loading: bool,
    error_message: Option<String>,
}

impl<P: DataProvider> DayEventsState<P> {
    pub const fn new(date: NaiveDate, provider: Arc<P>) -> Self {
        Self {
            provider,
            date,
            workouts: Vec::new(),
            is_loading: false,
            error_message: None,
        }
    }

    pub async fn load_workouts(&mut self) {
        self.is_loading = true;
        match self.provider.fetch_workouts(self.date).await {
            Ok(found) => {
                tracing::info!(date = %self.date, workouts = found.len(), "day workouts loaded");
                for w in &found {
                    dlog!(id = %w.id, time = %w.time_string(), kind = %w.activity_type, "workout");
                }
                self.workouts = found;
                self.error_message = None;
            }
            Err(e) => {
                tracing::warn!(date = %self.date, error = %e, "loading day workouts failed");
                self.error_message = Some(e.to_string());
            }
        }
        self.is_loading = false;
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn has_workouts(&self) -> bool {
        !self.workouts.is_empty()
    }

    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn formatted_date(&self) -> String {
        self.date.format("%-d %B %Y").to_string()
    }
}

type DetailData = (Option<Workout>, Option<WorkoutMetadata>, Option<Vec<DiagramDataPoint>>);

#[derive(Debug)]
pub struct WorkoutDetailState<P> {
    provider: Arc<P>,
    workout_id: String,
    workout: Option<Workout>,
    metadata: Option<WorkoutMetadata>,
    diagram_data: Option<Vec<DiagramDataPoint>>,
    is_loading: bool,
    error_message: Option<String>,
}

impl<P: DataProvider> WorkoutDetailState<P> {
    pub fn for_workout(workout: Workout, provider: Arc<P>) -> Self {
        let mut state = Self::for_id(workout.id.clone(), provider);
        state.workout = Some(workout);
        state
    }

    /// The workout itself is looked up from the full list on load.
    pub fn for_id(workout_id: impl Into<String>, provider: Arc<P>) -> Self {
        Self {
            provider,
            workout_id: workout_id.into(),
            workout: None,
            metadata: None,
            diagram_data: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub async fn load_data(&mut self) {
        self.is_loading = true;
        tracing::info!(workout_id = %self.workout_id, "loading workout detail");
        match self.fetch_all().await {
            Ok((workout, metadata, diagram_data)) => {
                if workout.is_some() {
                    self.workout = workout;
                }
                self.metadata = metadata;
                self.diagram_data = diagram_data;
                self.error_message = None;
            }
            Err(e) => {
                tracing::warn!(workout_id = %self.workout_id, error = %e, "loading workout detail failed");
                self.error_message = Some(e.to_string());
            }
        }
        self.is_loading = false;
    }

    async fn fetch_all(&self) -> Result<DetailData, DataError> {
        let workout = if self.workout.is_none() {
            let all = self.provider.fetch_all_workouts().await?;
            let found = WorkoutIndex::new(all).find(&self.workout_id).cloned();
            if found.is_none() {
                tracing::warn!(workout_id = %self.workout_id, "workout not in list");
            }
            found
        } else {
            None
        };

        let metadata = self.provider.fetch_metadata(&self.workout_id).await?;
        dlog!(present = metadata.is_some(), "metadata fetched");

        let diagram_data = self.provider.fetch_diagram_data(&self.workout_id).await?;
        dlog!(
            points = diagram_data.as_ref().map_or(0, Vec::len),
            "diagram data fetched"
        );

        Ok((workout, metadata, diagram_data))
    }

    pub fn workout_id(&self) -> &str {
        &self.workout_id
    }

    pub const fn workout(&self) -> Option<&Workout> {
        self.workout.as_ref()
    }

    pub const fn metadata(&self) -> Option<&WorkoutMetadata> {
        self.metadata.as_ref()
    }

    pub fn diagram_data(&self) -> Option<&[DiagramDataPoint]> {
        self.diagram_data.as_deref()
    }

    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// e.g. `25 November 2025, 09:30`; empty until the workout is known.
    pub fn formatted_date(&self) -> String {
        self.workout
            .as_ref()
            .map(|w| w.start.format("%-d %B %Y, %H:%M").to_string())
            .unwrap_or_default()
    }

    pub fn heart_rate_summary(&self) -> Option<HeartRateSummary> {
        self.diagram_data
            .as_deref()
            .and_then(stats::heart_rate_summary)
    }

    pub fn average_speed(&self) -> Option<f64> {
        self.diagram_data.as_deref().and_then(stats::average_speed)
    }
}
