use crate::errors::DataError;
use crate::provider::DataProvider;
use crate::types::{ActivityType, DiagramDataPoint, Workout, WorkoutMetadata};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::time::Duration;

const SERIES_LEN: i32 = 20;

/// (days before today, activity, start hour, start minute)
const SCHEDULE: [(u64, ActivityType, u32, u32); 5] = [
    (0, ActivityType::Yoga, 7, 30),
    (1, ActivityType::WalkingRunning, 18, 0),
    (2, ActivityType::Cycling, 9, 15),
    (3, ActivityType::Strength, 19, 45),
    (5, ActivityType::Water, 12, 0),
];

/// Offline provider that makes its records up.
///
/// Every workout it serves also has metadata and a diagram series; unknown
/// ids yield `None`.
#[derive(Debug, Clone)]
pub struct MockProvider {
    workouts: Vec<Workout>,
    latency: Duration,
}

impl MockProvider {
    /// A handful of workouts spread over the days up to `today`.
    pub fn new(today: NaiveDate) -> Self {
        let workouts = SCHEDULE
            .iter()
            .enumerate()
            .map(|(i, &(back, kind, h, m))| {
                let day = today.checked_sub_days(Days::new(back)).unwrap_or(today);
                let time = NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
                Workout::new(format!("mock-{}", i + 1), kind, day.and_time(time))
            })
            .collect();
        Self::with_workouts(workouts)
    }

    pub const fn with_workouts(workouts: Vec<Workout>) -> Self {
        Self {
            workouts,
            latency: Duration::ZERO,
        }
    }

    /// Delay every fetch by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }
}

fn metadata_for(w: &Workout) -> WorkoutMetadata {
    WorkoutMetadata {
        workout_key: w.id.clone(),
        activity_type: w.activity_type,
        start: w.start,
        distance: 5000.0,
        duration: 1800.0,
        max_layer: 2,
        max_sub_layer: 4,
        avg_humidity: 65.0,
        avg_temp: 20.0,
        comment: Some(format!("Generated {} session", w.activity_type)),
        photo_before: None,
        photo_after: None,
        heart_rate_graph: None,
        activity_graph: None,
        map: None,
    }
}

/// Heart rate and speed climb for the first half of the series, then ease off.
fn series_for(start: NaiveDateTime) -> Vec<DiagramDataPoint> {
    (0..SERIES_LEN)
        .map(|i| {
            let effort = if i < SERIES_LEN / 2 { i } else { SERIES_LEN - i };
            DiagramDataPoint {
                time_numeric: i64::from(i),
                heart_rate: 80 + effort * 6,
                speed_kmh: 6.0 + f64::from(effort) * 0.5,
                distance_meters: i64::from(i) * 100,
                steps: i64::from(i) * 130,
                elevation: f64::from(i).mul_add(0.2, 45.0),
                latitude: f64::from(i).mul_add(0.0004, 55.7558),
                longitude: f64::from(i).mul_add(0.0007, 37.6173),
                temperature_celsius: 20.0,
                current_layer: 0,
                current_sub_layer: 0,
                current_timestamp: start + TimeDelta::minutes(i64::from(i)),
            }
        })
        .collect()
}

impl DataProvider for MockProvider {
    async fn fetch_all_workouts(&self) -> Result<Vec<Workout>, DataError> {
        self.simulate_latency().await;
        Ok(self.workouts.clone())
    }

    async fn fetch_metadata(&self, workout_id: &str) -> Result<Option<WorkoutMetadata>, DataError> {
        self.simulate_latency().await;
        Ok(self.find(workout_id).map(metadata_for))
    }

    async fn fetch_diagram_data(
        &self,
        workout_id: &str,
    ) -> Result<Option<Vec<DiagramDataPoint>>, DataError> {
        self.simulate_latency().await;
        Ok(self.find(workout_id).map(|w| series_for(w.start)))
    }
}
