use crate::errors::DataError;
use crate::fixtures::FixtureProvider;
use crate::index::workouts_on_day;
use crate::mock::MockProvider;
use crate::types::{DiagramDataPoint, Workout, WorkoutMetadata};
use chrono::NaiveDate;
use std::future::Future;

/// Source of workouts, metadata and time series.
///
/// `Ok(None)` from the per-workout fetches means the document exists but has
/// no entry for that id; a missing or malformed document is an `Err`.
pub trait DataProvider: Send + Sync {
    fn fetch_all_workouts(&self) -> impl Future<Output = Result<Vec<Workout>, DataError>> + Send;

    /// Workouts that started on `day`, in list order.
    fn fetch_workouts(
        &self,
        day: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Workout>, DataError>> + Send {
        async move {
            let all = self.fetch_all_workouts().await?;
            Ok(workouts_on_day(&all, day).into_iter().cloned().collect())
        }
    }

    fn fetch_metadata(
        &self,
        workout_id: &str,
    ) -> impl Future<Output = Result<Option<WorkoutMetadata>, DataError>> + Send;

    fn fetch_diagram_data(
        &self,
        workout_id: &str,
    ) -> impl Future<Output = Result<Option<Vec<DiagramDataPoint>>, DataError>> + Send;
}

/// Either provider, picked at startup.
#[derive(Debug)]
pub enum AnyProvider {
    Fixture(FixtureProvider),
    Mock(MockProvider),
}

impl DataProvider for AnyProvider {
    async fn fetch_all_workouts(&self) -> Result<Vec<Workout>, DataError> {
        match self {
            Self::Fixture(p) => p.fetch_all_workouts().await,
            Self::Mock(p) => p.fetch_all_workouts().await,
        }
    }

    async fn fetch_workouts(&self, day: NaiveDate) -> Result<Vec<Workout>, DataError> {
        match self {
            Self::Fixture(p) => p.fetch_workouts(day).await,
            Self::Mock(p) => p.fetch_workouts(day).await,
        }
    }

    async fn fetch_metadata(&self, workout_id: &str) -> Result<Option<WorkoutMetadata>, DataError> {
        match self {
            Self::Fixture(p) => p.fetch_metadata(workout_id).await,
            Self::Mock(p) => p.fetch_metadata(workout_id).await,
        }
    }

    async fn fetch_diagram_data(
        &self,
        workout_id: &str,
    ) -> Result<Option<Vec<DiagramDataPoint>>, DataError> {
        match self {
            Self::Fixture(p) => p.fetch_diagram_data(workout_id).await,
            Self::Mock(p) => p.fetch_diagram_data(workout_id).await,
        }
    }
}

impl From<FixtureProvider> for AnyProvider {
    fn from(p: FixtureProvider) -> Self {
        Self::Fixture(p)
    }
}

impl From<MockProvider> for AnyProvider {
    fn from(p: MockProvider) -> Self {
        Self::Mock(p)
    }
}
