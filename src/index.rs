use crate::calendar::{CalendarDay, is_same_day};
use crate::types::{ActivityType, Workout};
use std::collections::BTreeSet;
use std::slice;

/// Every workout in `all` that started on the calendar day of `day`, in the
/// order of `all`. Nothing is de-duplicated.
pub fn workouts_on_day(all: &[Workout], day: impl CalendarDay) -> Vec<&Workout> {
    let day = day.calendar_day();
    all.iter().filter(|w| is_same_day(*w, day)).collect()
}

pub fn has_workouts_on_day(all: &[Workout], day: impl CalendarDay) -> bool {
    !workouts_on_day(all, day).is_empty()
}

pub fn activity_types_on_day(all: &[Workout], day: impl CalendarDay) -> BTreeSet<ActivityType> {
    workouts_on_day(all, day)
        .into_iter()
        .map(|w| w.activity_type)
        .collect()
}

/// Loaded workouts with per-day lookups.
///
/// Lookups are linear scans; a month grid asks at most 31 of them.
#[derive(Debug, Clone, Default)]
pub struct WorkoutIndex {
    workouts: Vec<Workout>,
}

impl WorkoutIndex {
    pub const fn new(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }

    pub fn workouts_on_day(&self, day: impl CalendarDay) -> Vec<&Workout> {
        workouts_on_day(&self.workouts, day)
    }

    pub fn has_workouts_on_day(&self, day: impl CalendarDay) -> bool {
        has_workouts_on_day(&self.workouts, day)
    }

    pub fn activity_types_on_day(&self, day: impl CalendarDay) -> BTreeSet<ActivityType> {
        activity_types_on_day(&self.workouts, day)
    }

    pub fn find(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn iter(&self) -> slice::Iter<'_, Workout> {
        self.workouts.iter()
    }

    pub fn as_slice(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

impl From<Vec<Workout>> for WorkoutIndex {
    fn from(workouts: Vec<Workout>) -> Self {
        Self::new(workouts)
    }
}

impl<'a> IntoIterator for &'a WorkoutIndex {
    type Item = &'a Workout;
    type IntoIter = slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
