use crate::errors::DataError;
use crate::flex::{decode_flexible_f64, wall_clock};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum ActivityType {
    #[serde(rename = "Walking/Running")]
    WalkingRunning,
    #[serde(rename = "Yoga")]
    Yoga,
    #[serde(rename = "Water")]
    Water,
    #[serde(rename = "Cycling")]
    Cycling,
    #[serde(rename = "Strength")]
    Strength,
}

impl ActivityType {
    pub const ALL: [Self; 5] = [
        Self::WalkingRunning,
        Self::Yoga,
        Self::Water,
        Self::Cycling,
        Self::Strength,
    ];

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::WalkingRunning => "Walking / running",
            Self::Yoga => "Yoga",
            Self::Water => "Water activities",
            Self::Cycling => "Cycling",
            Self::Strength => "Strength",
        }
    }

    /// Single-character marker for compact grid output.
    pub const fn icon(self) -> char {
        match self {
            Self::WalkingRunning => 'R',
            Self::Yoga => 'Y',
            Self::Water => 'W',
            Self::Cycling => 'C',
            Self::Strength => 'S',
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One recorded workout.
///
/// Identity is the workout key alone: two values with the same `id` compare
/// equal whatever their other fields hold.
#[derive(Debug, Clone, Deserialize)]
pub struct Workout {
    #[serde(rename = "workoutKey")]
    pub id: String,
    #[serde(rename = "workoutActivityType")]
    pub activity_type: ActivityType,
    /// Local wall-clock start time.
    #[serde(rename = "workoutStartDate", deserialize_with = "wall_clock")]
    pub start: NaiveDateTime,
}

impl Workout {
    pub fn new(id: impl Into<String>, activity_type: ActivityType, start: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            activity_type,
            start,
        }
    }

    /// Calendar day the workout started on.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn time_string(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn date_string(&self) -> String {
        self.start.format("%-d %B %Y").to_string()
    }
}

impl PartialEq for Workout {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Workout {}

impl Hash for Workout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Per-workout summary document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawWorkoutMetadata")]
pub struct WorkoutMetadata {
    pub workout_key: String,
    pub activity_type: ActivityType,
    pub start: NaiveDateTime,

    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,

    pub max_layer: i32,
    pub max_sub_layer: i32,

    pub avg_humidity: f64,
    pub avg_temp: f64,

    pub comment: Option<String>,
    pub photo_before: Option<String>,
    pub photo_after: Option<String>,
    pub heart_rate_graph: Option<String>,
    pub activity_graph: Option<String>,
    pub map: Option<String>,
}

/// Metadata as stored on disk, numeric fields still untyped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorkoutMetadata {
    workout_key: String,
    workout_activity_type: ActivityType,
    #[serde(deserialize_with = "wall_clock")]
    workout_start_date: NaiveDateTime,

    #[serde(default)]
    distance: Option<JsonValue>,
    #[serde(default)]
    duration: Option<JsonValue>,

    max_layer: i32,
    max_sub_layer: i32,

    #[serde(default, rename = "avg_humidity")]
    avg_humidity: Option<JsonValue>,
    #[serde(default, rename = "avg_temp")]
    avg_temp: Option<JsonValue>,

    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    photo_before: Option<String>,
    #[serde(default)]
    photo_after: Option<String>,
    #[serde(default)]
    heart_rate_graph: Option<String>,
    #[serde(default)]
    activity_graph: Option<String>,
    #[serde(default)]
    map: Option<String>,
}

impl TryFrom<RawWorkoutMetadata> for WorkoutMetadata {
    type Error = DataError;

    fn try_from(raw: RawWorkoutMetadata) -> Result<Self, Self::Error> {
        Ok(Self {
            distance: decode_flexible_f64("distance", raw.distance.as_ref())?,
            duration: decode_flexible_f64("duration", raw.duration.as_ref())?,
            avg_humidity: decode_flexible_f64("avg_humidity", raw.avg_humidity.as_ref())?,
            avg_temp: decode_flexible_f64("avg_temp", raw.avg_temp.as_ref())?,
            workout_key: raw.workout_key,
            activity_type: raw.workout_activity_type,
            start: raw.workout_start_date,
            max_layer: raw.max_layer,
            max_sub_layer: raw.max_sub_layer,
            comment: raw.comment,
            photo_before: raw.photo_before,
            photo_after: raw.photo_after,
            heart_rate_graph: raw.heart_rate_graph,
            activity_graph: raw.activity_graph,
            map: raw.map,
        })
    }
}

impl WorkoutMetadata {
    pub fn formatted_distance(&self) -> String {
        if self.distance >= 1000.0 {
            format!("{:.1} km", self.distance / 1000.0)
        } else if self.distance > 0.0 {
            format!("{:.0} m", self.distance)
        } else {
            "-".to_string()
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn formatted_duration(&self) -> String {
        let total = self.duration as i64;
        let h = total / 3600;
        let m = (total % 3600) / 60;
        if h > 0 {
            format!("{h}h {m}min")
        } else {
            format!("{m} min")
        }
    }

    pub fn formatted_temperature(&self) -> String {
        format!("{:.1}°C", self.avg_temp)
    }

    pub fn formatted_humidity(&self) -> String {
        format!("{:.0}%", self.avg_humidity)
    }
}

/// One sample of a workout's time series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramDataPoint {
    #[serde(rename = "time_numeric")]
    pub time_numeric: i64,
    pub heart_rate: i32,
    #[serde(rename = "speed_kmh")]
    pub speed_kmh: f64,
    pub distance_meters: i64,
    pub steps: i64,
    pub elevation: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_celsius: f64,
    pub current_layer: i32,
    pub current_sub_layer: i32,
    #[serde(deserialize_with = "wall_clock")]
    pub current_timestamp: NaiveDateTime,
}
