/// Workout session model
///
/// Each session belongs to exactly one member. Sessions are removed together
/// with their member (`ON DELETE CASCADE`).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE workout_session (
///     id BIGSERIAL PRIMARY KEY,
///     member_id BIGINT NOT NULL REFERENCES member(id) ON DELETE CASCADE,
///     date TIMESTAMP NOT NULL,
///     duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
///     activity_type VARCHAR(50) NOT NULL
/// );
/// ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored workout session row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSession {
    /// Primary key assigned by storage
    pub id: i64,

    /// Owning member
    pub member_id: i64,

    /// When the session took place
    #[serde(with = "date_format")]
    pub date: NaiveDateTime,

    /// Length of the session, always > 0
    pub duration_minutes: i32,

    /// Free-form activity label (e.g. "running")
    pub activity_type: String,
}

/// Input for recording a workout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewWorkoutSession {
    pub member_id: i64,

    #[serde(with = "date_format")]
    pub date: NaiveDateTime,

    #[validate(range(min = 1, message = "Duration must be a positive integer."))]
    pub duration_minutes: i32,

    #[validate(length(max = 50, message = "Activity type must be at most 50 characters."))]
    pub activity_type: String,
}

impl NewWorkoutSession {
    /// Checks the duration range and the activity column width
    pub fn check_limits(&self) -> Result<(), String> {
        super::check_limits(self, &["duration_minutes", "activity_type"])
    }

    /// Builds the stored row for `id`
    pub fn into_session(self, id: i64) -> WorkoutSession {
        WorkoutSession {
            id,
            member_id: self.member_id,
            date: self.date,
            duration_minutes: self.duration_minutes,
            activity_type: self.activity_type,
        }
    }
}

/// Serde adapter for the `YYYY-MM-DD HH:MM:SS` wire format
///
/// Use with `#[serde(with = "fitcenter_shared::models::workout_session::date_format")]`.
pub mod date_format {
    use crate::validation::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
