use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::fields::{
    deserialize_some, reject_null, validate_count, validate_measure, validate_name,
};
use super::FromSqliteRow;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Strength,
    Cardio,
    Flexibility,
    Sprints,
}

impl ExerciseType {
    pub const ALL: &'static [ExerciseType] = &[
        ExerciseType::Strength,
        ExerciseType::Cardio,
        ExerciseType::Flexibility,
        ExerciseType::Sprints,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Strength => "strength",
            ExerciseType::Cardio => "cardio",
            ExerciseType::Flexibility => "flexibility",
            ExerciseType::Sprints => "sprints",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl ToSql for ExerciseType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ExerciseType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        ExerciseType::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown exercise type: {}", s).into()))
    }
}

/// One movement performed within a session.
///
/// Serialized with the owning session id under `session`; bookkeeping
/// columns stay out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exercise {
    pub id: String,
    #[serde(rename = "session")]
    pub session_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
    pub distance: Option<f64>,
    pub notes: Option<String>,
    #[serde(skip_serializing)]
    pub position: i64,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    /// Build a fresh row for `session_id` from a request payload.
    pub fn new(session_id: &str, position: i64, input: NewExercise, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            name: input.name,
            exercise_type: input.exercise_type,
            sets: input.sets,
            reps: input.reps,
            weight: input.weight,
            duration: input.duration,
            distance: input.distance,
            notes: input.notes,
            position,
            created_at: now,
            updated_at: now,
        }
    }
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            session_id: row.get("session_id")?,
            name: row.get("name")?,
            exercise_type: row.get("type")?,
            sets: row.get("sets")?,
            reps: row.get("reps")?,
            weight: row.get("weight")?,
            duration: row.get("duration")?,
            distance: row.get("distance")?,
            notes: row.get("notes")?,
            position: row.get("position")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Exercise payload without a session reference, as embedded in a
/// session create or update.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExercise {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
    pub distance: Option<f64>,
    pub notes: Option<String>,
}

impl NewExercise {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_count("sets", self.sets)?;
        validate_count("reps", self.reps)?;
        validate_measure("weight", self.weight)?;
        validate_count("duration", self.duration)?;
        validate_measure("distance", self.distance)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    #[serde(rename = "session")]
    pub session_id: String,
    #[serde(flatten)]
    pub exercise: NewExercise,
}

/// Partial update of a single exercise.
///
/// `session` may be sent back as-is, but an exercise never changes owner.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateExercise {
    #[serde(rename = "session", default, deserialize_with = "deserialize_some")]
    pub session_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_some")]
    pub exercise_type: Option<Option<ExerciseType>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub sets: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub reps: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub weight: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub duration: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub distance: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

impl UpdateExercise {
    pub fn validate(&self) -> Result<()> {
        reject_null("session", &self.session_id)?;
        reject_null("name", &self.name)?;
        reject_null("type", &self.exercise_type)?;
        if let Some(Some(name)) = &self.name {
            validate_name(name)?;
        }
        validate_count("sets", self.sets.flatten())?;
        validate_count("reps", self.reps.flatten())?;
        validate_measure("weight", self.weight.flatten())?;
        validate_count("duration", self.duration.flatten())?;
        validate_measure("distance", self.distance.flatten())
    }

    pub fn apply(self, exercise: &mut Exercise) {
        if let Some(Some(name)) = self.name {
            exercise.name = name;
        }
        if let Some(Some(exercise_type)) = self.exercise_type {
            exercise.exercise_type = exercise_type;
        }
        if let Some(sets) = self.sets {
            exercise.sets = sets;
        }
        if let Some(reps) = self.reps {
            exercise.reps = reps;
        }
        if let Some(weight) = self.weight {
            exercise.weight = weight;
        }
        if let Some(duration) = self.duration {
            exercise.duration = duration;
        }
        if let Some(distance) = self.distance {
            exercise.distance = distance;
        }
        if let Some(notes) = self.notes {
            exercise.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squat() -> NewExercise {
        serde_json::from_str(r#"{"name":"Squat","type":"strength","sets":5,"reps":5,"weight":100}"#)
            .unwrap()
    }

    #[test]
    fn test_exercise_type_as_str() {
        assert_eq!(ExerciseType::Strength.as_str(), "strength");
        assert_eq!(ExerciseType::Cardio.as_str(), "cardio");
        assert_eq!(ExerciseType::Flexibility.as_str(), "flexibility");
        assert_eq!(ExerciseType::Sprints.as_str(), "sprints");
    }

    #[test]
    fn test_exercise_type_parse() {
        assert_eq!(ExerciseType::parse("cardio"), Some(ExerciseType::Cardio));
        assert_eq!(ExerciseType::parse("yoga"), None);
        assert_eq!(ExerciseType::parse("Strength"), None);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: serde_json::Result<NewExercise> =
            serde_json::from_str(r#"{"name":"Stretch","type":"yoga"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_exercise_validate() {
        assert!(squat().validate().is_ok());

        let mut blank = squat();
        blank.name = "  ".to_string();
        assert!(blank.validate().is_err());

        let mut negative = squat();
        negative.reps = Some(-3);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_metrics_not_restricted_by_type() {
        let mut stretch = squat();
        stretch.exercise_type = ExerciseType::Flexibility;
        stretch.distance = Some(5.0);
        assert!(stretch.validate().is_ok());
    }

    #[test]
    fn test_serialized_shape() {
        let exercise = Exercise::new("session-1", 0, squat(), Utc::now());
        let json = serde_json::to_value(&exercise).unwrap();

        assert_eq!(json["session"], "session-1");
        assert_eq!(json["type"], "strength");
        assert_eq!(json["sets"], 5);
        assert_eq!(json["distance"], serde_json::Value::Null);
        assert!(json.get("created_at").is_none());
        assert!(json.get("position").is_none());
    }

    #[test]
    fn test_update_rejects_null_required_fields() {
        for body in [r#"{"name": null}"#, r#"{"type": null}"#, r#"{"session": null}"#] {
            let patch: UpdateExercise = serde_json::from_str(body).unwrap();
            assert!(patch.validate().is_err(), "accepted {}", body);
        }
    }

    #[test]
    fn test_update_apply_keeps_absent_fields() {
        let mut exercise = Exercise::new("session-1", 0, squat(), Utc::now());
        let patch: UpdateExercise =
            serde_json::from_str(r#"{"reps": 3, "weight": null}"#).unwrap();
        patch.apply(&mut exercise);

        assert_eq!(exercise.name, "Squat");
        assert_eq!(exercise.sets, Some(5));
        assert_eq!(exercise.reps, Some(3));
        assert_eq!(exercise.weight, None);
    }
}
