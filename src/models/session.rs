use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::fields::{deserialize_some, reject_null, validate_count, validate_name};
use super::{Exercise, FromSqliteRow, NewExercise};
use crate::error::Result;

/// A logged workout on a given date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    /// Seconds.
    pub duration: Option<i64>,
    pub rating: Option<i64>,
    pub notes: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
}

impl FromSqliteRow for Session {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            date: row.get("date")?,
            duration: row.get("duration")?,
            rating: row.get("rating")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// A session together with the exercises it owns.
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: Session,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSession {
    pub name: String,
    pub date: NaiveDate,
    pub duration: Option<i64>,
    pub rating: Option<i64>,
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<NewExercise>,
}

impl CreateSession {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_count("duration", self.duration)?;
        self.exercises.iter().try_for_each(NewExercise::validate)
    }
}

/// Scalar session fields to overwrite. `None` leaves a field unchanged;
/// for nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct SessionChanges {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub duration: Option<Option<i64>>,
    pub rating: Option<Option<i64>>,
    pub notes: Option<Option<String>>,
}

impl SessionChanges {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        validate_count("duration", self.duration.flatten())
    }

    pub fn apply(self, session: &mut Session) {
        if let Some(name) = self.name {
            session.name = name;
        }
        if let Some(date) = self.date {
            session.date = date;
        }
        if let Some(duration) = self.duration {
            session.duration = duration;
        }
        if let Some(rating) = self.rating {
            session.rating = rating;
        }
        if let Some(notes) = self.notes {
            session.notes = notes;
        }
    }
}

/// How a session update treats the exercises it owns.
#[derive(Debug, Clone)]
pub enum SessionUpdate {
    /// Only scalar fields change; existing exercises are untouched.
    ScalarsOnly(SessionChanges),
    /// Scalar fields change and the exercise list is replaced wholesale.
    ScalarsAndExercises(SessionChanges, Vec<NewExercise>),
}

impl SessionUpdate {
    pub fn changes(&self) -> &SessionChanges {
        match self {
            SessionUpdate::ScalarsOnly(changes) => changes,
            SessionUpdate::ScalarsAndExercises(changes, _) => changes,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.changes().validate()?;
        match self {
            SessionUpdate::ScalarsOnly(_) => Ok(()),
            SessionUpdate::ScalarsAndExercises(_, exercises) => {
                exercises.iter().try_for_each(NewExercise::validate)
            }
        }
    }
}

/// Request body for PUT/PATCH on a session.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSession {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub duration: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub rating: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub exercises: Option<Option<Vec<NewExercise>>>,
}

impl UpdateSession {
    /// Fails if a non-nullable field is sent as `null`.
    pub fn into_update(self) -> Result<SessionUpdate> {
        reject_null("name", &self.name)?;
        reject_null("date", &self.date)?;
        reject_null("exercises", &self.exercises)?;

        let changes = SessionChanges {
            name: self.name.flatten(),
            date: self.date.flatten(),
            duration: self.duration,
            rating: self.rating,
            notes: self.notes,
        };
        Ok(match self.exercises.flatten() {
            Some(exercises) => SessionUpdate::ScalarsAndExercises(changes, exercises),
            None => SessionUpdate::ScalarsOnly(changes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_without_exercises_key_is_scalars_only() {
        let body: UpdateSession = serde_json::from_str(r#"{"rating": 9}"#).unwrap();
        match body.into_update().unwrap() {
            SessionUpdate::ScalarsOnly(changes) => {
                assert_eq!(changes.rating, Some(Some(9)));
                assert_eq!(changes.name, None);
            }
            other => panic!("expected ScalarsOnly, got {:?}", other),
        }
    }

    #[test]
    fn test_update_with_empty_exercises_replaces() {
        let body: UpdateSession = serde_json::from_str(r#"{"exercises": []}"#).unwrap();
        match body.into_update().unwrap() {
            SessionUpdate::ScalarsAndExercises(_, exercises) => assert!(exercises.is_empty()),
            other => panic!("expected ScalarsAndExercises, got {:?}", other),
        }
    }

    #[test]
    fn test_update_rejects_null_required_fields() {
        for body in [r#"{"name": null}"#, r#"{"date": null}"#, r#"{"exercises": null}"#] {
            let body: UpdateSession = serde_json::from_str(body).unwrap();
            assert!(body.into_update().is_err());
        }
    }

    #[test]
    fn test_changes_apply() {
        let now = Utc::now();
        let mut session = Session {
            id: "s1".to_string(),
            name: "Leg Day".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            duration: Some(3600),
            rating: None,
            notes: Some("heavy".to_string()),
            created_at: now,
            updated_at: now,
        };

        SessionChanges {
            rating: Some(Some(9)),
            notes: Some(None),
            ..Default::default()
        }
        .apply(&mut session);

        assert_eq!(session.name, "Leg Day");
        assert_eq!(session.duration, Some(3600));
        assert_eq!(session.rating, Some(9));
        assert_eq!(session.notes, None);
    }

    #[test]
    fn test_rating_has_no_range_check() {
        let changes = SessionChanges {
            rating: Some(Some(-40)),
            ..Default::default()
        };
        assert!(changes.validate().is_ok());
    }

    #[test]
    fn test_create_session_validates_exercises() {
        let body: CreateSession = serde_json::from_str(
            r#"{"name":"Leg Day","date":"2024-01-01","exercises":[{"name":"","type":"strength"}]}"#,
        )
        .unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_detail_serializes_flat() {
        let now = Utc::now();
        let detail = SessionDetail {
            session: Session {
                id: "s1".to_string(),
                name: "Leg Day".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                duration: None,
                rating: Some(8),
                notes: None,
                created_at: now,
                updated_at: now,
            },
            exercises: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["id"], "s1");
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["rating"], 8);
        assert!(json["exercises"].as_array().unwrap().is_empty());
        assert!(json.get("updated_at").is_none());
    }
}
