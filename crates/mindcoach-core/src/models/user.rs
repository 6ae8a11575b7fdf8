use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile as returned by the backend.
///
/// Only `id`, `email` and `username` are required; everything else is
/// study-plan data the user fills in later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub exam_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub selected_subjects: Vec<String>,
    #[serde(default)]
    pub ai_companion_style: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Days left until the exam, if an exam date is set and still ahead.
    pub fn days_until_exam(&self, now: DateTime<Utc>) -> Option<i64> {
        let exam = self.exam_date?;
        let days = (exam - now).num_days();
        (days >= 0).then_some(days)
    }

    /// One-line summary for status output
    pub fn display_summary(&self) -> String {
        format!("{} <{}>", self.username, self.email)
    }
}

/// Partial profile edit. Unset fields are left out of the request body so
/// the backend keeps their current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_subjects: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_companion_style: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.exam_date.is_none()
            && self.selected_subjects.is_none()
            && self.ai_companion_style.is_none()
    }
}

// The backend emits naive UTC timestamps ("2024-05-01T08:00:00"), while
// profiles we wrote ourselves carry an offset. Accept both.
fn deserialize_optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => parse_timestamp(s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", s))),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

// `selected_subjects` may come back as null
fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
