//! Exam folder and timetable documents
//!
//! A timetable has no identity outside the folder that embeds it: it is
//! stored inside the folder's `timetables` list and every change to it is a
//! change to the folder document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Scalar JSON value accepted where a string is stored
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

/// Deserialize an optional string that clients may also send as a number
/// or boolean, e.g. `"id": 1` from the timetable generator
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
            Scalar::Bool(flag) => flag.to_string(),
        }),
    )
}

/// Exam folder document as stored in the `exam_folders` collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExamFolder {
    pub id: Uuid,
    pub user_id: String,
    pub folder_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub timetables: Vec<Timetable>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ordered exam schedule embedded in a folder
///
/// Every field is optional on the wire; the server fills in `id` and the
/// timestamps when the caller leaves them out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub day_gap: Option<i32>,
    #[serde(default)]
    pub timetable: Option<Vec<TimetableDay>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Timetable {
    /// The id, unless it is missing or empty
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.identifier() == Some(id)
    }
}

/// One calendar day of a timetable
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimetableDay {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub morning: Option<ExamSession>,
    #[serde(default)]
    pub afternoon: Option<ExamSession>,
}

/// A single exam sitting. All values are opaque strings; numeric values
/// are kept in their decimal form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExamSession {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub credits: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub session: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub code: Option<String>,
}

/// Request body for `POST /api/exam-folders`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExamFolder {
    pub user_id: String,
    pub folder_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timetables: Option<Vec<Timetable>>,
}

/// Request body for `PUT /api/exam-folders/{folderId}`
///
/// Applied wholesale: omitted fields overwrite the stored ones with their
/// empty value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExamFolder {
    pub folder_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timetables: Vec<Timetable>,
}

/// Query parameters for `POST /api/exam-folders/create-with-timetable`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWithTimetableQuery {
    pub user_id: String,
}
