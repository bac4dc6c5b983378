use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

pub type NovelId = i64;
pub type UserId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Novel {
    pub id: NovelId,
    pub title: String,
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
    /// Rich text, stored and rendered as HTML.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Unknown chapter count leaves progress uncapped.
    pub chapters: Option<i64>,
}

/// The four admin-editable fields of a novel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NovelPatch {
    pub title: String,
    pub author: String,
    pub cover: String,
    pub description: String,
}

impl From<&Novel> for NovelPatch {
    fn from(n: &Novel) -> Self {
        Self {
            title: n.title.clone(),
            author: n.author.clone(),
            cover: n.cover.clone(),
            description: n.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Book {
    pub id: i64,
    pub novel_id: NovelId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume: i64,
}

/// Hosted rows may carry `null` where the local schema has a default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[default]
    Reading,
    #[serde(rename = "Plan to Read")]
    PlanToRead,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    Dropped,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 5] = [
        ReadingStatus::Reading,
        ReadingStatus::PlanToRead,
        ReadingStatus::Completed,
        ReadingStatus::OnHold,
        ReadingStatus::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Reading => "Reading",
            ReadingStatus::PlanToRead => "Plan to Read",
            ReadingStatus::Completed => "Completed",
            ReadingStatus::OnHold => "On Hold",
            ReadingStatus::Dropped => "Dropped",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReadingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown reading status `{s}`"))
    }
}

impl TryFrom<String> for ReadingStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The user-editable part of a library entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, FromRow)]
pub struct LibraryFields {
    #[sqlx(try_from = "String")]
    pub status: ReadingStatus,
    pub score: Option<i64>,
    pub progress: Option<i64>,
    pub date_started: Option<NaiveDate>,
    pub date_finished: Option<NaiveDate>,
}

/// One row of the `Library` table, keyed by `(user_id, novel_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct LibraryEntry {
    pub user_id: UserId,
    pub novel_id: NovelId,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: LibraryFields,
}
