//! Personal-library membership for one (user, novel) pair.
//!
//! [`LibraryWidget`] is a local cache of the remote `Library` row. It is only as fresh as its
//! last [`LibraryWidget::refresh`]; saves and deletes update it to what was just written.

use crate::db::{LibraryEntry, LibraryFields, Novel, NovelId, ReadingStatus, Store, UserId};
use crate::error::NovellaError;
use crate::service::notice::Notice;
use crate::service::session::Session;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, warn};

pub const MAX_SCORE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    NotInLibrary,
    InLibrary(LibraryFields),
}

/// Which branch of the save actually ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

impl SaveOutcome {
    pub fn notice(self) -> Notice {
        match self {
            SaveOutcome::Inserted => Notice::added_to_library(),
            SaveOutcome::Updated => Notice::updated_in_library(),
        }
    }
}

pub struct LibraryWidget {
    store: Store,
    user_id: UserId,
    novel_id: NovelId,
    chapters: Option<i64>,
    membership: Membership,
}

impl LibraryWidget {
    pub fn new(store: &Store, session: &Session, novel: &Novel) -> Self {
        Self {
            store: store.for_token(session.access_token.as_deref()),
            user_id: session.user_id.clone(),
            novel_id: novel.id,
            chapters: novel.chapters,
            membership: Membership::NotInLibrary,
        }
    }

    /// Construct and immediately refresh from the store.
    pub async fn mount(store: &Store, session: &Session, novel: &Novel) -> Self {
        let mut widget = Self::new(store, session, novel);
        widget.refresh().await;
        widget
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    pub fn chapters(&self) -> Option<i64> {
        self.chapters
    }

    /// Re-read the row. A failed read leaves the widget showing `NotInLibrary`.
    pub async fn refresh(&mut self) {
        self.membership = match self.store.library_entries(&self.user_id, self.novel_id).await {
            Ok(rows) => match rows.into_iter().next() {
                Some(entry) => Membership::InLibrary(entry.fields),
                None => Membership::NotInLibrary,
            },
            Err(e) => {
                warn!(
                    user_id = %self.user_id,
                    novel_id = self.novel_id,
                    error = %e,
                    "library lookup failed"
                );
                Membership::NotInLibrary
            }
        };
    }

    /// Initial values for the editor form.
    pub fn form(&self) -> LibraryFields {
        match &self.membership {
            Membership::InLibrary(fields) => fields.clone(),
            Membership::NotInLibrary => LibraryFields::default(),
        }
    }

    /// Check for an existing row, then insert or update it.
    ///
    /// Not atomic: a concurrent writer between the check and the write can cause a
    /// duplicate-insert error or a silently overwritten row.
    pub async fn save(&mut self, staged: LibraryFields) -> Result<SaveOutcome, NovellaError> {
        let staged = clamp_fields(staged, self.chapters);
        let existing = self
            .store
            .library_entries(&self.user_id, self.novel_id)
            .await?;

        let outcome = if existing.is_empty() {
            let entry = LibraryEntry {
                user_id: self.user_id.clone(),
                novel_id: self.novel_id,
                fields: staged.clone(),
            };
            self.store.insert_library_entry(&entry).await?;
            SaveOutcome::Inserted
        } else {
            self.store
                .update_library_entry(&self.user_id, self.novel_id, &staged)
                .await?;
            SaveOutcome::Updated
        };

        info!(
            user_id = %self.user_id,
            novel_id = self.novel_id,
            status = %staged.status,
            ?outcome,
            "library entry saved"
        );
        self.membership = Membership::InLibrary(staged);
        Ok(outcome)
    }

    /// Remove the row. Returns `None` without touching the store when not in the library.
    pub async fn delete(&mut self) -> Result<Option<Notice>, NovellaError> {
        if self.membership == Membership::NotInLibrary {
            return Ok(None);
        }
        self.store
            .delete_library_entry(&self.user_id, self.novel_id)
            .await?;
        info!(user_id = %self.user_id, novel_id = self.novel_id, "library entry removed");
        self.membership = Membership::NotInLibrary;
        Ok(Some(Notice::removed_from_library()))
    }
}

pub fn clamp_score(score: i64) -> i64 {
    score.clamp(0, MAX_SCORE)
}

/// Progress never goes below zero; it is capped only when the chapter count is known.
pub fn clamp_progress(progress: i64, chapters: Option<i64>) -> i64 {
    match chapters {
        Some(chapters) => progress.clamp(0, chapters.max(0)),
        None => progress.max(0),
    }
}

fn clamp_fields(mut fields: LibraryFields, chapters: Option<i64>) -> LibraryFields {
    fields.score = fields.score.map(clamp_score);
    fields.progress = fields.progress.map(|p| clamp_progress(p, chapters));
    fields
}

/// Raw library editor form, as posted by the browser.
#[derive(Debug, Default, Deserialize)]
pub struct LibraryFormInput {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub progress: String,
    #[serde(default)]
    pub date_started: String,
    #[serde(default)]
    pub date_finished: String,
}

impl LibraryFormInput {
    /// Validate and clamp into the fields that get submitted.
    ///
    /// Blank inputs are unset. Score is clamped into `0..=10`, progress into `0..=chapters`
    /// (or just `0..` when the chapter count is unknown).
    pub fn parse(&self, chapters: Option<i64>) -> Result<LibraryFields, NovellaError> {
        let status = match self.status.trim() {
            "" => ReadingStatus::default(),
            s => s.parse().map_err(NovellaError::InvalidForm)?,
        };
        Ok(LibraryFields {
            status,
            score: parse_number("score", &self.score)?.map(clamp_score),
            progress: parse_number("progress", &self.progress)?
                .map(|p| clamp_progress(p, chapters)),
            date_started: parse_date("date started", &self.date_started)?,
            date_finished: parse_date("date finished", &self.date_finished)?,
        })
    }
}

fn parse_number(field: &str, raw: &str) -> Result<Option<i64>, NovellaError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| NovellaError::InvalidForm(format!("{field} must be a whole number")))
}

fn parse_date(field: &str, raw: &str) -> Result<Option<NaiveDate>, NovellaError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| NovellaError::InvalidForm(format!("{field} must be a YYYY-MM-DD date")))
}
