//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings, which also makes them
//! compare correctly as text in `WHERE next_review_date <= ?` queries.
//! Levels and paper kinds use their two-letter codes.

use chrono::{DateTime, Utc};
use swot_core::{
  card::Flashcard,
  paper::{Level, Paper, PaperKind},
  scheduler::LeitnerBox,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `papers` row joined with `subjects`.
pub struct RawPaper {
  pub id:           i64,
  pub subject_id:   i64,
  pub subject_name: String,
  pub year:         i32,
  pub level:        String,
  pub kind:         String,
  pub paper_number: i32,
  pub filename:     String,
}

impl RawPaper {
  pub fn into_paper(self) -> Result<Paper> {
    Ok(Paper {
      id:           self.id,
      subject_id:   self.subject_id,
      subject_name: self.subject_name,
      year:         self.year,
      level:        Level::parse(&self.level).map_err(Error::Core)?,
      kind:         PaperKind::parse(&self.kind).map_err(Error::Core)?,
      paper_number: self.paper_number,
      filename:     self.filename,
    })
  }
}

/// Raw values read directly from a `flashcards` row joined with `subjects`.
pub struct RawFlashcard {
  pub id:               i64,
  pub user_id:          i64,
  pub subject_id:       i64,
  pub subject_name:     String,
  pub question:         String,
  pub answer:           String,
  pub leitner_box:      i64,
  pub next_review_date: String,
  pub last_reviewed:    Option<String>,
}

impl RawFlashcard {
  pub fn into_flashcard(self) -> Result<Flashcard> {
    Ok(Flashcard {
      id:               self.id,
      user_id:          self.user_id,
      subject_id:       self.subject_id,
      subject_name:     self.subject_name,
      question:         self.question,
      answer:           self.answer,
      leitner_box:      LeitnerBox::new(self.leitner_box).map_err(Error::Core)?,
      next_review_date: decode_dt(&self.next_review_date)?,
      last_reviewed:    self
        .last_reviewed
        .as_deref()
        .map(decode_dt)
        .transpose()?,
    })
  }
}
