//! Flashcard types.
//!
//! A flashcard is owned by exactly one user; every store operation that
//! touches one carries the owner's id in its predicate. A card that isn't
//! yours behaves as if it doesn't exist.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::scheduler::LeitnerBox;

/// A flashcard, with its subject name joined in at the store boundary.
#[derive(Debug, Clone, Serialize)]
pub struct Flashcard {
  pub id:               i64,
  pub user_id:          i64,
  pub subject_id:       i64,
  pub subject_name:     String,
  pub question:         String,
  pub answer:           String,
  pub leitner_box:      LeitnerBox,
  /// When the card next becomes due. Cards start due immediately.
  pub next_review_date: DateTime<Utc>,
  /// Set by the scheduler on every review; `None` until the first one.
  pub last_reviewed:    Option<DateTime<Utc>>,
}

/// Input to [`crate::store::StudyStore::create_card`]. The store assigns
/// box one and an immediate due date.
#[derive(Debug, Clone)]
pub struct NewFlashcard {
  pub user_id:    i64,
  pub subject_id: i64,
  pub question:   String,
  pub answer:     String,
}

/// The owner-editable fields for
/// [`crate::store::StudyStore::update_card`]. Scheduling state is only
/// ever changed through reviews.
#[derive(Debug, Clone)]
pub struct CardEdit {
  pub subject_id: i64,
  pub question:   String,
  pub answer:     String,
}
