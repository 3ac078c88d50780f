//! Leitner-box review scheduling.
//!
//! Each flashcard sits in one of five proficiency boxes. A review either
//! promotes it (easy), leaves it where it is (medium), or resets it to box
//! one (hard). The box decides how far into the future the next review is
//! scheduled.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Review interval in days for boxes one through five.
const INTERVAL_DAYS: [i64; 5] = [1, 3, 7, 14, 30];

// ─── LeitnerBox ──────────────────────────────────────────────────────────────

/// A proficiency box. Invariant: `1 <= value <= 5`, enforced at
/// construction so a stored box never needs re-validation downstream.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LeitnerBox(u8);

impl LeitnerBox {
  pub const MAX: u8 = 5;
  pub const MIN: u8 = 1;

  pub fn new(value: i64) -> Result<Self> {
    if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
      Ok(Self(value as u8))
    } else {
      Err(Error::BoxOutOfRange(value))
    }
  }

  /// Box one — where every card starts.
  pub fn first() -> Self { Self(Self::MIN) }

  pub fn value(self) -> u8 { self.0 }

  /// Days until the next review for a card sitting in this box.
  pub fn interval_days(self) -> i64 { INTERVAL_DAYS[(self.0 - 1) as usize] }

  /// The next box up, clamped at [`Self::MAX`].
  fn promoted(self) -> Self { Self((self.0 + 1).min(Self::MAX)) }
}

// ─── Rating ──────────────────────────────────────────────────────────────────

/// The user's self-assessment after seeing a card's answer. Anything else
/// on the wire is rejected by serde before it reaches the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
  Hard,
  Medium,
  Easy,
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// The scheduling decision for one review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
  pub leitner_box: LeitnerBox,
  pub next_review: DateTime<Utc>,
}

/// Apply a rating to a card's current box.
///
/// - easy: promote (clamped at five); due after the *new* box's interval.
/// - medium: stay; due after the current box's interval. The box does not
///   move but the date still advances: re-reading is never required to
///   progress.
/// - hard: reset to box one; due immediately (zero-day delay), so the card
///   re-enters the current session's queue.
pub fn apply(
  current: LeitnerBox,
  rating: Rating,
  now: DateTime<Utc>,
) -> ReviewOutcome {
  let (leitner_box, delay_days) = match rating {
    Rating::Easy => {
      let promoted = current.promoted();
      (promoted, promoted.interval_days())
    }
    Rating::Medium => (current, current.interval_days()),
    Rating::Hard => (LeitnerBox::first(), 0),
  };

  ReviewOutcome {
    leitner_box,
    next_review: now + Duration::days(delay_days),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn boxed(value: i64) -> LeitnerBox { LeitnerBox::new(value).unwrap() }

  #[test]
  fn box_construction_enforces_range() {
    for value in 1..=5 {
      assert_eq!(boxed(value).value(), value as u8);
    }
    assert!(matches!(LeitnerBox::new(0), Err(Error::BoxOutOfRange(0))));
    assert!(matches!(LeitnerBox::new(6), Err(Error::BoxOutOfRange(6))));
    assert!(matches!(LeitnerBox::new(-3), Err(Error::BoxOutOfRange(-3))));
  }

  #[test]
  fn easy_promotes_and_uses_new_interval() {
    let now = Utc::now();
    let outcome = apply(boxed(3), Rating::Easy, now);
    assert_eq!(outcome.leitner_box, boxed(4));
    assert_eq!(outcome.next_review, now + Duration::days(14));
  }

  #[test]
  fn easy_clamps_at_box_five() {
    let now = Utc::now();
    let outcome = apply(boxed(5), Rating::Easy, now);
    assert_eq!(outcome.leitner_box, boxed(5));
    assert_eq!(outcome.next_review, now + Duration::days(30));
  }

  #[test]
  fn medium_keeps_box_but_advances_date() {
    let now = Utc::now();
    let outcome = apply(boxed(1), Rating::Medium, now);
    assert_eq!(outcome.leitner_box, boxed(1));
    assert_eq!(outcome.next_review, now + Duration::days(1));

    let outcome = apply(boxed(4), Rating::Medium, now);
    assert_eq!(outcome.leitner_box, boxed(4));
    assert_eq!(outcome.next_review, now + Duration::days(14));
  }

  #[test]
  fn hard_resets_to_box_one_immediately() {
    let now = Utc::now();
    for start in 1..=5 {
      let outcome = apply(boxed(start), Rating::Hard, now);
      assert_eq!(outcome.leitner_box, LeitnerBox::first());
      assert_eq!(outcome.next_review, now);
    }
  }

  #[test]
  fn interval_table_matches_contract() {
    let expected = [(1, 1), (2, 3), (3, 7), (4, 14), (5, 30)];
    for (value, days) in expected {
      assert_eq!(boxed(value).interval_days(), days);
    }
  }
}
