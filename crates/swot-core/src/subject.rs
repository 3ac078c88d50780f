//! Subject — a fixed taxonomy entry (e.g. Biology, Chemistry).
//!
//! Subjects are static reference data: seeded once, never mutated by
//! user-facing operations. Papers and flashcards both hang off a subject.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub id:   i64,
  pub name: String,
}
