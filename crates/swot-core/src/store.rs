//! The `StudyStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `swot-store-sqlite`).
//! Higher layers (`swot-api`, `swot-server`) depend on this abstraction,
//! not on any concrete backend. Every component call receives the store
//! explicitly; there is no ambient per-request state.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::{collections::HashSet, future::Future};

use chrono::{DateTime, Utc};

use crate::{
  card::{CardEdit, Flashcard, NewFlashcard},
  paper::{NewPaper, Paper, PaperFilter},
  scheduler::Rating,
  subject::Subject,
  user::{Credentials, User},
};

/// Abstraction over a Swot storage backend.
pub trait StudyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Insert a new user with an already-hashed password.
  ///
  /// Returns `None` when the username is taken — a duplicate is a domain
  /// outcome, not an error. The caller never learns more than "taken".
  fn create_user(
    &self,
    username: String,
    password_hash: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Look up a user and their stored hash for authentication.
  /// Returns `None` if the username is unknown.
  fn get_credentials(
    &self,
    username: String,
  ) -> impl Future<Output = Result<Option<Credentials>, Self::Error>> + Send + '_;

  // ── Catalog ───────────────────────────────────────────────────────────

  /// The subject taxonomy, ordered by id.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// Insert a subject if it doesn't already exist; returns the row either
  /// way. Used only by seeding.
  fn add_subject(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Subject, Self::Error>> + Send + '_;

  /// Papers for a subject (name matched case-insensitively), narrowed by
  /// `filter`. An unknown subject yields an empty vec, not an error.
  ///
  /// Ordering is a contract: year descending, then level ascending, then
  /// paper number ascending.
  fn list_papers(
    &self,
    subject: String,
    filter: PaperFilter,
  ) -> impl Future<Output = Result<Vec<Paper>, Self::Error>> + Send + '_;

  /// Distinct years with papers for a subject, descending. Empty for an
  /// unknown subject.
  fn list_years(
    &self,
    subject: String,
  ) -> impl Future<Output = Result<Vec<i32>, Self::Error>> + Send + '_;

  /// Seed one paper row. Used only by the directory sync.
  fn insert_paper(
    &self,
    paper: NewPaper,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every filename currently in the catalog, for diffing against disk.
  fn paper_filenames(
    &self,
  ) -> impl Future<Output = Result<HashSet<String>, Self::Error>> + Send + '_;

  /// Prune a paper whose file disappeared. Returns whether a row existed.
  fn remove_paper(
    &self,
    filename: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Favorites ─────────────────────────────────────────────────────────

  /// Flip the favorite state for `(user_id, paper_id)`: removes the row if
  /// present, inserts it otherwise. Returns `true` if the favorite is now
  /// active. The delete/insert pair runs inside a single store call, so
  /// the composite key can never double-insert.
  fn toggle_favorite(
    &self,
    user_id: i64,
    paper_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// The user's favorited papers, enriched with subject names.
  fn list_favorites(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Paper>, Self::Error>> + Send + '_;

  /// Favorited paper ids as a set, for O(1) membership checks when
  /// rendering paper lists.
  fn favorite_ids(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<HashSet<i64>, Self::Error>> + Send + '_;

  // ── Flashcards ────────────────────────────────────────────────────────

  /// All of the user's cards, newest first (id descending).
  fn list_cards(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Flashcard>, Self::Error>> + Send + '_;

  /// Ownership-checked read; `None` for a missing *or unowned* card, so
  /// existence of other users' cards never leaks.
  fn get_card(
    &self,
    user_id: i64,
    card_id: i64,
  ) -> impl Future<Output = Result<Option<Flashcard>, Self::Error>> + Send + '_;

  /// Create a card in box one, due immediately.
  fn create_card(
    &self,
    input: NewFlashcard,
  ) -> impl Future<Output = Result<Flashcard, Self::Error>> + Send + '_;

  /// Ownership-checked update of the editable fields. A silent no-op when
  /// the id/user pair doesn't match.
  fn update_card(
    &self,
    user_id: i64,
    card_id: i64,
    edit: CardEdit,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Ownership-checked delete; silent no-op if not owned.
  fn delete_card(
    &self,
    user_id: i64,
    card_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Review scheduling ─────────────────────────────────────────────────

  /// Cards with `next_review_date <= now`, most overdue first.
  fn due_cards(
    &self,
    user_id: i64,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Flashcard>, Self::Error>> + Send + '_;

  /// Run one review through [`crate::scheduler::apply`] and persist the
  /// new box, due date, and `last_reviewed = now`. A silent no-op for a
  /// card the user doesn't own. The rating has already been validated at
  /// the wire boundary.
  fn apply_review(
    &self,
    user_id: i64,
    card_id: i64,
    rating: Rating,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
