//! Handlers for study sessions. All routes require Basic auth.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/study/queue` | Every due card, most overdue first |
//! | `GET`  | `/study/next` | The front of the queue plus a remaining count |
//! | `POST` | `/study/{id}/review` | Body: `{"rating":"hard"\|"medium"\|"easy"}` |
//!
//! A review of a card the user doesn't own is a silent 204: the
//! scheduler no-ops rather than confirm the card exists.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use swot_core::{card::Flashcard, scheduler::Rating, store::StudyStore};

use crate::{AppState, auth::CurrentUser, error::ApiError};

/// `GET /study/queue`
pub async fn queue<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
) -> Result<Json<Vec<Flashcard>>, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let cards = state
    .store
    .due_cards(user.id, Utc::now())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(cards))
}

#[derive(Debug, Serialize)]
pub struct NextCard {
  /// The most overdue card, or `null` when the session is finished.
  pub card:      Option<Flashcard>,
  /// How many cards are due in total, including `card`.
  pub remaining: usize,
}

/// `GET /study/next`
pub async fn next_card<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
) -> Result<Json<NextCard>, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let due = state
    .store
    .due_cards(user.id, Utc::now())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let remaining = due.len();
  Ok(Json(NextCard { card: due.into_iter().next(), remaining }))
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
  /// Validated by serde; the scheduler never sees anything else.
  pub rating: Rating,
}

/// `POST /study/{id}/review`
pub async fn review<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
  Path(id): Path<i64>,
  Json(body): Json<ReviewBody>,
) -> Result<StatusCode, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .apply_review(user.id, id, body.rating, Utc::now())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
