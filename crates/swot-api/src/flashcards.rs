//! Handlers for flashcard CRUD. All routes require Basic auth.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/flashcards` | The user's cards, newest first |
//! | `POST`   | `/flashcards` | Body: [`CardBody`]; 201 + stored card |
//! | `GET`    | `/flashcards/{id}` | 404 for missing *or unowned* ids |
//! | `PUT`    | `/flashcards/{id}` | 204; silent no-op when unowned |
//! | `DELETE` | `/flashcards/{id}` | 204; silent no-op when unowned |
//!
//! PUT and DELETE answer 204 whether or not the id matched: refusing to
//! distinguish "not yours" from "doesn't exist" is a deliberate contract
//! so other users' card ids can't be probed.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use swot_core::{
  card::{CardEdit, Flashcard, NewFlashcard},
  store::StudyStore,
};

use crate::{AppState, auth::CurrentUser, error::ApiError};

/// JSON body accepted by `POST /flashcards` and `PUT /flashcards/{id}`.
#[derive(Debug, Deserialize)]
pub struct CardBody {
  pub subject_id: i64,
  pub question:   String,
  pub answer:     String,
}

/// `GET /flashcards`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
) -> Result<Json<Vec<Flashcard>>, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let cards = state
    .store
    .list_cards(user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(cards))
}

/// `POST /flashcards`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
  Json(body): Json<CardBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.question.is_empty() || body.answer.is_empty() {
    return Err(ApiError::BadRequest(
      "question and answer must not be empty".into(),
    ));
  }

  let card = state
    .store
    .create_card(NewFlashcard {
      user_id:    user.id,
      subject_id: body.subject_id,
      question:   body.question,
      answer:     body.answer,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(card)))
}

/// `GET /flashcards/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<Flashcard>, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let card = state
    .store
    .get_card(user.id, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("card {id} not found")))?;
  Ok(Json(card))
}

/// `PUT /flashcards/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
  Path(id): Path<i64>,
  Json(body): Json<CardBody>,
) -> Result<StatusCode, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .update_card(user.id, id, CardEdit {
      subject_id: body.subject_id,
      question:   body.question,
      answer:     body.answer,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /flashcards/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .delete_card(user.id, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
