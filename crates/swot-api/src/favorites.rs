//! Handlers for the favorites ledger. All routes require Basic auth.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/favorites/toggle` | Body: `{"paper_id":..}`; flips the state |
//! | `GET`  | `/favorites` | The user's saved papers |
//! | `GET`  | `/favorites/ids` | Paper ids only, for membership checks |

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use swot_core::{paper::Paper, store::StudyStore};

use crate::{AppState, auth::CurrentUser, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ToggleBody {
  pub paper_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
  pub success:   bool,
  /// `true` if the paper is favorited after this call.
  pub is_active: bool,
}

/// `POST /favorites/toggle`
pub async fn toggle<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
  Json(body): Json<ToggleBody>,
) -> Result<Json<ToggleResponse>, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let is_active = state
    .store
    .toggle_favorite(user.id, body.paper_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(ToggleResponse { success: true, is_active }))
}

/// `GET /favorites`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
) -> Result<Json<Vec<Paper>>, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let papers = state
    .store
    .list_favorites(user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(papers))
}

/// `GET /favorites/ids`
pub async fn ids<S>(
  State(state): State<AppState<S>>,
  user: CurrentUser,
) -> Result<Json<Vec<i64>>, ApiError>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut ids: Vec<i64> = state
    .store
    .favorite_ids(user.id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .into_iter()
    .collect();
  ids.sort_unstable();
  Ok(Json(ids))
}
