//! Handlers for account endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/register` | Body: `{"username":..,"password":..}`; 409 if taken |
//! | `GET`  | `/me` | Requires Basic auth; returns the authenticated user |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use swot_core::{store::StudyStore, user::User};

use crate::{AppState, auth, auth::CurrentUser, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub username: String,
  pub password: String,
}

/// `POST /register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.username.is_empty() || body.password.is_empty() {
    return Err(ApiError::BadRequest(
      "username and password must not be empty".into(),
    ));
  }

  let hash =
    auth::hash_password(&body.password).map_err(|_| ApiError::Hashing)?;

  let user = state
    .store
    .create_user(body.username, hash)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::Conflict("username already taken".into()))?;

  tracing::info!(user_id = user.id, "registered new user");
  Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /me`
pub async fn me<S>(user: CurrentUser) -> Json<User>
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Json(User { id: user.id, username: user.username })
}
