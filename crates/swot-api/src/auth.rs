//! Credential hashing and the HTTP Basic-auth extractor.
//!
//! Passwords are stored as argon2 PHC strings: a fresh random salt and
//! the derivation parameters travel inside the encoded hash, so
//! verification needs nothing but the stored string and the candidate.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rand_core::OsRng;

use crate::{AppState, error::ApiError};
use swot_core::store::StudyStore;

/// Hash a password into a PHC string, e.g. `$argon2id$v=19$…`.
pub fn hash_password(
  password: &str,
) -> Result<String, argon2::password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)?
      .to_string(),
  )
}

/// Verify a candidate against a stored PHC string.
///
/// A malformed stored hash verifies as `false` — authentication is
/// denied, it never becomes a crash or a distinguishable error.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(stored) else {
    return false;
  };
  Argon2::default()
    .verify_password(candidate.as_bytes(), &parsed)
    .is_ok()
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The authenticated user; present in a handler signature means the
/// request carried valid Basic credentials.
#[derive(Debug, Clone)]
pub struct CurrentUser {
  pub id:       i64,
  pub username: String,
}

/// Pull `(username, password)` out of an `Authorization: Basic` header.
fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds =
    std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) =
    creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  Ok((username.to_owned(), password.to_owned()))
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let (username, password) = basic_credentials(&parts.headers)?;

    let creds = state
      .store
      .get_credentials(username)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;

    // Unknown user and wrong password are indistinguishable on the wire.
    let Some(creds) = creds else {
      return Err(ApiError::Unauthorized);
    };
    if !verify_password(&creds.password_hash, &password) {
      return Err(ApiError::Unauthorized);
    }

    Ok(CurrentUser {
      id:       creds.user.id,
      username: creds.user.username,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::{collections::HashSet, sync::Arc};

  use axum::http::{Request, header};
  use chrono::{DateTime, Utc};
  use swot_core::{
    card::{CardEdit, Flashcard, NewFlashcard},
    paper::{NewPaper, Paper, PaperFilter},
    scheduler::Rating,
    subject::Subject,
    user::{Credentials, User},
  };

  // A minimal store for testing auth only: one known user.
  #[derive(Clone)]
  struct OneUserStore {
    username:      String,
    password_hash: String,
  }

  impl StudyStore for OneUserStore {
    type Error = std::convert::Infallible;

    async fn create_user(&self, _: String, _: String) -> Result<Option<User>, Self::Error> { unimplemented!() }
    async fn get_credentials(&self, username: String) -> Result<Option<Credentials>, Self::Error> {
      if username == self.username {
        Ok(Some(Credentials {
          user:          User { id: 1, username },
          password_hash: self.password_hash.clone(),
        }))
      } else {
        Ok(None)
      }
    }
    async fn list_subjects(&self) -> Result<Vec<Subject>, Self::Error> { unimplemented!() }
    async fn add_subject(&self, _: String) -> Result<Subject, Self::Error> { unimplemented!() }
    async fn list_papers(&self, _: String, _: PaperFilter) -> Result<Vec<Paper>, Self::Error> { unimplemented!() }
    async fn list_years(&self, _: String) -> Result<Vec<i32>, Self::Error> { unimplemented!() }
    async fn insert_paper(&self, _: NewPaper) -> Result<(), Self::Error> { unimplemented!() }
    async fn paper_filenames(&self) -> Result<HashSet<String>, Self::Error> { unimplemented!() }
    async fn remove_paper(&self, _: String) -> Result<bool, Self::Error> { unimplemented!() }
    async fn toggle_favorite(&self, _: i64, _: i64) -> Result<bool, Self::Error> { unimplemented!() }
    async fn list_favorites(&self, _: i64) -> Result<Vec<Paper>, Self::Error> { unimplemented!() }
    async fn favorite_ids(&self, _: i64) -> Result<HashSet<i64>, Self::Error> { unimplemented!() }
    async fn list_cards(&self, _: i64) -> Result<Vec<Flashcard>, Self::Error> { unimplemented!() }
    async fn get_card(&self, _: i64, _: i64) -> Result<Option<Flashcard>, Self::Error> { unimplemented!() }
    async fn create_card(&self, _: NewFlashcard) -> Result<Flashcard, Self::Error> { unimplemented!() }
    async fn update_card(&self, _: i64, _: i64, _: CardEdit) -> Result<(), Self::Error> { unimplemented!() }
    async fn delete_card(&self, _: i64, _: i64) -> Result<(), Self::Error> { unimplemented!() }
    async fn due_cards(&self, _: i64, _: DateTime<Utc>) -> Result<Vec<Flashcard>, Self::Error> { unimplemented!() }
    async fn apply_review(&self, _: i64, _: i64, _: Rating, _: DateTime<Utc>) -> Result<(), Self::Error> { unimplemented!() }
  }

  fn make_state(password: &str) -> AppState<OneUserStore> {
    AppState {
      store: Arc::new(OneUserStore {
        username:      "alice".to_string(),
        password_hash: hash_password(password).unwrap(),
      }),
    }
  }

  async fn extract(
    req: Request<axum::body::Body>,
    state: &AppState<OneUserStore>,
  ) -> Result<CurrentUser, ApiError> {
    let (mut parts, _) = req.into_parts();
    CurrentUser::from_request_parts(&mut parts, state).await
  }

  fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  #[test]
  fn hash_then_verify_roundtrip() {
    let hash = hash_password("correct horse").unwrap();
    assert!(verify_password(&hash, "correct horse"));
    assert!(!verify_password(&hash, "correct battery"));
  }

  #[test]
  fn hashes_are_salted() {
    let a = hash_password("same password").unwrap();
    let b = hash_password("same password").unwrap();
    assert_ne!(a, b);
    assert!(verify_password(&a, "same password"));
    assert!(verify_password(&b, "same password"));
  }

  #[test]
  fn malformed_stored_hash_denies_instead_of_panicking() {
    assert!(!verify_password("not a phc string", "anything"));
    assert!(!verify_password("", "anything"));
  }

  #[tokio::test]
  async fn correct_credentials() {
    let state = make_state("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("alice", "secret"))
      .body(axum::body::Body::empty())
      .unwrap();
    let user = extract(req, &state).await.unwrap();
    assert_eq!(user.username, "alice");
  }

  #[tokio::test]
  async fn wrong_password() {
    let state = make_state("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("alice", "wrong"))
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthorized)
    ));
  }

  #[tokio::test]
  async fn unknown_user_is_indistinguishable_from_wrong_password() {
    let state = make_state("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("mallory", "secret"))
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthorized)
    ));
  }

  #[tokio::test]
  async fn missing_header() {
    let state = make_state("secret");
    let req = Request::builder().body(axum::body::Body::empty()).unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthorized)
    ));
  }

  #[tokio::test]
  async fn invalid_base64() {
    let state = make_state("secret");
    let req = Request::builder()
      .header(header::AUTHORIZATION, "Basic !!!not-base64!!!")
      .body(axum::body::Body::empty())
      .unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthorized)
    ));
  }
}
