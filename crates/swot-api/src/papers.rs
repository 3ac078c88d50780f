//! Handlers for the paper catalog.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/subjects` | The fixed subject taxonomy |
//! | `GET`  | `/papers/{subject}` | Optional `year`, `level`, `type`, `number` filters |
//! | `GET`  | `/papers/{subject}/years` | Distinct years, descending |
//!
//! The catalog is public: browsing papers needs no credentials. An
//! unknown subject is an empty list, never an error.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use swot_core::{
  paper::{Level, Paper, PaperFilter, PaperKind},
  store::StudyStore,
  subject::Subject,
};

use crate::{AppState, error::ApiError};

/// `GET /subjects`
pub async fn subjects<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Subject>>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let subjects = state
    .store
    .list_subjects()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(subjects))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub year:   Option<i32>,
  pub level:  Option<Level>,
  /// `QP` or `MS`.
  #[serde(rename = "type")]
  pub kind:   Option<PaperKind>,
  pub number: Option<i32>,
}

impl From<ListParams> for PaperFilter {
  fn from(p: ListParams) -> Self {
    PaperFilter {
      year:         p.year,
      level:        p.level,
      kind:         p.kind,
      paper_number: p.number,
    }
  }
}

/// `GET /papers/{subject}[?year=..&level=..&type=..&number=..]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Path(subject): Path<String>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Paper>>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let papers = state
    .store
    .list_papers(subject, params.into())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(papers))
}

/// `GET /papers/{subject}/years`
pub async fn years<S>(
  State(state): State<AppState<S>>,
  Path(subject): Path<String>,
) -> Result<Json<Vec<i32>>, ApiError>
where
  S: StudyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let years = state
    .store
    .list_years(subject)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(years))
}
