//! JSON REST API for Swot.
//!
//! Exposes an axum [`Router`] backed by any [`swot_core::store::StudyStore`].
//! Authentication is HTTP Basic, verified per request against the user
//! table — there is no cookie or session state. TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = swot_api::router(AppState { store: Arc::new(store) });
//! ```

pub mod auth;
pub mod error;
pub mod favorites;
pub mod flashcards;
pub mod papers;
pub mod study;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use swot_core::store::StudyStore;

pub use error::ApiError;

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store: Arc<S>,
}

/// Build a fully-materialised API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: StudyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Accounts
    .route("/register", post(users::register::<S>))
    .route("/me", get(users::me::<S>))
    // Catalog
    .route("/subjects", get(papers::subjects::<S>))
    .route("/papers/{subject}", get(papers::list::<S>))
    .route("/papers/{subject}/years", get(papers::years::<S>))
    // Favorites
    .route("/favorites", get(favorites::list::<S>))
    .route("/favorites/ids", get(favorites::ids::<S>))
    .route("/favorites/toggle", post(favorites::toggle::<S>))
    // Flashcards
    .route(
      "/flashcards",
      get(flashcards::list::<S>).post(flashcards::create::<S>),
    )
    .route(
      "/flashcards/{id}",
      get(flashcards::get_one::<S>)
        .put(flashcards::update::<S>)
        .delete(flashcards::delete::<S>),
    )
    // Study sessions
    .route("/study/queue", get(study::queue::<S>))
    .route("/study/next", get(study::next_card::<S>))
    .route("/study/{id}/review", post(study::review::<S>))
    .with_state(state)
}
