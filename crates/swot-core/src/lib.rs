//! Domain types, the Leitner scheduler, and the [`store::StudyStore`]
//! trait.
//!
//! Everything here is plain data and pure logic: no HTTP, no database.
//! The other crates in the workspace all build on this one.

// Backend impls write store methods as plain `async fn`; silence the
// advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod card;
pub mod error;
pub mod paper;
pub mod scheduler;
pub mod store;
pub mod subject;
pub mod user;

pub use error::{Error, Result};
