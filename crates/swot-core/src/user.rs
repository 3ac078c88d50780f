//! User identity types.
//!
//! The password hash never leaves the store boundary except inside
//! [`Credentials`], which the auth layer consumes for verification and
//! never serialises.

use serde::Serialize;

/// A registered user. Safe to serialise onto the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
  pub id:       i64,
  pub username: String,
}

/// A user together with their stored credential, as read for
/// authentication. Deliberately not `Serialize`.
#[derive(Debug, Clone)]
pub struct Credentials {
  pub user:          User,
  /// PHC-encoded hash (salt + parameters + derived key in one string).
  pub password_hash: String,
}
