//! Error types for `swot-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown level: {0:?}")]
  UnknownLevel(String),

  #[error("unknown paper kind: {0:?}")]
  UnknownPaperKind(String),

  #[error("leitner box out of range: {0}")]
  BoxOutOfRange(i64),

  #[error("malformed paper filename: {0:?}")]
  MalformedFilename(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
