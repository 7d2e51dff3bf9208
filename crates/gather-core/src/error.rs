//! Error types for `gather-core`.

use thiserror::Error;

use crate::event::EventId;

/// Every store operation either fully succeeds or fails with one of these;
/// no operation leaves partial effects behind.
#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid email or password")]
  InvalidCredentials,

  #[error("email already in use: {0}")]
  EmailAlreadyInUse(String),

  #[error("not signed in")]
  Unauthenticated,

  #[error("event not found: {0}")]
  NotFound(EventId),

  #[error("no permission to modify event {0}")]
  Forbidden(EventId),

  #[error("already registered for event {0}")]
  AlreadyRegistered(EventId),

  #[error("session blob error: {0}")]
  Session(#[from] serde_json::Error),

  #[error("unexpected error: {0}")]
  Unexpected(String),
}

impl From<std::io::Error> for Error {
  fn from(e: std::io::Error) -> Self { Self::Unexpected(e.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
