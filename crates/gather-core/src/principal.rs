//! Principal — an authenticated (or registrable) member of the community.
//!
//! Principals are immutable once created: there is no profile-edit flow.
//! The active principal is the only record that survives a restart, as a
//! single serialized blob in session storage.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Opaque principal identifier. Seed principals use short ids like `user1`;
/// registration derives new ids from the directory size.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PrincipalId(pub String);

impl std::fmt::Display for PrincipalId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

impl From<&str> for PrincipalId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

/// The authorization role of a principal. Admins supersede ownership checks
/// everywhere; there is no intermediate role.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  User,
  Admin,
}

/// A member of the directory, or the synthesized result of registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
  pub id:                 PrincipalId,
  pub username:           String,
  pub email:              String,
  pub phone:              String,
  pub role:               Role,
  pub verified_organizer: bool,
}

impl Principal {
  pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}

/// Input to [`crate::store::IdentityStore::register`]. Role and organizer
/// verification are never caller-supplied; registration always produces an
/// unverified `user`.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
  pub username: String,
  pub email:    String,
  pub phone:    String,
}
