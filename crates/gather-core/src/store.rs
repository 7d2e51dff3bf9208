//! The `IdentityStore` and `EventStore` traits and supporting query types.
//!
//! The traits are implemented by backends (e.g. `gather-store-memory`).
//! Higher layers (`gather-cli`) depend on these abstractions, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  category::CategoryId,
  event::{Event, EventId, EventPatch, EventStatus, NewAttendee, NewEvent},
  principal::{NewPrincipal, Principal, PrincipalId},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`EventStore::search`].
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
  /// Case-insensitive free-text filter over name, description, and location.
  pub text:     Option<String>,
  /// Restrict to a single category.
  pub category: Option<CategoryId>,
  /// Restrict to a moderation status. Non-admin views pass
  /// `Some(Approved)`; `None` means all statuses.
  pub status:   Option<EventStatus>,
}

impl EventFilter {
  /// Only approved events — the default view for everyone but admins.
  pub fn approved() -> Self {
    Self { status: Some(EventStatus::Approved), ..Self::default() }
  }

  pub fn matches(&self, event: &Event) -> bool {
    if let Some(status) = self.status
      && event.status != status
    {
      return false;
    }
    if let Some(category) = &self.category
      && &event.category != category
    {
      return false;
    }
    if let Some(text) = &self.text {
      let needle = text.to_lowercase();
      if !needle.is_empty() {
        let hit = event.name.to_lowercase().contains(&needle)
          || event.description.to_lowercase().contains(&needle)
          || event.location.to_lowercase().contains(&needle);
        if !hit {
          return false;
        }
      }
    }
    true
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// Abstraction over the identity side: a fixed directory of principals plus
/// one "current" slot persisted across restarts.
///
/// All async methods return `Send` futures so the traits can be used in
/// multi-threaded async runtimes. Every successful login/register/logout
/// writes through to session storage immediately.
pub trait IdentityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up a principal by exact email match, run the secret through the
  /// backend's credential verifier, persist the principal, and make it
  /// current.
  fn login<'a>(
    &'a self,
    email: &'a str,
    secret: &'a str,
  ) -> impl Future<Output = Result<Principal, Self::Error>> + Send + 'a;

  /// Synthesize a new `user`-role principal, persist it, and make it
  /// current. Fails if the email is already taken.
  fn register(
    &self,
    new: NewPrincipal,
  ) -> impl Future<Output = Result<Principal, Self::Error>> + Send + '_;

  /// Clear the current principal and its persisted copy. Always succeeds.
  fn logout(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Synchronous read of the current principal (restored from session
  /// storage at construction, or set by login/register).
  fn current(&self) -> Option<Principal>;
}

// ─── Events ──────────────────────────────────────────────────────────────────

/// Abstraction over the event collection.
///
/// Mutating operations model backend latency before resolving, then publish
/// a whole new collection snapshot; readers only ever observe fully-formed
/// snapshots. Registration is the one mutation that permits an anonymous
/// caller.
pub trait EventStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The full current snapshot, insertion order preserved.
  fn list(&self) -> impl Future<Output = Vec<Event>> + Send + '_;

  /// Retrieve a single event. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    id: &'a EventId,
  ) -> impl Future<Output = Option<Event>> + Send + 'a;

  /// Events matching `filter`, in insertion order.
  fn search<'a>(
    &'a self,
    filter: &'a EventFilter,
  ) -> impl Future<Output = Vec<Event>> + Send + 'a;

  /// Events organized by `principal_id`.
  fn organized_by<'a>(
    &'a self,
    principal_id: &'a PrincipalId,
  ) -> impl Future<Output = Vec<Event>> + Send + 'a;

  /// Events holding an attendee entry whose back-reference is
  /// `principal_id`.
  fn registered_by<'a>(
    &'a self,
    principal_id: &'a PrincipalId,
  ) -> impl Future<Output = Vec<Event>> + Send + 'a;

  /// Events awaiting moderation (the admin dashboard view).
  fn pending(&self) -> impl Future<Output = Vec<Event>> + Send + '_;

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Append a new event. Status follows the creator's role: `Approved` for
  /// admins, `Pending` otherwise.
  fn create<'a>(
    &'a self,
    new: NewEvent,
    caller: &'a Principal,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + 'a;

  /// Replace the supplied fields of an existing event. Only the organizer
  /// or an admin may update; only an admin patch may touch the status.
  fn update<'a>(
    &'a self,
    id: &'a EventId,
    patch: EventPatch,
    caller: &'a Principal,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + 'a;

  /// Remove an event. Same authorization rule as `update`.
  fn delete<'a>(
    &'a self,
    id: &'a EventId,
    caller: &'a Principal,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Append an attendee entry. An authenticated caller may hold at most one
  /// entry per event; anonymous registration carries no back-reference.
  fn register<'a>(
    &'a self,
    id: &'a EventId,
    attendee: NewAttendee,
    caller: Option<&'a Principal>,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + 'a;

  /// Remove every attendee entry whose back-reference is the caller.
  /// Removing zero entries is not an error.
  fn unregister<'a>(
    &'a self,
    id: &'a EventId,
    caller: &'a Principal,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + 'a;
}
