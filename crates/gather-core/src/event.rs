//! Event types — the central records of the Gather store.
//!
//! Events are only ever replaced whole: the store computes a new collection
//! snapshot for every mutation, so readers never observe a partially-updated
//! entry. Organizer identity is fixed at creation; status may move off
//! `Pending` exactly once, by an admin.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{category::CategoryId, principal::PrincipalId};

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Opaque event identifier (`event1`, `event2`, ... for seeded/created
/// entries).
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub String);

impl std::fmt::Display for EventId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

impl From<&str> for EventId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

/// Attendee identifier, freshly generated at registration time.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AttendeeId(pub String);

impl AttendeeId {
  pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }
}

impl std::fmt::Display for AttendeeId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Moderation state of an event.
///
/// Events created by admins start `Approved`; everything else starts
/// `Pending` and moves to `Approved` or `Rejected` through an admin update.
/// No transition back to `Pending` is exposed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
  Pending,
  Approved,
  Rejected,
}

impl EventStatus {
  pub fn is_approved(&self) -> bool { matches!(self, Self::Approved) }

  /// Initial status for an event created by a principal with `is_admin`.
  pub fn initial(creator_is_admin: bool) -> Self {
    if creator_is_admin { Self::Approved } else { Self::Pending }
  }
}

// ─── Attendee ────────────────────────────────────────────────────────────────

/// One registration entry on an event.
///
/// `principal_id` is a weak back-reference: present for registrations made
/// while signed in, absent for anonymous ones. It exists only for lookup and
/// the one-registration-per-principal check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
  pub id:           AttendeeId,
  pub name:         String,
  pub email:        String,
  pub phone:        String,
  /// Requested headcount for this registration.
  pub party_size:   u32,
  pub principal_id: Option<PrincipalId>,
}

/// Input to [`crate::store::EventStore::register`]. The id and the
/// back-reference are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAttendee {
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub party_size: u32,
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// A community event.
///
/// `organizer_name` is a cached display value denormalized from the identity
/// directory at creation time; principals are immutable here so it can never
/// go stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id:                    EventId,
  pub name:                  String,
  pub description:           String,
  pub location:              String,
  pub starts_at:             DateTime<Utc>,
  pub ends_at:               DateTime<Utc>,
  /// When registration opens. Display metadata only; the store does not gate
  /// registration on it.
  pub registration_opens_at: DateTime<Utc>,
  pub category:              CategoryId,
  pub organizer_id:          PrincipalId,
  pub organizer_name:        String,
  pub status:                EventStatus,
  pub image_url:             Option<String>,
  pub attendees:             Vec<Attendee>,
  pub created_at:            DateTime<Utc>,
}

impl Event {
  /// Whether `principal_id` has an attendee entry on this event.
  pub fn has_registration(&self, principal_id: &PrincipalId) -> bool {
    self
      .attendees
      .iter()
      .any(|a| a.principal_id.as_ref() == Some(principal_id))
  }
}

/// Input to [`crate::store::EventStore::create`]. Everything the store
/// derives (id, status, organizer identity, attendees, created_at) is
/// excluded.
#[derive(Debug, Clone)]
pub struct NewEvent {
  pub name:                  String,
  pub description:           String,
  pub location:              String,
  pub starts_at:             DateTime<Utc>,
  pub ends_at:               DateTime<Utc>,
  pub registration_opens_at: DateTime<Utc>,
  pub category:              CategoryId,
  pub image_url:             Option<String>,
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// Partial update for [`crate::store::EventStore::update`]: only supplied
/// fields are replaced.
///
/// `status` is the moderation control and takes effect only for admin
/// callers; a non-admin patch that sets it is rejected outright.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
  pub name:                  Option<String>,
  pub description:           Option<String>,
  pub location:              Option<String>,
  pub starts_at:             Option<DateTime<Utc>>,
  pub ends_at:               Option<DateTime<Utc>>,
  pub registration_opens_at: Option<DateTime<Utc>>,
  pub category:              Option<CategoryId>,
  pub image_url:             Option<Option<String>>,
  pub status:                Option<EventStatus>,
}

impl EventPatch {
  /// A patch that only moves the moderation status.
  pub fn status(status: EventStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }

  pub fn touches_status(&self) -> bool { self.status.is_some() }

  /// Apply this patch to `event`, replacing only the supplied fields.
  pub fn apply(&self, event: &mut Event) {
    if let Some(name) = &self.name {
      event.name = name.clone();
    }
    if let Some(description) = &self.description {
      event.description = description.clone();
    }
    if let Some(location) = &self.location {
      event.location = location.clone();
    }
    if let Some(starts_at) = self.starts_at {
      event.starts_at = starts_at;
    }
    if let Some(ends_at) = self.ends_at {
      event.ends_at = ends_at;
    }
    if let Some(opens_at) = self.registration_opens_at {
      event.registration_opens_at = opens_at;
    }
    if let Some(category) = &self.category {
      event.category = category.clone();
    }
    if let Some(image_url) = &self.image_url {
      event.image_url = image_url.clone();
    }
    if let Some(status) = self.status {
      event.status = status;
    }
  }
}
