//! [`MemoryEventStore`] — the in-memory implementation of [`EventStore`].
//!
//! The collection lives behind `RwLock<Arc<Vec<Event>>>`. Reads clone the
//! `Arc`; mutations sleep out their latency, then compute the next vector
//! and publish it whole while holding the write guard. Readers therefore
//! never observe a half-applied mutation, and overlapping writers are
//! ordered by lock acquisition.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use gather_core::{
  Error, Result,
  event::{
    Attendee, AttendeeId, Event, EventId, EventPatch, EventStatus,
    NewAttendee, NewEvent,
  },
  principal::{Principal, PrincipalId},
  store::{EventFilter, EventStore},
};

use crate::{Latency, seed::seed_events};

pub struct MemoryEventStore {
  events:  RwLock<Arc<Vec<Event>>>,
  latency: Latency,
}

impl MemoryEventStore {
  pub fn new(events: Vec<Event>, latency: Latency) -> Self {
    Self { events: RwLock::new(Arc::new(events)), latency }
  }

  /// A store over the fixed demo dataset.
  pub fn seeded(latency: Latency) -> Self {
    Self::new(seed_events(), latency)
  }

  pub fn empty(latency: Latency) -> Self { Self::new(Vec::new(), latency) }

  /// The current published snapshot.
  fn snapshot(&self) -> Arc<Vec<Event>> {
    Arc::clone(&self.events.read().unwrap_or_else(PoisonError::into_inner))
  }

  fn write_guard(
    &self,
  ) -> std::sync::RwLockWriteGuard<'_, Arc<Vec<Event>>> {
    self.events.write().unwrap_or_else(PoisonError::into_inner)
  }

  /// Organizer-or-admin check shared by `update` and `delete`.
  fn authorize(event: &Event, caller: &Principal) -> Result<()> {
    if event.organizer_id == caller.id || caller.is_admin() {
      Ok(())
    } else {
      Err(Error::Forbidden(event.id.clone()))
    }
  }

  /// The id a freshly-created event receives. Derived from the collection
  /// size, skipping over ids that deletes have left in use.
  fn next_id(events: &[Event]) -> EventId {
    let mut n = events.len() + 1;
    while events.iter().any(|e| e.id.0 == format!("event{n}")) {
      n += 1;
    }
    EventId(format!("event{n}"))
  }
}

impl EventStore for MemoryEventStore {
  type Error = Error;

  // ── Reads ──────────────────────────────────────────────────────────────

  async fn list(&self) -> Vec<Event> { self.snapshot().to_vec() }

  async fn get(&self, id: &EventId) -> Option<Event> {
    self.snapshot().iter().find(|e| &e.id == id).cloned()
  }

  async fn search(&self, filter: &EventFilter) -> Vec<Event> {
    self
      .snapshot()
      .iter()
      .filter(|e| filter.matches(e))
      .cloned()
      .collect()
  }

  async fn organized_by(&self, principal_id: &PrincipalId) -> Vec<Event> {
    self
      .snapshot()
      .iter()
      .filter(|e| &e.organizer_id == principal_id)
      .cloned()
      .collect()
  }

  async fn registered_by(&self, principal_id: &PrincipalId) -> Vec<Event> {
    self
      .snapshot()
      .iter()
      .filter(|e| e.has_registration(principal_id))
      .cloned()
      .collect()
  }

  async fn pending(&self) -> Vec<Event> {
    self
      .snapshot()
      .iter()
      .filter(|e| e.status == EventStatus::Pending)
      .cloned()
      .collect()
  }

  // ── Mutations ──────────────────────────────────────────────────────────

  async fn create(&self, new: NewEvent, caller: &Principal) -> Result<Event> {
    self.latency.simulate().await;

    let mut guard = self.write_guard();
    let event = Event {
      id:                    Self::next_id(&guard),
      name:                  new.name,
      description:           new.description,
      location:              new.location,
      starts_at:             new.starts_at,
      ends_at:               new.ends_at,
      registration_opens_at: new.registration_opens_at,
      category:              new.category,
      organizer_id:          caller.id.clone(),
      organizer_name:        caller.username.clone(),
      status:                EventStatus::initial(caller.is_admin()),
      image_url:             new.image_url,
      attendees:             Vec::new(),
      created_at:            Utc::now(),
    };

    let mut next = guard.as_ref().clone();
    next.push(event.clone());
    *guard = Arc::new(next);

    tracing::info!(event = %event.id, status = %event.status, "created event");
    Ok(event)
  }

  async fn update(
    &self,
    id: &EventId,
    patch: EventPatch,
    caller: &Principal,
  ) -> Result<Event> {
    self.latency.simulate().await;

    let mut guard = self.write_guard();
    let index = guard
      .iter()
      .position(|e| &e.id == id)
      .ok_or_else(|| Error::NotFound(id.clone()))?;

    Self::authorize(&guard[index], caller)?;
    // Status is the moderation control; organizers cannot self-approve.
    if patch.touches_status() && !caller.is_admin() {
      return Err(Error::Forbidden(id.clone()));
    }

    let mut next = guard.as_ref().clone();
    patch.apply(&mut next[index]);
    let updated = next[index].clone();
    *guard = Arc::new(next);

    tracing::info!(event = %updated.id, "updated event");
    Ok(updated)
  }

  async fn delete(&self, id: &EventId, caller: &Principal) -> Result<()> {
    self.latency.simulate().await;

    let mut guard = self.write_guard();
    let event = guard
      .iter()
      .find(|e| &e.id == id)
      .ok_or_else(|| Error::NotFound(id.clone()))?;
    Self::authorize(event, caller)?;

    let next = guard
      .iter()
      .filter(|e| &e.id != id)
      .cloned()
      .collect::<Vec<_>>();
    *guard = Arc::new(next);

    tracing::info!(event = %id, "deleted event");
    Ok(())
  }

  async fn register(
    &self,
    id: &EventId,
    attendee: NewAttendee,
    caller: Option<&Principal>,
  ) -> Result<Event> {
    self.latency.simulate().await;

    let mut guard = self.write_guard();
    let index = guard
      .iter()
      .position(|e| &e.id == id)
      .ok_or_else(|| Error::NotFound(id.clone()))?;

    if let Some(principal) = caller
      && guard[index].has_registration(&principal.id)
    {
      return Err(Error::AlreadyRegistered(id.clone()));
    }

    let entry = Attendee {
      id:           AttendeeId::generate(),
      name:         attendee.name,
      email:        attendee.email,
      phone:        attendee.phone,
      party_size:   attendee.party_size,
      principal_id: caller.map(|p| p.id.clone()),
    };

    let mut next = guard.as_ref().clone();
    next[index].attendees.push(entry);
    let updated = next[index].clone();
    *guard = Arc::new(next);

    tracing::info!(event = %id, "registered attendee");
    Ok(updated)
  }

  async fn unregister(
    &self,
    id: &EventId,
    caller: &Principal,
  ) -> Result<Event> {
    self.latency.simulate().await;

    let mut guard = self.write_guard();
    let index = guard
      .iter()
      .position(|e| &e.id == id)
      .ok_or_else(|| Error::NotFound(id.clone()))?;

    // Idempotent: removing zero matching entries is still a success.
    let mut next = guard.as_ref().clone();
    next[index]
      .attendees
      .retain(|a| a.principal_id.as_ref() != Some(&caller.id));
    let updated = next[index].clone();
    *guard = Arc::new(next);

    tracing::info!(event = %id, principal = %caller.id, "unregistered");
    Ok(updated)
  }
}
