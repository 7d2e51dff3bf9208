//! Integration tests for the in-memory stores against the seed dataset.

use chrono::{TimeZone, Utc};
use gather_core::{
  Error,
  category::CategoryId,
  event::{EventId, EventPatch, EventStatus, NewAttendee, NewEvent},
  principal::{NewPrincipal, Principal},
  store::{EventFilter, EventStore, IdentityStore},
};

use crate::{
  Directory, FileSession, Latency, MemoryEventStore, MemoryIdentityStore,
  MemorySession, seed_principals,
};

fn events() -> MemoryEventStore {
  MemoryEventStore::seeded(Latency::disabled())
}

fn identity(session: MemorySession) -> MemoryIdentityStore {
  MemoryIdentityStore::seeded(Box::new(session), Latency::disabled())
}

fn principal(email: &str) -> Principal {
  seed_principals()
    .into_iter()
    .find(|p| p.email == email)
    .expect("seed principal")
}

fn john() -> Principal { principal("john@example.com") }
fn jane() -> Principal { principal("jane@example.com") }
fn admin() -> Principal { principal("admin@example.com") }

fn new_event(name: &str) -> NewEvent {
  let starts = Utc.with_ymd_and_hms(2025, 10, 4, 14, 0, 0).unwrap();
  NewEvent {
    name: name.into(),
    description: "A brand-new gathering".into(),
    location: "Town Hall".into(),
    starts_at: starts,
    ends_at: starts + chrono::Duration::hours(2),
    registration_opens_at: starts - chrono::Duration::days(21),
    category: CategoryId::from("community"),
    image_url: None,
  }
}

fn walk_in() -> NewAttendee {
  NewAttendee {
    name:       "A".into(),
    email:      "a@x.com".into(),
    phone:      "1".into(),
    party_size: 2,
  }
}

// ─── Registration ────────────────────────────────────────────────────────────

#[tokio::test]
async fn registering_twice_fails_and_leaves_count_unchanged() {
  let store = events();
  let caller = john();
  let id = EventId::from("event2");

  store.register(&id, walk_in(), Some(&caller)).await.unwrap();
  let before = store.get(&id).await.unwrap().attendees.len();

  let err = store
    .register(&id, walk_in(), Some(&caller))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::AlreadyRegistered(_)));

  let after = store.get(&id).await.unwrap().attendees.len();
  assert_eq!(before, after);
}

#[tokio::test]
async fn anonymous_registration_has_no_back_reference() {
  let store = events();
  let id = EventId::from("event2");

  let updated = store.register(&id, walk_in(), None).await.unwrap();
  let entry = updated.attendees.last().unwrap();
  assert_eq!(entry.name, "A");
  assert_eq!(entry.party_size, 2);
  assert!(entry.principal_id.is_none());

  // No derived view picks up an anonymous registration.
  for p in [john(), jane(), admin()] {
    let registered = store.registered_by(&p.id).await;
    assert!(registered.iter().all(|e| e.id != id));
  }
}

#[tokio::test]
async fn anonymous_callers_may_register_twice() {
  let store = events();
  let id = EventId::from("event2");

  store.register(&id, walk_in(), None).await.unwrap();
  let updated = store.register(&id, walk_in(), None).await.unwrap();
  assert_eq!(updated.attendees.len(), 2);
}

#[tokio::test]
async fn registration_ignores_future_opening_time() {
  // The opening time is display metadata; the store never gates on it.
  let store = MemoryEventStore::empty(Latency::disabled());
  let mut new = new_event("Far Future");
  new.registration_opens_at = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap();

  let event = store.create(new, &jane()).await.unwrap();
  store.register(&event.id, walk_in(), Some(&john())).await.unwrap();
}

#[tokio::test]
async fn registration_is_open_on_rejected_events() {
  // Moderation status only controls visibility; whether to offer
  // registration on a non-approved event is a view decision.
  let store = events();
  let id = EventId::from("event3"); // john's pending submission

  store
    .update(&id, EventPatch::status(EventStatus::Rejected), &admin())
    .await
    .unwrap();
  assert_eq!(store.get(&id).await.unwrap().status, EventStatus::Rejected);

  let updated = store.register(&id, walk_in(), Some(&jane())).await.unwrap();
  assert_eq!(updated.attendees.len(), 1);
}

#[tokio::test]
async fn register_on_missing_event_is_not_found() {
  let store = events();
  let err = store
    .register(&EventId::from("event999"), walk_in(), None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

// ─── Unregistration ──────────────────────────────────────────────────────────

#[tokio::test]
async fn unregister_removes_every_matching_entry() {
  let store = events();
  let caller = john();
  let id = EventId::from("event1");

  // Seeded with one entry back-referencing john.
  assert!(!store.registered_by(&caller.id).await.is_empty());

  let updated = store.unregister(&id, &caller).await.unwrap();
  assert!(!updated.has_registration(&caller.id));
  assert!(store.registered_by(&caller.id).await.is_empty());

  // The anonymous seed entry is untouched.
  assert_eq!(updated.attendees.len(), 1);
}

#[tokio::test]
async fn unregister_without_registration_is_idempotent() {
  let store = events();
  let caller = jane();
  let id = EventId::from("event2");

  let before = store.get(&id).await.unwrap();
  let updated = store.unregister(&id, &caller).await.unwrap();
  assert_eq!(before, updated);
}

// ─── Authorization ───────────────────────────────────────────────────────────

#[tokio::test]
async fn update_by_stranger_is_forbidden_and_leaves_event_unchanged() {
  let store = events();
  let id = EventId::from("event1"); // organized by jane
  let before = store.get(&id).await.unwrap();

  let patch = EventPatch { name: Some("Hijacked".into()), ..Default::default() };
  let err = store.update(&id, patch, &john()).await.unwrap_err();
  assert!(matches!(err, Error::Forbidden(_)));

  assert_eq!(store.get(&id).await.unwrap(), before);
}

#[tokio::test]
async fn delete_by_stranger_is_forbidden() {
  let store = events();
  let id = EventId::from("event1");

  let err = store.delete(&id, &john()).await.unwrap_err();
  assert!(matches!(err, Error::Forbidden(_)));
  assert!(store.get(&id).await.is_some());
}

#[tokio::test]
async fn organizer_may_update_and_delete_their_own_event() {
  let store = events();
  let id = EventId::from("event3"); // organized by john

  let patch =
    EventPatch { location: Some("New Harbor".into()), ..Default::default() };
  let updated = store.update(&id, patch, &john()).await.unwrap();
  assert_eq!(updated.location, "New Harbor");
  // Unsupplied fields are untouched.
  assert_eq!(updated.name, "Street Food Night Market");

  store.delete(&id, &john()).await.unwrap();
  assert!(store.get(&id).await.is_none());
}

#[tokio::test]
async fn admin_supersedes_ownership() {
  let store = events();
  let id = EventId::from("event1"); // organized by jane

  let patch = EventPatch { name: Some("Renamed".into()), ..Default::default() };
  store.update(&id, patch, &admin()).await.unwrap();
  store.delete(&id, &admin()).await.unwrap();
  assert!(store.get(&id).await.is_none());
}

#[tokio::test]
async fn organizer_cannot_self_approve() {
  let store = events();
  let id = EventId::from("event3"); // john's pending event

  let err = store
    .update(&id, EventPatch::status(EventStatus::Approved), &john())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Forbidden(_)));
  assert_eq!(store.get(&id).await.unwrap().status, EventStatus::Pending);
}

// ─── Creation and moderation ─────────────────────────────────────────────────

#[tokio::test]
async fn create_by_non_admin_starts_pending() {
  let store = events();
  let event = store.create(new_event("Pending One"), &john()).await.unwrap();
  assert_eq!(event.status, EventStatus::Pending);
  assert_eq!(event.organizer_id, john().id);
  assert_eq!(event.organizer_name, "John Doe");
  assert!(event.attendees.is_empty());
}

#[tokio::test]
async fn create_by_admin_starts_approved() {
  let store = events();
  let event = store
    .create(new_event("Approved One"), &admin())
    .await
    .unwrap();
  assert_eq!(event.status, EventStatus::Approved);
}

#[tokio::test]
async fn pending_event_is_approved_by_admin_update() {
  let store = MemoryEventStore::empty(Latency::disabled());
  let caller = john();

  let event = store.create(new_event("Quiz Night"), &caller).await.unwrap();
  assert_eq!(event.status, EventStatus::Pending);
  assert_eq!(store.pending().await.len(), 1);

  store
    .update(&event.id, EventPatch::status(EventStatus::Approved), &admin())
    .await
    .unwrap();

  let mine = store.organized_by(&caller.id).await;
  assert_eq!(mine.len(), 1);
  assert_eq!(mine[0].status, EventStatus::Approved);
  assert!(store.pending().await.is_empty());
}

#[tokio::test]
async fn create_after_delete_never_reuses_an_id() {
  let store = events();
  store.delete(&EventId::from("event2"), &admin()).await.unwrap();

  let event = store.create(new_event("Fresh"), &admin()).await.unwrap();
  let ids: Vec<_> = store.list().await.iter().map(|e| e.id.clone()).collect();
  assert_eq!(ids.iter().filter(|i| **i == event.id).count(), 1);
}

// ─── Search and derived views ────────────────────────────────────────────────

#[tokio::test]
async fn search_text_is_case_insensitive_over_three_fields() {
  let store = events();

  let by_name = store
    .search(&EventFilter { text: Some("CONCERT".into()), ..Default::default() })
    .await;
  assert_eq!(by_name.len(), 1);

  let by_location = store
    .search(&EventFilter { text: Some("library".into()), ..Default::default() })
    .await;
  assert_eq!(by_location.len(), 1);
  assert_eq!(by_location[0].id, EventId::from("event4"));
}

#[tokio::test]
async fn default_view_filters_to_approved() {
  let store = events();
  let visible = store.search(&EventFilter::approved()).await;
  assert!(visible.iter().all(|e| e.status.is_approved()));
  assert!(visible.iter().all(|e| e.id != EventId::from("event3")));
}

#[tokio::test]
async fn search_by_category() {
  let store = events();
  let filter = EventFilter {
    category: Some(CategoryId::from("music")),
    ..Default::default()
  };
  let hits = store.search(&filter).await;
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].id, EventId::from("event1"));
}

#[tokio::test]
async fn list_preserves_insertion_order() {
  let store = events();
  let ids: Vec<_> = store.list().await.into_iter().map(|e| e.id.0).collect();
  assert_eq!(ids, ["event1", "event2", "event3", "event4"]);
}

// ─── Identity ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_by_exact_email_match() {
  let store = identity(MemorySession::new());

  let principal = store.login("john@example.com", "anything").await.unwrap();
  assert_eq!(principal.id.0, "user1");
  assert_eq!(store.current(), Some(principal));

  let err = store.login("nobody@x.com", "x").await.unwrap_err();
  assert!(matches!(err, Error::InvalidCredentials));
}

#[tokio::test]
async fn login_round_trips_through_session_storage() {
  let session = MemorySession::new();

  let first = identity(session.clone());
  let logged_in = first.login("jane@example.com", "pw").await.unwrap();
  drop(first);

  // A fresh store over the same blob restores the identical principal.
  let second = identity(session);
  assert_eq!(second.current(), Some(logged_in));
}

#[tokio::test]
async fn logout_clears_current_and_blob() {
  let session = MemorySession::new();
  let store = identity(session.clone());

  store.login("john@example.com", "pw").await.unwrap();
  store.logout().await.unwrap();
  assert_eq!(store.current(), None);

  let restored = identity(session);
  assert_eq!(restored.current(), None);
}

#[tokio::test]
async fn register_synthesizes_an_unverified_user() {
  let store = identity(MemorySession::new());

  let principal = store
    .register(NewPrincipal {
      username: "New Member".into(),
      email:    "new@example.com".into(),
      phone:    "555-0199".into(),
    })
    .await
    .unwrap();

  // Directory holds three seed principals, so the derived id is user4.
  assert_eq!(principal.id.0, "user4");
  assert_eq!(principal.role.to_string(), "user");
  assert!(!principal.verified_organizer);
  assert_eq!(store.current(), Some(principal.clone()));

  // The new principal is immediately loginable.
  let again = store.login("new@example.com", "pw").await.unwrap();
  assert_eq!(again, principal);
}

#[tokio::test]
async fn register_with_taken_email_fails() {
  let store = identity(MemorySession::new());

  let err = store
    .register(NewPrincipal {
      username: "Imposter".into(),
      email:    "john@example.com".into(),
      phone:    "555-0000".into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EmailAlreadyInUse(_)));
  assert_eq!(store.current(), None);
}

#[tokio::test]
async fn corrupt_session_blob_is_discarded() {
  let path = std::env::temp_dir()
    .join(format!("gather-session-{}.json", uuid::Uuid::new_v4()));
  std::fs::write(&path, "{ not json").unwrap();

  let store = MemoryIdentityStore::new(
    Directory::seeded(),
    Box::new(FileSession::new(&path)),
    Latency::disabled(),
  );
  assert_eq!(store.current(), None);
  // The blob itself was cleared, not just ignored.
  assert!(!path.exists());
}

#[tokio::test]
async fn file_session_round_trip() {
  let path = std::env::temp_dir()
    .join(format!("gather-session-{}.json", uuid::Uuid::new_v4()));

  let store = MemoryIdentityStore::seeded(
    Box::new(FileSession::new(&path)),
    Latency::disabled(),
  );
  let logged_in = store.login("admin@example.com", "pw").await.unwrap();
  drop(store);

  let restored = MemoryIdentityStore::seeded(
    Box::new(FileSession::new(&path)),
    Latency::disabled(),
  );
  assert_eq!(restored.current(), Some(logged_in));

  std::fs::remove_file(&path).ok();
}
