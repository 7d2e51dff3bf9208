//! The fixed demo dataset both stores are seeded from.
//!
//! Three principals (a plain user, a verified organizer, an admin) and a
//! small spread of events across the category list, including one pending
//! submission and a couple of existing registrations so the derived views
//! have something to show immediately.

use chrono::{DateTime, TimeZone, Utc};
use gather_core::{
  category::CategoryId,
  event::{Attendee, AttendeeId, Event, EventId, EventStatus},
  principal::{Principal, PrincipalId, Role},
};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
  // All seed timestamps are valid by construction.
  Utc
    .with_ymd_and_hms(y, mo, d, h, mi, 0)
    .single()
    .unwrap_or_default()
}

pub fn seed_principals() -> Vec<Principal> {
  vec![
    Principal {
      id:                 PrincipalId::from("user1"),
      username:           "John Doe".into(),
      email:              "john@example.com".into(),
      phone:              "555-0101".into(),
      role:               Role::User,
      verified_organizer: false,
    },
    Principal {
      id:                 PrincipalId::from("user2"),
      username:           "Jane Smith".into(),
      email:              "jane@example.com".into(),
      phone:              "555-0102".into(),
      role:               Role::User,
      verified_organizer: true,
    },
    Principal {
      id:                 PrincipalId::from("admin1"),
      username:           "Alex Admin".into(),
      email:              "admin@example.com".into(),
      phone:              "555-0100".into(),
      role:               Role::Admin,
      verified_organizer: true,
    },
  ]
}

fn attendee(
  id: &str,
  name: &str,
  email: &str,
  phone: &str,
  party_size: u32,
  principal: Option<&str>,
) -> Attendee {
  Attendee {
    id: AttendeeId(id.to_owned()),
    name: name.into(),
    email: email.into(),
    phone: phone.into(),
    party_size,
    principal_id: principal.map(PrincipalId::from),
  }
}

pub fn seed_events() -> Vec<Event> {
  vec![
    Event {
      id:                    EventId::from("event1"),
      name:                  "Riverside Summer Concert".into(),
      description:           "An open-air evening of live music by local bands.".into(),
      location:              "Riverside Park Amphitheater".into(),
      starts_at:             at(2025, 6, 14, 18, 30),
      ends_at:               at(2025, 6, 14, 21, 0),
      registration_opens_at: at(2025, 5, 1, 9, 0),
      category:              CategoryId::from("music"),
      organizer_id:          PrincipalId::from("user2"),
      organizer_name:        "Jane Smith".into(),
      status:                EventStatus::Approved,
      image_url:             Some("https://images.example.com/concert.jpg".into()),
      attendees:             vec![
        attendee(
          "a1",
          "John Doe",
          "john@example.com",
          "555-0101",
          2,
          Some("user1"),
        ),
        attendee("a2", "Pat Walker", "pat@example.com", "555-0110", 1, None),
      ],
      created_at:            at(2025, 4, 20, 12, 0),
    },
    Event {
      id:                    EventId::from("event2"),
      name:                  "Community 5K Fun Run".into(),
      description:           "A casual run through the old town, all paces welcome.".into(),
      location:              "Old Town Square".into(),
      starts_at:             at(2025, 7, 5, 8, 0),
      ends_at:               at(2025, 7, 5, 11, 0),
      registration_opens_at: at(2025, 6, 1, 9, 0),
      category:              CategoryId::from("sports"),
      organizer_id:          PrincipalId::from("user2"),
      organizer_name:        "Jane Smith".into(),
      status:                EventStatus::Approved,
      image_url:             None,
      attendees:             Vec::new(),
      created_at:            at(2025, 5, 10, 15, 30),
    },
    Event {
      id:                    EventId::from("event3"),
      name:                  "Street Food Night Market".into(),
      description:           "Food trucks and stalls from across the region.".into(),
      location:              "Harbor Front".into(),
      starts_at:             at(2025, 8, 22, 17, 0),
      ends_at:               at(2025, 8, 22, 23, 0),
      registration_opens_at: at(2025, 8, 1, 9, 0),
      category:              CategoryId::from("food"),
      organizer_id:          PrincipalId::from("user1"),
      organizer_name:        "John Doe".into(),
      status:                EventStatus::Pending,
      image_url:             None,
      attendees:             Vec::new(),
      created_at:            at(2025, 7, 28, 10, 45),
    },
    Event {
      id:                    EventId::from("event4"),
      name:                  "Intro to Rust Workshop".into(),
      description:           "Hands-on systems programming session at the library.".into(),
      location:              "Central Library, Room 2".into(),
      starts_at:             at(2025, 9, 13, 10, 0),
      ends_at:               at(2025, 9, 13, 13, 0),
      registration_opens_at: at(2025, 8, 15, 9, 0),
      category:              CategoryId::from("tech"),
      organizer_id:          PrincipalId::from("admin1"),
      organizer_name:        "Alex Admin".into(),
      status:                EventStatus::Approved,
      image_url:             None,
      attendees:             vec![attendee(
        "a3",
        "Jane Smith",
        "jane@example.com",
        "555-0102",
        1,
        Some("user2"),
      )],
      created_at:            at(2025, 8, 2, 9, 15),
    },
  ]
}
