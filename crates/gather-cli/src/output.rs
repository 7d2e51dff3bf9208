//! Plain-text rendering of events and principals.

use gather_core::{
  category::Category,
  event::Event,
  format::{format_date, format_date_short, format_time_range},
  principal::Principal,
};

fn category_name(event: &Event) -> String {
  Category::find(&event.category)
    .map(|c| c.name.to_owned())
    .unwrap_or_else(|| event.category.to_string())
}

/// One-line summary used by listings.
pub fn event_line(event: &Event) -> String {
  format!(
    "{:<10} {:<10} {}  [{} / {}]  {} attending",
    event.id,
    event.status,
    event.name,
    format_date_short(event.starts_at),
    category_name(event),
    event.attendees.len(),
  )
}

/// Full detail block for `gather show`.
pub fn print_event(event: &Event) {
  println!("{}", event.name);
  println!("  id:           {}", event.id);
  println!("  status:       {}", event.status);
  println!("  organizer:    {} ({})", event.organizer_name, event.organizer_id);
  println!("  category:     {}", category_name(event));
  println!("  location:     {}", event.location);
  println!("  starts:       {}", format_date(event.starts_at));
  println!(
    "  time:         {}",
    format_time_range(event.starts_at, event.ends_at)
  );
  println!(
    "  registration: opens {}",
    format_date(event.registration_opens_at)
  );
  if let Some(url) = &event.image_url {
    println!("  image:        {url}");
  }
  println!("  attendees:    {}", event.attendees.len());
  for attendee in &event.attendees {
    let who = match &attendee.principal_id {
      Some(id) => format!("{} ({id})", attendee.name),
      None => format!("{} (walk-in)", attendee.name),
    };
    println!("    - {who}, party of {}", attendee.party_size);
  }
  println!();
  println!("  {}", event.description);
}

pub fn print_principal(principal: &Principal) {
  println!(
    "{} <{}> — {}{}",
    principal.username,
    principal.email,
    principal.role,
    if principal.verified_organizer {
      ", verified organizer"
    } else {
      ""
    },
  );
}
