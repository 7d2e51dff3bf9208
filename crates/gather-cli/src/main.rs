//! `gather` — command-line surface for the Gather events stores.
//!
//! Reads `gather.toml` (or the path specified with `--config`), builds the
//! seeded in-memory stores, restores the session blob, and maps subcommands
//! onto store operations. Only the active principal survives between runs.

mod output;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context as _, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use gather_core::{
  Error,
  category::{Category, CategoryId},
  event::{EventId, EventPatch, EventStatus, NewAttendee, NewEvent},
  principal::{NewPrincipal, Principal},
  store::{EventFilter, EventStore, IdentityStore},
};
use gather_store_memory::{
  FileSession, Latency, MemoryEventStore, MemoryIdentityStore,
};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "gather", about = "Community events from the command line")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "gather.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Sign in as a directory principal.
  Login {
    email:  String,
    /// Accepted unverified by the default credential policy.
    #[arg(long, default_value = "")]
    secret: String,
  },
  /// Create a new account and sign in.
  Signup {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email:    String,
    #[arg(long)]
    phone:    String,
  },
  /// Sign out and clear the stored session.
  Logout,
  /// Show the current principal.
  Whoami,
  /// List events (approved only, unless an admin passes --all).
  List {
    /// Free-text filter over name, description, and location.
    #[arg(long)]
    query:    Option<String>,
    /// Restrict to one category id (see `gather categories`).
    #[arg(long)]
    category: Option<String>,
    /// Restrict to one moderation status; anything but `approved` is
    /// admin-only.
    #[arg(long)]
    status:   Option<EventStatus>,
    /// Include pending and rejected events (admins only).
    #[arg(long)]
    all:      bool,
  },
  /// Show one event in full.
  Show { id: String },
  /// The known category ids.
  Categories,
  /// Events organized by the current principal.
  Mine,
  /// Events the current principal is registered for.
  Attending,
  /// Events awaiting moderation (admins only).
  Pending,
  /// Submit a new event.
  Create {
    #[arg(long)]
    name:        String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    location:    String,
    /// RFC 3339, e.g. 2025-06-14T18:30:00Z.
    #[arg(long)]
    starts:      DateTime<Utc>,
    #[arg(long)]
    ends:        DateTime<Utc>,
    /// When registration opens; defaults to now.
    #[arg(long)]
    opens:       Option<DateTime<Utc>>,
    #[arg(long)]
    category:    String,
    #[arg(long)]
    image_url:   Option<String>,
  },
  /// Update fields of an event you organize (or any event, as admin).
  Update {
    id:          String,
    #[arg(long)]
    name:        Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    location:    Option<String>,
    #[arg(long)]
    starts:      Option<DateTime<Utc>>,
    #[arg(long)]
    ends:        Option<DateTime<Utc>>,
    #[arg(long)]
    opens:       Option<DateTime<Utc>>,
    #[arg(long)]
    category:    Option<String>,
    /// New image URL; pass an empty value to clear the image.
    #[arg(long)]
    image_url:   Option<String>,
  },
  /// Delete an event you organize (or any event, as admin).
  Delete { id: String },
  /// Approve a pending event (admins only).
  Approve { id: String },
  /// Reject a pending event (admins only).
  Reject { id: String },
  /// Register for an event. Contact fields default to the signed-in
  /// principal; anonymous registration must supply all three.
  Attend {
    id:         String,
    #[arg(long)]
    name:       Option<String>,
    #[arg(long)]
    email:      Option<String>,
    #[arg(long)]
    phone:      Option<String>,
    #[arg(long, default_value_t = 1)]
    party_size: u32,
  },
  /// Cancel your registration for an event.
  Unattend { id: String },
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn default_session_path() -> PathBuf { PathBuf::from("gather-session.json") }

const fn default_latency_ms() -> u64 { 1000 }

/// Shape of the TOML config file; every field has a default so the file is
/// optional.
#[derive(Debug, Clone, Deserialize)]
struct AppConfig {
  #[serde(default = "default_session_path")]
  session_path:      PathBuf,
  /// Base simulated latency per mutating call, in milliseconds.
  #[serde(default = "default_latency_ms")]
  latency_ms:        u64,
  /// Extra random latency on top of the base, in milliseconds.
  #[serde(default)]
  latency_jitter_ms: u64,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("GATHER"))
    .build()
    .context("failed to read config")?;
  let cfg: AppConfig = settings
    .try_deserialize()
    .context("failed to deserialise AppConfig")?;

  let latency = Latency::jittered(
    Duration::from_millis(cfg.latency_ms),
    Duration::from_millis(cfg.latency_jitter_ms),
  );
  let identity = MemoryIdentityStore::seeded(
    Box::new(FileSession::new(&cfg.session_path)),
    latency,
  );
  let events = MemoryEventStore::seeded(latency);

  run(cli.command, &identity, &events).await
}

/// The signed-in principal, or the `Unauthenticated` failure the stores
/// would report.
fn require_principal(identity: &MemoryIdentityStore) -> anyhow::Result<Principal> {
  identity.current().ok_or_else(|| Error::Unauthenticated.into())
}

/// `--image-url` value to patch field: an empty value clears the image.
fn image_url_field(value: String) -> Option<String> {
  if value.is_empty() { None } else { Some(value) }
}

async fn run(
  command: Command,
  identity: &MemoryIdentityStore,
  events: &MemoryEventStore,
) -> anyhow::Result<()> {
  match command {
    // ── Identity ──────────────────────────────────────────────────────
    Command::Login { email, secret } => {
      let principal = identity.login(&email, &secret).await?;
      print!("signed in as ");
      output::print_principal(&principal);
    }
    Command::Signup { username, email, phone } => {
      let principal = identity
        .register(NewPrincipal { username, email, phone })
        .await?;
      print!("welcome, ");
      output::print_principal(&principal);
    }
    Command::Logout => {
      identity.logout().await?;
      println!("signed out");
    }
    Command::Whoami => match identity.current() {
      Some(principal) => output::print_principal(&principal),
      None => println!("not signed in"),
    },

    // ── Browsing ──────────────────────────────────────────────────────
    Command::List { query, category, status, all } => {
      let mut filter = EventFilter::approved();
      let needs_admin =
        all || status.is_some_and(|s| s != EventStatus::Approved);
      if needs_admin {
        let caller = require_principal(identity)?;
        if !caller.is_admin() {
          bail!("only admins may list beyond approved events");
        }
      }
      if all {
        filter.status = None;
      }
      if status.is_some() {
        filter.status = status;
      }
      filter.text = query;
      filter.category = category.map(CategoryId);

      for event in events.search(&filter).await {
        println!("{}", output::event_line(&event));
      }
    }
    Command::Show { id } => {
      let id = EventId(id);
      match events.get(&id).await {
        Some(event) => output::print_event(&event),
        None => return Err(Error::NotFound(id).into()),
      }
    }
    Command::Categories => {
      for category in Category::all() {
        println!("{:<12} {}", category.id, category.name);
      }
    }
    Command::Mine => {
      let caller = require_principal(identity)?;
      for event in events.organized_by(&caller.id).await {
        println!("{}", output::event_line(&event));
      }
    }
    Command::Attending => {
      let caller = require_principal(identity)?;
      for event in events.registered_by(&caller.id).await {
        println!("{}", output::event_line(&event));
      }
    }
    Command::Pending => {
      let caller = require_principal(identity)?;
      if !caller.is_admin() {
        bail!("pending requires an admin");
      }
      for event in events.pending().await {
        println!("{}", output::event_line(&event));
      }
    }

    // ── Organizing ────────────────────────────────────────────────────
    Command::Create {
      name,
      description,
      location,
      starts,
      ends,
      opens,
      category,
      image_url,
    } => {
      let caller = require_principal(identity)?;
      let event = events
        .create(
          NewEvent {
            name,
            description,
            location,
            starts_at: starts,
            ends_at: ends,
            registration_opens_at: opens.unwrap_or_else(Utc::now),
            category: CategoryId(category),
            image_url,
          },
          &caller,
        )
        .await?;
      println!("created {} ({})", event.id, event.status);
    }
    Command::Update {
      id,
      name,
      description,
      location,
      starts,
      ends,
      opens,
      category,
      image_url,
    } => {
      let caller = require_principal(identity)?;
      let patch = EventPatch {
        name,
        description,
        location,
        starts_at: starts,
        ends_at: ends,
        registration_opens_at: opens,
        category: category.map(CategoryId),
        image_url: image_url.map(image_url_field),
        ..EventPatch::default()
      };
      let event = events.update(&EventId(id), patch, &caller).await?;
      println!("updated {}", event.id);
    }
    Command::Delete { id } => {
      let caller = require_principal(identity)?;
      events.delete(&EventId(id), &caller).await?;
      println!("deleted");
    }
    Command::Approve { id } => {
      let caller = require_principal(identity)?;
      let event = events
        .update(
          &EventId(id),
          EventPatch::status(EventStatus::Approved),
          &caller,
        )
        .await?;
      println!("approved {}", event.id);
    }
    Command::Reject { id } => {
      let caller = require_principal(identity)?;
      let event = events
        .update(
          &EventId(id),
          EventPatch::status(EventStatus::Rejected),
          &caller,
        )
        .await?;
      println!("rejected {}", event.id);
    }

    // ── Attending ─────────────────────────────────────────────────────
    Command::Attend { id, name, email, phone, party_size } => {
      let caller = identity.current();
      let attendee = match &caller {
        Some(principal) => NewAttendee {
          name:       name.unwrap_or_else(|| principal.username.clone()),
          email:      email.unwrap_or_else(|| principal.email.clone()),
          phone:      phone.unwrap_or_else(|| principal.phone.clone()),
          party_size,
        },
        None => {
          let (Some(name), Some(email), Some(phone)) = (name, email, phone)
          else {
            bail!(
              "anonymous registration needs --name, --email, and --phone"
            );
          };
          NewAttendee { name, email, phone, party_size }
        }
      };
      let event = events
        .register(&EventId(id), attendee, caller.as_ref())
        .await?;
      println!(
        "registered for {} ({} attending)",
        event.name,
        event.attendees.len()
      );
    }
    Command::Unattend { id } => {
      let caller = require_principal(identity)?;
      let event = events.unregister(&EventId(id), &caller).await?;
      println!("no longer attending {}", event.name);
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_image_url_clears_non_empty_sets() {
    assert_eq!(image_url_field(String::new()), None);
    assert_eq!(
      image_url_field("https://example.com/a.jpg".into()),
      Some("https://example.com/a.jpg".into())
    );
  }
}
