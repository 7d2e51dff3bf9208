//! In-memory backend for the Gather stores.
//!
//! Simulates a remote service over a fixed seed dataset: every mutation
//! sleeps out an artificial latency, then computes and publishes a whole new
//! collection snapshot. The active principal is the only durable state,
//! written through to a pluggable [`SessionStorage`] blob.

mod directory;
mod events;
mod identity;
mod latency;
mod seed;
mod session;

pub use directory::Directory;
pub use events::MemoryEventStore;
pub use identity::{AllowAny, CredentialVerifier, MemoryIdentityStore};
pub use latency::Latency;
pub use seed::{seed_events, seed_principals};
pub use session::{FileSession, MemorySession, SessionStorage};

#[cfg(test)]
mod tests;
