//! [`MemoryIdentityStore`] — the in-memory implementation of
//! [`IdentityStore`].

use std::sync::{PoisonError, RwLock};

use gather_core::{
  Error, Result,
  principal::{NewPrincipal, Principal, Role},
  store::IdentityStore,
};

use crate::{Directory, Latency, SessionStorage};

// ─── Credential verification ─────────────────────────────────────────────────

/// Decides whether a presented secret is acceptable for a directory
/// principal.
///
/// The seam exists so the policy is explicit and swappable; real hashing is
/// out of scope here.
pub trait CredentialVerifier: Send + Sync {
  fn verify(&self, principal: &Principal, secret: &str) -> bool;
}

/// Accepts any secret for any known principal, matching the mock backend
/// this store simulates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAny;

impl CredentialVerifier for AllowAny {
  fn verify(&self, _principal: &Principal, _secret: &str) -> bool { true }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Identity over a fixed directory, with the active principal written
/// through to session storage on every successful login/register/logout.
pub struct MemoryIdentityStore {
  directory: RwLock<Directory>,
  current:   RwLock<Option<Principal>>,
  session:   Box<dyn SessionStorage>,
  verifier:  Box<dyn CredentialVerifier>,
  latency:   Latency,
}

impl MemoryIdentityStore {
  /// Build a store around `directory`, restoring any principal the session
  /// blob holds. An unreadable blob means starting signed out, never a
  /// construction failure.
  pub fn new(
    directory: Directory,
    session: Box<dyn SessionStorage>,
    latency: Latency,
  ) -> Self {
    Self::with_verifier(directory, session, Box::new(AllowAny), latency)
  }

  pub fn with_verifier(
    directory: Directory,
    session: Box<dyn SessionStorage>,
    verifier: Box<dyn CredentialVerifier>,
    latency: Latency,
  ) -> Self {
    let restored = match session.load() {
      Ok(principal) => principal,
      Err(e) => {
        tracing::warn!("failed to restore session: {e}");
        None
      }
    };

    Self {
      directory: RwLock::new(directory),
      current: RwLock::new(restored),
      session,
      verifier,
      latency,
    }
  }

  /// A store over the fixed demo directory.
  pub fn seeded(session: Box<dyn SessionStorage>, latency: Latency) -> Self {
    Self::new(Directory::seeded(), session, latency)
  }

  fn set_current(&self, principal: Option<Principal>) {
    *self
      .current
      .write()
      .unwrap_or_else(PoisonError::into_inner) = principal;
  }
}

impl IdentityStore for MemoryIdentityStore {
  type Error = Error;

  async fn login(&self, email: &str, secret: &str) -> Result<Principal> {
    self.latency.simulate().await;

    let principal = self
      .directory
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .find_by_email(email)
      .cloned()
      .ok_or(Error::InvalidCredentials)?;

    if !self.verifier.verify(&principal, secret) {
      return Err(Error::InvalidCredentials);
    }

    self.session.store(&principal)?;
    self.set_current(Some(principal.clone()));
    tracing::info!(principal = %principal.id, "logged in");
    Ok(principal)
  }

  async fn register(&self, new: NewPrincipal) -> Result<Principal> {
    self.latency.simulate().await;

    // The uniqueness check and the append happen under one write guard so
    // overlapping registrations cannot both claim an email.
    let principal = {
      let mut directory = self
        .directory
        .write()
        .unwrap_or_else(PoisonError::into_inner);
      if directory.contains_email(&new.email) {
        return Err(Error::EmailAlreadyInUse(new.email));
      }
      let principal = Principal {
        id:                 directory.next_id(),
        username:           new.username,
        email:              new.email,
        phone:              new.phone,
        role:               Role::User,
        verified_organizer: false,
      };
      // Persist first so a storage failure leaves the directory untouched.
      self.session.store(&principal)?;
      directory.push(principal.clone());
      principal
    };

    self.set_current(Some(principal.clone()));
    tracing::info!(principal = %principal.id, "registered");
    Ok(principal)
  }

  async fn logout(&self) -> Result<()> {
    self.session.clear()?;
    self.set_current(None);
    tracing::info!("logged out");
    Ok(())
  }

  fn current(&self) -> Option<Principal> {
    self
      .current
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }
}
