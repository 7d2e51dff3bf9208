//! The principal directory — the fixed list `login` resolves against.
//!
//! Registration appends to it, so a freshly-registered principal can log in
//! again within the same process. Nothing here is durable; only the active
//! principal's session blob survives a restart.

use gather_core::principal::{Principal, PrincipalId};

use crate::seed::seed_principals;

#[derive(Debug, Clone)]
pub struct Directory {
  principals: Vec<Principal>,
}

impl Directory {
  pub fn new(principals: Vec<Principal>) -> Self { Self { principals } }

  /// The fixed demo directory.
  pub fn seeded() -> Self { Self::new(seed_principals()) }

  /// Exact email match, the only lookup `login` performs.
  pub fn find_by_email(&self, email: &str) -> Option<&Principal> {
    self.principals.iter().find(|p| p.email == email)
  }

  pub fn contains_email(&self, email: &str) -> bool {
    self.find_by_email(email).is_some()
  }

  /// The id a newly-registered principal receives, derived from the current
  /// directory size.
  pub fn next_id(&self) -> PrincipalId {
    PrincipalId(format!("user{}", self.principals.len() + 1))
  }

  pub fn push(&mut self, principal: Principal) {
    self.principals.push(principal);
  }
}
