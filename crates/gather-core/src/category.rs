//! The fixed category reference list.
//!
//! Categories are static display metadata: events reference them by id and
//! nothing in the system ever mutates them.

use serde::{Deserialize, Serialize};

/// Opaque category identifier (`music`, `sports`, ...).
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl std::fmt::Display for CategoryId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

impl From<&str> for CategoryId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

/// An id/name/icon tuple from the fixed reference list. Never persisted;
/// events carry only the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
  pub id:   CategoryId,
  pub name: &'static str,
  pub icon: &'static str,
}

impl Category {
  fn new(id: &str, name: &'static str, icon: &'static str) -> Self {
    Self { id: CategoryId::from(id), name, icon }
  }

  /// Every known category, in display order.
  pub fn all() -> Vec<Category> {
    vec![
      Category::new("music", "Music", "music"),
      Category::new("sports", "Sports", "trophy"),
      Category::new("arts", "Arts & Culture", "palette"),
      Category::new("food", "Food & Drink", "utensils"),
      Category::new("tech", "Technology", "cpu"),
      Category::new("community", "Community", "users"),
    ]
  }

  /// Look up a category by id. Unknown ids resolve to `None`; events may
  /// still carry them (the list is display metadata, not a constraint).
  pub fn find(id: &CategoryId) -> Option<Category> {
    Self::all().into_iter().find(|c| &c.id == id)
  }
}
