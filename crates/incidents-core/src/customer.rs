//! The locally cached customer projection and paging types.

use serde::{Deserialize, Serialize};

/// A customer as cached in the local record store.
///
/// This is a projection of a remote business partner, refreshed whenever an
/// incident referencing it is written. It may be stale; it is never the
/// source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
  /// Business partner id.
  pub id:         String,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub name:       Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
}

impl Customer {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      ..Self::default()
    }
  }
}

/// Caller-supplied paging window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
  pub limit:  Option<usize>,
  #[serde(default)]
  pub offset: usize,
}

/// One page of rows plus the count reported alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  pub rows:  Vec<T>,
  pub total: usize,
}

impl<T> Page<T> {
  /// A page whose reported total is its own length.
  pub fn counted(rows: Vec<T>) -> Self {
    let total = rows.len();
    Self { rows, total }
  }
}
