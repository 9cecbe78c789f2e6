/// Tag and author registry entries
///
/// Denormalized per-user side tables feeding autocomplete suggestions. The
/// tag registry is a superset of every tag attached to any playlist; the
/// author registry carries no referential integrity at all.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered tag name, unique per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    /// The tag name
    pub name: String,
    /// First registration time
    pub created_at: DateTime<Utc>,
}

/// A registered author name, unique per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    /// The author name
    pub name: String,
    /// First registration time
    pub created_at: DateTime<Utc>,
}
