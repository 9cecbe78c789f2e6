//! Cuelist Core
//!
//! Domain types, traits, and error handling for Cuelist, a personal
//! media-playlist manager.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `ContentItem`, `TagSet`, registry entries
//! - **Seams**: the `Store` document-store trait with its atomic `WriteOp`
//!   batch model and snapshot `Subscription`s, and the `IdentityProvider`
//!   trait
//! - **Pure helpers**: platform detection, share-link format, validation
//! - **Error Handling**: unified `CuelistError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cuelist_core::types::{Container, Playlist, TagSet, UserId};
//!
//! let user = UserId::new("user-1");
//! let playlist = Playlist::new(user, "Commute", TagSet::parse("news, daily"), 0);
//! assert_eq!(playlist.tags.names(), ["news", "daily"]);
//! assert_eq!(Container::from_id("inbox"), Container::Inbox);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod identity;
pub mod platform;
pub mod share;
pub mod store;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use error::{CuelistError, Result};
pub use identity::{Identity, IdentityProvider};
pub use platform::{detect_platform, GENERIC_PLATFORM};
pub use share::ShareLink;
pub use store::{Store, Subscription, WriteOp};

// Export all types
pub use types::{
    author_or_sentinel, title_or_sentinel,
    AuthorEntry, Container, ContentId, ContentItem, CreateContent, Placement, Playlist,
    PlaylistId, TagEntry, TagSet, UserId, UNKNOWN_AUTHOR, UNTAGGED, UNTITLED,
};
