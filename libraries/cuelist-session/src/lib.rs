//! Cuelist Session
//!
//! Per-user orchestration over a `cuelist_core::Store`: the ordering, move,
//! tag-consistency, and search engines, the selected-container subscription
//! lifecycle, optimistic reorder with rollback, share-link resolution, and
//! configuration loading.
//!
//! The engines are generic over the store trait; `cuelist-store` provides
//! the SQLite implementation used in production and in this crate's
//! integration tests.

pub mod config;
pub mod identity;
pub mod moves;
pub mod ordering;
pub mod search;
pub mod session;
pub mod share;
pub mod tags;

pub use config::AppConfig;
pub use identity::LocalIdentityProvider;
pub use ordering::{plan_reorder, ReorderPlan};
pub use search::SearchHit;
pub use session::Session;
pub use share::SharedPlaylist;
