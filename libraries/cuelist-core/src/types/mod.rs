mod content;
mod ids;
mod playlist;
mod registry;
mod tags;

pub use content::{
    author_or_sentinel, title_or_sentinel, ContentItem, CreateContent, Placement, UNKNOWN_AUTHOR,
    UNTITLED,
};
pub use ids::{ContentId, PlaylistId, UserId};
pub use playlist::{Container, Playlist};
pub use registry::{AuthorEntry, TagEntry};
pub use tags::{TagSet, UNTAGGED};
