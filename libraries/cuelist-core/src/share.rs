//! Share link format
//!
//! A share link is a URL carrying two query parameters: `u` (owning user id)
//! and `p` (playlist id). Building and parsing live here; resolving a link
//! against a store is the session's job, since only a public playlist may be
//! read through one.

use crate::error::{CuelistError, Result};
use crate::types::{PlaylistId, UserId};
use url::Url;

const USER_PARAM: &str = "u";
const PLAYLIST_PARAM: &str = "p";

/// An unauthenticated-readable reference to one playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Owner of the referenced playlist
    pub owner: UserId,
    /// The referenced playlist
    pub playlist: PlaylistId,
}

impl ShareLink {
    pub fn new(owner: UserId, playlist: PlaylistId) -> Self {
        Self { owner, playlist }
    }

    /// Render the link against a base url, replacing its query
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair(USER_PARAM, self.owner.as_str())
            .append_pair(PLAYLIST_PARAM, self.playlist.as_str());
        url
    }

    /// Parse a share url; both parameters must be present and non-empty
    pub fn parse(link: &str) -> Result<Self> {
        let url = Url::parse(link)
            .map_err(|e| CuelistError::validation(format!("invalid share link: {e}")))?;

        let mut owner = None;
        let mut playlist = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                USER_PARAM if !value.is_empty() => owner = Some(UserId::new(value.as_ref())),
                PLAYLIST_PARAM if !value.is_empty() => {
                    playlist = Some(PlaylistId::new(value.as_ref()));
                }
                _ => {}
            }
        }

        match (owner, playlist) {
            (Some(owner), Some(playlist)) => Ok(Self { owner, playlist }),
            _ => Err(CuelistError::validation(
                "share link is missing the user or playlist parameter",
            )),
        }
    }
}
