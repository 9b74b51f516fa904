use crate::track::Track;
use serde::{Deserialize, Serialize};

/// The listener's profile on the streaming service.
///
/// Used only for playlist attribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
}

/// A playlist created on the streaming service.
///
/// Produced by [`PlaylistService::create_playlist`](crate::PlaylistService);
/// never mutated by this crate after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    /// The tracks the playlist was created with, in order.
    pub tracks: Vec<Track>,
}
