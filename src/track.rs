use crate::artist::Artist;
use serde::{Deserialize, Serialize};

/// A music track with its performing artist embedded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// Provider identifier. Must be non-empty for the track to be usable
    /// as a recommendation seed.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The performing artist, carried by value.
    pub artist: Artist,
}

impl Track {
    pub fn new(id: impl Into<String>, name: impl Into<String>, artist: Artist) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist,
        }
    }
}
