use serde::{Deserialize, Serialize};

/// A music artist as reported by the catalogue service.
///
/// The display `name` is the uniqueness key for deduplication: two artists
/// with the same name are treated as the same artist regardless of `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artist {
    /// Provider identifier. Must be non-empty for the artist to be usable
    /// as a recommendation seed.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
