use crate::artist::Artist;
use crate::track::Track;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of entity a [`Seed`] was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedKind {
    Artist,
    Track,
}

impl std::fmt::Display for SeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedKind::Artist => write!(f, "artist"),
            SeedKind::Track => write!(f, "track"),
        }
    }
}

/// Seed derivation failed because the entity had an empty identifier.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot derive {kind} seed: empty id")]
pub struct SeedError {
    /// Which entity kind was invalid.
    pub kind: SeedKind,
}

/// An opaque token submitted to a recommendation provider.
///
/// Derived from exactly one [`Track`] or [`Artist`]; carries the entity's
/// identifier and kind, which is all a provider needs to produce related
/// tracks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    kind: SeedKind,
    id: String,
}

impl Seed {
    pub fn kind(&self) -> SeedKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn derive(kind: SeedKind, id: &str) -> Result<Self, SeedError> {
        if id.is_empty() {
            return Err(SeedError { kind });
        }

        Ok(Seed {
            kind,
            id: id.to_owned(),
        })
    }
}

impl Artist {
    /// Derives a recommendation seed from this artist.
    pub fn seed(&self) -> Result<Seed, SeedError> {
        Seed::derive(SeedKind::Artist, &self.id)
    }
}

impl Track {
    /// Derives a recommendation seed from this track.
    pub fn seed(&self) -> Result<Seed, SeedError> {
        Seed::derive(SeedKind::Track, &self.id)
    }
}
