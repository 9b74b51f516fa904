use crate::artist::Artist;
use crate::playlist::{Playlist, User};
use crate::seed::Seed;
use crate::track::Track;
use crate::Result;
use async_trait::async_trait;

/// Catalogue capability: read access to a listener's listening history.
///
/// This is one of the two collaborators the [`Generator`](crate::Generator)
/// is built over. Implementations are expected to be stateless adapters,
/// safe for concurrent read-only use.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockMusicService`
/// implementing this trait via the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait MusicService {
    /// Fetch the listener's most played artists.
    async fn top_artists(&self) -> Result<Vec<Artist>>;

    /// Fetch the listener's recently played tracks.
    async fn recent_tracks(&self) -> Result<Vec<Track>>;
}

/// Recommendation capability: maps seed entities to candidate tracks.
///
/// `count` is the number of tracks the caller wants per request; providers
/// may return more or fewer. Candidates are returned in provider order.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait Recommender {
    async fn recommendations(&self, count: usize, seeds: &[Seed]) -> Result<Vec<Track>>;
}

/// Playlist capability: the extra operations the
/// [`ListenerSnapshot`](crate::ListenerSnapshot) needs beyond
/// [`MusicService`].
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait PlaylistService {
    /// Fetch the listener's own profile.
    async fn current_user(&self) -> Result<User>;

    /// Create a playlist holding `tracks`, in order, owned by the current
    /// user.
    async fn create_playlist(&self, name: &str, tracks: &[Track]) -> Result<Playlist>;
}
