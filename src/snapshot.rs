use crate::artist::Artist;
use crate::playlist::{Playlist, User};
use crate::service::{MusicService, PlaylistService};
use crate::track::Track;
use crate::Result;

/// A listener-facing view over a streaming service.
///
/// Bundles the fetches an application front end needs — profile, top
/// artists, recent tracks — together with playlist creation. Every call is
/// forwarded straight to the underlying service; nothing is cached between
/// calls, so each read reflects the service's current state.
pub struct ListenerSnapshot<S> {
    service: S,
}

impl<S> ListenerSnapshot<S>
where
    S: MusicService + PlaylistService,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The listener's own profile.
    pub async fn current_user(&self) -> Result<User> {
        self.service.current_user().await
    }

    /// The listener's most played artists.
    pub async fn top_artists(&self) -> Result<Vec<Artist>> {
        self.service.top_artists().await
    }

    /// The listener's recently played tracks.
    pub async fn recent_tracks(&self) -> Result<Vec<Track>> {
        self.service.recent_tracks().await
    }

    /// Creates a playlist named `name` holding `tracks`, owned by the
    /// current user.
    pub async fn playlist(&self, name: &str, tracks: &[Track]) -> Result<Playlist> {
        self.service.create_playlist(name, tracks).await
    }
}
